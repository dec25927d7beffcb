//! Port interface for caching reshaped lookup results.
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{CacheKey, define_port_error};

define_port_error! {
    /// Errors surfaced by the caching adapter.
    pub enum ResultCacheError {
        /// Cache backend is unavailable or timing out.
        Backend { message: String } => "result cache backend failure: {message}",
        /// Serialisation or deserialisation of cached content failed.
        Serialization { message: String } => "result cache serialisation failed: {message}",
    }
}

/// A fresh cached payload together with the instant it was stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// Cached JSON document.
    pub value: Value,
    /// When the entry was written.
    pub inserted_at: DateTime<Utc>,
}

/// Time-windowed key-value store.
///
/// Implementations only return entries younger than the ttl supplied when
/// they were written; stale entries read as absent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResultCache: Send + Sync {
    /// Read a fresh entry for the given key.
    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>, ResultCacheError>;

    /// Store `value` under `key`, replacing any previous entry, fresh for `ttl`.
    async fn put(&self, key: &CacheKey, value: Value, ttl: Duration)
    -> Result<(), ResultCacheError>;
}
