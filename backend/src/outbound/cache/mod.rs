//! In-process result cache adapter.
//!
//! Implements the `ResultCache` port with a mutex-guarded map. Entries are
//! stamped from an injected [`Clock`] and checked for freshness on read; there
//! is no background eviction, so the map grows with the number of distinct
//! keys until the process restarts. Stale entries are overwritten on the next
//! `put` for the same key.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde_json::Value;

use crate::domain::ports::{CacheEntry, CacheKey, ResultCache, ResultCacheError};

#[derive(Debug, Clone)]
struct StoredEntry {
    value: Value,
    inserted_at: DateTime<Utc>,
    ttl: TimeDelta,
}

impl StoredEntry {
    fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        now - self.inserted_at < self.ttl
    }
}

/// Unbounded in-memory [`ResultCache`].
pub struct InMemoryResultCache {
    entries: Mutex<HashMap<CacheKey, StoredEntry>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryResultCache {
    /// Create an empty cache reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Number of stored entries, fresh or stale.
    pub fn len(&self) -> usize {
        self.lock_entries().map_or(0, |entries| entries.len())
    }

    /// Returns `true` when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_entries(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<CacheKey, StoredEntry>>, ResultCacheError> {
        self.entries
            .lock()
            .map_err(|_| ResultCacheError::backend("result cache mutex poisoned"))
    }
}

#[async_trait]
impl ResultCache for InMemoryResultCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>, ResultCacheError> {
        let now = self.clock.utc();
        let entries = self.lock_entries()?;
        Ok(entries
            .get(key)
            .filter(|entry| entry.is_fresh_at(now))
            .map(|entry| CacheEntry {
                value: entry.value.clone(),
                inserted_at: entry.inserted_at,
            }))
    }

    async fn put(
        &self,
        key: &CacheKey,
        value: Value,
        ttl: Duration,
    ) -> Result<(), ResultCacheError> {
        let ttl = TimeDelta::from_std(ttl)
            .map_err(|error| ResultCacheError::serialization(format!("ttl out of range: {error}")))?;
        let entry = StoredEntry {
            value,
            inserted_at: self.clock.utc(),
            ttl,
        };
        self.lock_entries()?.insert(key.clone(), entry);
        Ok(())
    }
}
