//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the driving port and remain testable without I/O.

use std::sync::Arc;

use crate::domain::CachePolicy;
use crate::domain::ports::LandmarkLookup;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Landmark, search and routing use-cases.
    pub lookup: Arc<dyn LandmarkLookup>,
    /// Ttls advertised in `Cache-Control` headers.
    pub cache_policy: CachePolicy,
}

impl HttpState {
    /// Construct state from the lookup port and the ttl policy it caches with.
    pub fn new(lookup: Arc<dyn LandmarkLookup>, cache_policy: CachePolicy) -> Self {
        Self {
            lookup,
            cache_policy,
        }
    }
}
