//! Driven port for forward geocoding.

use async_trait::async_trait;

use super::UpstreamError;
use crate::domain::{GeocodeResult, SearchQuery};

/// Port resolving free-text place names to coordinates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeocodingSource: Send + Sync {
    /// Return the best match for `query`, or `None` when nothing matched.
    async fn geocode(&self, query: &SearchQuery) -> Result<Option<GeocodeResult>, UpstreamError>;
}
