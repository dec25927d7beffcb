//! Driving port for landmark discovery, place search and routing.
//!
//! Inbound adapters call [`LandmarkLookup`] with validated domain values and
//! receive either reshaped records or a transport-agnostic [`Error`]. Caching
//! and upstream orchestration stay behind the port.

use async_trait::async_trait;

use crate::domain::{
    Error, GeocodeResult, Landmark, LandmarkDetail, LandmarkQuery, PageId, RouteGeometry,
    RouteRequest, SearchQuery,
};

/// Query surface exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LandmarkLookup: Send + Sync {
    /// Classified landmarks near a point, narrowed to the requested
    /// categories. Preserves upstream order.
    async fn landmarks(&self, query: &LandmarkQuery) -> Result<Vec<Landmark>, Error>;

    /// Title and truncated summary for one page.
    async fn landmark_detail(&self, page_id: PageId) -> Result<LandmarkDetail, Error>;

    /// Resolve a place name to coordinates.
    async fn geocode(&self, query: &SearchQuery) -> Result<GeocodeResult, Error>;

    /// Geometry of a driving route. Never cached.
    async fn route(&self, request: &RouteRequest) -> Result<RouteGeometry, Error>;
}
