//! Driven port for driving-route lookups.

use async_trait::async_trait;

use super::UpstreamError;
use crate::domain::{RouteGeometry, RouteRequest};

/// Port returning the geometry of the first driving route between two points.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoutingSource: Send + Sync {
    /// Fetch the route geometry. A response without any route is reported as
    /// [`UpstreamError::UnexpectedShape`].
    async fn route(&self, request: &RouteRequest) -> Result<RouteGeometry, UpstreamError>;
}
