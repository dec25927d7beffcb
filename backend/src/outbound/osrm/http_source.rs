//! Reqwest-backed OSRM routing adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::dto::RouteResponseDto;
use crate::domain::ports::{RoutingSource, UpstreamError};
use crate::domain::{Coordinates, RouteGeometry, RouteRequest};
use crate::outbound::upstream_http::{build_client, extend_path, get_json};

const PROFILE_PATH: [&str; 3] = ["route", "v1", "driving"];

/// Routing adapter issuing driving-route requests against one OSRM host.
pub struct OsrmHttpSource {
    client: Client,
    base_url: Url,
}

impl OsrmHttpSource {
    /// Build an adapter rooted at `base_url`, e.g. `https://router.project-osrm.org`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout, user_agent)?,
            base_url,
        })
    }

    fn route_url(&self, request: &RouteRequest) -> Url {
        // OSRM expects longitude before latitude.
        let waypoints = format!("{};{}", lon_lat(request.start), lon_lat(request.end));
        let [route, version, profile] = PROFILE_PATH;
        let mut url = extend_path(&self.base_url, &[route, version, profile, waypoints.as_str()]);
        url.query_pairs_mut()
            .append_pair("overview", "full")
            .append_pair("geometries", "geojson");
        url
    }
}

fn lon_lat(point: Coordinates) -> String {
    format!("{},{}", point.longitude(), point.latitude())
}

#[async_trait]
impl RoutingSource for OsrmHttpSource {
    async fn route(&self, request: &RouteRequest) -> Result<RouteGeometry, UpstreamError> {
        let decoded: RouteResponseDto = get_json(&self.client, self.route_url(request)).await?;
        decoded
            .into_first_geometry()
            .map_err(UpstreamError::unexpected_shape)
    }
}
