//! DTOs for decoding OSRM route responses.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::RouteGeometry;

#[derive(Debug, Deserialize)]
pub(super) struct RouteResponseDto {
    pub(super) code: Option<String>,
    #[serde(default)]
    pub(super) routes: Vec<RouteDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RouteDto {
    pub(super) geometry: Option<Value>,
}

impl RouteResponseDto {
    /// Geometry of the first route.
    pub(super) fn into_first_geometry(self) -> Result<RouteGeometry, String> {
        let code = self.code.unwrap_or_default();
        self.routes
            .into_iter()
            .next()
            .and_then(|route| route.geometry)
            .map(RouteGeometry::new)
            .ok_or_else(|| format!("response has no route geometry (code '{code}')"))
    }
}
