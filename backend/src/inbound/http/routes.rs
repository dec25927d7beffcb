//! Driving route endpoint.
//!
//! ```text
//! GET /route?start_lat=48.8584&start_lon=2.2945&end_lat=48.8606&end_lon=2.3376
//! ```

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, RouteGeometry, RouteRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::no_store_header;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_coordinates};

const START_LAT: FieldName = FieldName::new("start_lat");
const START_LON: FieldName = FieldName::new("start_lon");
const END_LAT: FieldName = FieldName::new("end_lat");
const END_LON: FieldName = FieldName::new("end_lon");

/// Query parameters naming both route endpoints.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RouteParams {
    /// Origin latitude.
    #[param(value_type = f64, example = 48.8584)]
    pub start_lat: Option<String>,
    /// Origin longitude.
    #[param(value_type = f64, example = 2.2945)]
    pub start_lon: Option<String>,
    /// Destination latitude.
    #[param(value_type = f64, example = 48.8606)]
    pub end_lat: Option<String>,
    /// Destination longitude.
    #[param(value_type = f64, example = 2.3376)]
    pub end_lon: Option<String>,
}

impl TryFrom<RouteParams> for RouteRequest {
    type Error = Error;

    fn try_from(params: RouteParams) -> Result<Self, Self::Error> {
        Ok(Self {
            start: parse_coordinates(
                params.start_lat.as_deref(),
                params.start_lon.as_deref(),
                START_LAT,
                START_LON,
            )?,
            end: parse_coordinates(
                params.end_lat.as_deref(),
                params.end_lon.as_deref(),
                END_LAT,
                END_LON,
            )?,
        })
    }
}

/// Route geometry wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RouteResponse {
    /// GeoJSON geometry of the first route, passed through from the router.
    #[schema(value_type = Object)]
    pub geometry: Value,
}

impl From<RouteGeometry> for RouteResponse {
    fn from(geometry: RouteGeometry) -> Self {
        Self {
            geometry: geometry.into_value(),
        }
    }
}

/// Fetch a driving route between two points.
#[utoipa::path(
    get,
    path = "/route",
    description = "Return the GeoJSON geometry of the first driving route. Responses are never cached. Example request: GET /route?start_lat=48.8584&start_lon=2.2945&end_lat=48.8606&end_lon=2.3376",
    params(RouteParams),
    responses(
        (
            status = 200,
            description = "Route geometry",
            headers(("Cache-Control" = String, description = "no-store")),
            body = RouteResponse
        ),
        (status = 400, description = "Invalid parameters", body = ErrorSchema),
        (status = 500, description = "Upstream failure", body = ErrorSchema)
    ),
    tags = ["routes"],
    operation_id = "getRoute"
)]
#[get("/route")]
pub async fn get_route(
    state: web::Data<HttpState>,
    params: web::Query<RouteParams>,
) -> ApiResult<HttpResponse> {
    let request = RouteRequest::try_from(params.into_inner())?;
    let geometry = state.lookup.route(&request).await?;
    Ok(HttpResponse::Ok()
        .insert_header(no_store_header())
        .json(RouteResponse::from(geometry)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CachePolicy;
    use crate::domain::ports::MockLandmarkLookup;
    use crate::inbound::http::query_config;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::json;
    use std::sync::Arc;

    async fn get(lookup: MockLandmarkLookup, uri: &str) -> (StatusCode, Value) {
        let state = web::Data::new(HttpState::new(Arc::new(lookup), CachePolicy::default()));
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(query_config())
                .service(get_route),
        )
        .await;
        let response = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = response.status();
        let body = test::read_body(response).await;
        (status, serde_json::from_slice(&body).expect("JSON body"))
    }

    #[rstest]
    #[actix_web::test]
    async fn route_wraps_geometry() {
        let mut lookup = MockLandmarkLookup::new();
        lookup
            .expect_route()
            .withf(|request| request.start == request.end)
            .returning(|_| {
                Ok(RouteGeometry::new(
                    json!({"type": "LineString", "coordinates": [[2.2945, 48.8584]]}),
                ))
            });

        let (status, body) = get(
            lookup,
            "/route?start_lat=48.8584&start_lon=2.2945&end_lat=48.8584&end_lon=2.2945",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["geometry"]["type"], "LineString");
    }

    #[rstest]
    #[case("/route?start_lat=1&start_lon=2&end_lat=3", "end_lon")]
    #[case("/route?start_lat=100&start_lon=2&end_lat=3&end_lon=4", "start_lat")]
    #[actix_web::test]
    async fn invalid_endpoints_are_rejected(#[case] uri: &str, #[case] field: &str) {
        let mut lookup = MockLandmarkLookup::new();
        lookup.expect_route().never();

        let (status, body) = get(lookup, uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["field"], field);
    }

    #[rstest]
    #[actix_web::test]
    async fn router_failure_is_generic_500() {
        let mut lookup = MockLandmarkLookup::new();
        lookup
            .expect_route()
            .returning(|_| Err(Error::upstream("An error occurred while fetching the route")));

        let (status, body) = get(lookup, "/route?start_lat=1&start_lon=2&end_lat=3&end_lon=4").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "An error occurred while fetching the route");
        assert_eq!(body["code"], "upstream_error");
    }
}
