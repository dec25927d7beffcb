//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: landmark search and detail, geocoding, routing and health
//! - **Schemas**: response bodies plus [`ErrorSchema`] and [`ErrorCodeSchema`],
//!   which describe the domain error without coupling it to utoipa
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::landmarks::{LandmarkDetailResponse, LandmarkResponse};
use crate::inbound::http::routes::RouteResponse;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::search::GeocodeResponse;
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Local Landmarks API",
        description = "Nearby landmarks, place search and driving routes backed by Wikipedia, Nominatim and OSRM."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::landmarks::list_landmarks,
        crate::inbound::http::landmarks::get_landmark,
        crate::inbound::http::search::search,
        crate::inbound::http::routes::get_route,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        LandmarkResponse,
        LandmarkDetailResponse,
        GeocodeResponse,
        RouteResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "landmarks", description = "Nearby landmarks and their summaries"),
        (name = "search", description = "Place name geocoding"),
        (name = "routes", description = "Driving routes between two points"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
