//! Place search endpoint.
//!
//! ```text
//! GET /search?q=Eiffel%20Tower
//! ```

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::GeocodeResult;
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::public_max_age_header;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_search_query};

const QUERY: FieldName = FieldName::new("q");

/// Query parameters for a place search.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Free-text place name. Surrounding whitespace is ignored.
    #[param(example = "Statue of Liberty")]
    pub q: Option<String>,
}

/// Best geocoder match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeocodeResponse {
    /// Latitude in decimal degrees.
    #[schema(example = 40.6892)]
    pub lat: f64,
    /// Longitude in decimal degrees.
    #[schema(example = json!(-74.0445))]
    pub lon: f64,
    /// Human-readable name reported by the geocoder.
    #[schema(example = "Statue of Liberty, Liberty Island, New York, United States")]
    pub display_name: String,
}

impl From<GeocodeResult> for GeocodeResponse {
    fn from(result: GeocodeResult) -> Self {
        Self {
            lat: result.coordinates.latitude(),
            lon: result.coordinates.longitude(),
            display_name: result.display_name,
        }
    }
}

/// Resolve a place name to coordinates.
#[utoipa::path(
    get,
    path = "/search",
    description = "Geocode a free-text place name and return the first match. Example request: GET /search?q=Paris",
    params(SearchParams),
    responses(
        (
            status = 200,
            description = "First geocoder match",
            headers(("Cache-Control" = String, description = "public, max-age equal to the geocode ttl")),
            body = GeocodeResponse
        ),
        (status = 400, description = "Missing or blank query", body = ErrorSchema),
        (status = 404, description = "No match", body = ErrorSchema),
        (status = 500, description = "Upstream failure", body = ErrorSchema)
    ),
    tags = ["search"],
    operation_id = "searchPlace"
)]
#[get("/search")]
pub async fn search(
    state: web::Data<HttpState>,
    params: web::Query<SearchParams>,
) -> ApiResult<HttpResponse> {
    let query = parse_search_query(params.q.as_deref(), QUERY)?;
    let result = state.lookup.geocode(&query).await?;
    Ok(HttpResponse::Ok()
        .insert_header(public_max_age_header(state.cache_policy.geocode_ttl))
        .json(GeocodeResponse::from(result)))
}
