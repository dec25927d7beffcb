//! Landmark discovery endpoints.
//!
//! ```text
//! GET /landmarks?lat=40.7128&lon=-74.0060&radius=5000&filters=historical,natural
//! GET /landmark/{pageid}
//! ```

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, Landmark, LandmarkDetail, LandmarkQuery};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::public_max_age_header;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_coordinates, parse_filters, parse_page_id, parse_radius,
};

const LAT: FieldName = FieldName::new("lat");
const LON: FieldName = FieldName::new("lon");
const RADIUS: FieldName = FieldName::new("radius");
const FILTERS: FieldName = FieldName::new("filters");
const PAGE_ID: FieldName = FieldName::new("pageid");

/// Query parameters for a nearby landmark search.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LandmarksParams {
    /// Latitude of the search centre in decimal degrees.
    #[param(value_type = f64, example = 40.7128)]
    pub lat: Option<String>,
    /// Longitude of the search centre in decimal degrees.
    #[param(value_type = f64, example = json!(-74.006))]
    pub lon: Option<String>,
    /// Search radius in metres. Fractions are truncated, values above 10000
    /// are clamped and values below 10 rejected. Defaults to 10000.
    #[param(value_type = Option<u32>, example = 5000)]
    pub radius: Option<String>,
    /// Comma-separated categories to keep. Empty or absent keeps everything.
    #[param(example = "historical,natural")]
    pub filters: Option<String>,
}

impl TryFrom<LandmarksParams> for LandmarkQuery {
    type Error = Error;

    fn try_from(params: LandmarksParams) -> Result<Self, Self::Error> {
        Ok(Self {
            centre: parse_coordinates(params.lat.as_deref(), params.lon.as_deref(), LAT, LON)?,
            radius: parse_radius(params.radius.as_deref(), RADIUS)?,
            filters: parse_filters(params.filters.as_deref(), FILTERS)?,
        })
    }
}

/// One classified landmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LandmarkResponse {
    /// Encyclopedia page identifier rendered as a string.
    #[schema(example = "645042")]
    pub pageid: String,
    /// Page title.
    #[schema(example = "American Museum of Natural History")]
    pub title: String,
    /// Latitude in decimal degrees.
    #[schema(example = 40.7813)]
    pub lat: f64,
    /// Longitude in decimal degrees.
    #[schema(example = json!(-73.974))]
    pub lon: f64,
    /// Derived category: `historical`, `natural` or `cultural`.
    #[serde(rename = "type")]
    #[schema(example = "historical")]
    pub category: String,
}

impl From<&Landmark> for LandmarkResponse {
    fn from(landmark: &Landmark) -> Self {
        Self {
            pageid: landmark.page_id().to_string(),
            title: landmark.title().to_owned(),
            lat: landmark.coordinates().latitude(),
            lon: landmark.coordinates().longitude(),
            category: landmark.category().as_str().to_owned(),
        }
    }
}

/// Title and short summary of one landmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LandmarkDetailResponse {
    /// Page title.
    #[schema(example = "Statue of Liberty")]
    pub title: String,
    /// Plain-text introduction, at most 200 characters plus `...`.
    #[schema(example = "The Statue of Liberty is a colossal neoclassical sculpture...")]
    pub extract: String,
}

impl From<LandmarkDetail> for LandmarkDetailResponse {
    fn from(detail: LandmarkDetail) -> Self {
        Self {
            title: detail.title().to_owned(),
            extract: detail.summary().to_owned(),
        }
    }
}

/// List classified landmarks near a point.
#[utoipa::path(
    get,
    path = "/landmarks",
    description = "Return encyclopedia landmarks within a radius, classified by title keywords and optionally filtered by category. Example request: GET /landmarks?lat=40.7128&lon=-74.0060&filters=natural",
    params(LandmarksParams),
    responses(
        (
            status = 200,
            description = "Landmarks in upstream order; empty when nothing matches",
            headers(("Cache-Control" = String, description = "public, max-age equal to the landmark ttl")),
            body = Vec<LandmarkResponse>
        ),
        (status = 400, description = "Invalid parameters", body = ErrorSchema),
        (status = 500, description = "Upstream failure", body = ErrorSchema)
    ),
    tags = ["landmarks"],
    operation_id = "listLandmarks"
)]
#[get("/landmarks")]
pub async fn list_landmarks(
    state: web::Data<HttpState>,
    params: web::Query<LandmarksParams>,
) -> ApiResult<HttpResponse> {
    let query = LandmarkQuery::try_from(params.into_inner())?;
    let landmarks = state.lookup.landmarks(&query).await?;
    let body = landmarks
        .iter()
        .map(LandmarkResponse::from)
        .collect::<Vec<_>>();
    Ok(HttpResponse::Ok()
        .insert_header(public_max_age_header(state.cache_policy.landmarks_ttl))
        .json(body))
}

/// Fetch the summary of one landmark.
#[utoipa::path(
    get,
    path = "/landmark/{pageid}",
    description = "Return the page title and a plain-text introduction truncated to 200 characters. Example request: GET /landmark/12345",
    params(("pageid" = u64, Path, description = "Positive encyclopedia page identifier")),
    responses(
        (
            status = 200,
            description = "Landmark summary",
            headers(("Cache-Control" = String, description = "public, max-age equal to the detail ttl")),
            body = LandmarkDetailResponse
        ),
        (status = 400, description = "Page id is not a positive integer", body = ErrorSchema),
        (status = 404, description = "Unknown page", body = ErrorSchema),
        (status = 500, description = "Upstream failure", body = ErrorSchema)
    ),
    tags = ["landmarks"],
    operation_id = "getLandmark"
)]
#[get("/landmark/{pageid}")]
pub async fn get_landmark(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let page_id = parse_page_id(path.as_str(), PAGE_ID)?;
    let detail = state.lookup.landmark_detail(page_id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(public_max_age_header(state.cache_policy.detail_ttl))
        .json(LandmarkDetailResponse::from(detail)))
}
