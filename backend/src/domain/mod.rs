//! Domain primitives, ports and services.
//!
//! Purpose: define strongly typed values for landmark discovery, place search
//! and routing, plus the service that orchestrates upstream sources and the
//! result cache. Types are immutable once built and document their invariants
//! and serde contracts in their own Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - Landmark, LandmarkDetail, Category and friends: lookup records.
//! - LandmarkLookupService: implementation of the
//!   [`ports::LandmarkLookup`] driving port.

mod classifier;
pub mod error;
mod landmark;
mod landmark_lookup_service;
mod navigation;
pub mod ports;
mod trace_id;

pub use self::classifier::classify;
pub use self::error::{Error, ErrorCode};
pub use self::landmark::{
    Category, CategoryFilter, CategoryParseError, Coordinates, CoordinatesValidationError,
    Landmark, LandmarkDetail, LandmarkQuery, NO_INFORMATION, PageId, PageIdValidationError,
    SUMMARY_CHAR_LIMIT, SearchRadius, SearchRadiusValidationError, TRUNCATION_MARKER,
};
pub use self::landmark_lookup_service::{CachePolicy, LandmarkLookupService};
pub use self::navigation::{
    GeocodeResult, RouteGeometry, RouteRequest, SearchQuery, SearchQueryValidationError,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use local_landmarks::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::invalid_request("Missing required parameters"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
