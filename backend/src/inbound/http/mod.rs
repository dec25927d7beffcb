//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

use crate::domain::Error;

pub mod cache_control;
pub mod error;
pub mod health;
pub mod landmarks;
pub mod routes;
pub mod schemas;
pub mod search;
pub mod state;
pub mod validation;

pub use error::ApiResult;

/// Query extractor configuration that reports malformed query strings using
/// the shared error envelope instead of actix's plain-text default.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| Error::invalid_request(err.to_string()).into())
}
