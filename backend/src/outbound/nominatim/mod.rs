//! Nominatim outbound adapter.
//!
//! This module provides a thin HTTP implementation of the `GeocodingSource`
//! port.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_USER_AGENT, NominatimHttpSource};
