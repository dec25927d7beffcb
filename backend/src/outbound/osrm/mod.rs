//! OSRM outbound adapter.
//!
//! This module provides a thin HTTP implementation of the `RoutingSource`
//! port using the OSRM route service.

mod dto;
mod http_source;

pub use http_source::OsrmHttpSource;
