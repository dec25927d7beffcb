//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **wikipedia**: geosearch and page extracts over the MediaWiki action API
//! - **nominatim**: forward geocoding
//! - **osrm**: driving routes
//! - **cache**: in-process result cache
//!
//! Adapters are thin translators between domain types and transport payloads.
//! They contain no business logic.

pub mod cache;
pub mod nominatim;
pub mod osrm;
mod upstream_http;
pub mod wikipedia;
