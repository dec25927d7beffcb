//! Wikipedia outbound adapter.
//!
//! This module provides a thin HTTP implementation of the
//! `EncyclopediaSource` port over the MediaWiki action API.

mod dto;
mod http_source;

pub use http_source::{GEOSEARCH_LIMIT, WikipediaHttpSource};
