//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod cache_key;
mod encyclopedia_source;
mod geocoding_source;
mod landmark_lookup;
mod result_cache;
mod routing_source;
mod upstream_error;

pub use cache_key::CacheKey;
#[cfg(test)]
pub use encyclopedia_source::MockEncyclopediaSource;
pub use encyclopedia_source::{EncyclopediaSource, NearbyPlace, PageSummary};
#[cfg(test)]
pub use geocoding_source::MockGeocodingSource;
pub use geocoding_source::GeocodingSource;
#[cfg(test)]
pub use landmark_lookup::MockLandmarkLookup;
pub use landmark_lookup::LandmarkLookup;
#[cfg(test)]
pub use result_cache::MockResultCache;
pub use result_cache::{CacheEntry, ResultCache, ResultCacheError};
#[cfg(test)]
pub use routing_source::MockRoutingSource;
pub use routing_source::RoutingSource;
pub use upstream_error::UpstreamError;
