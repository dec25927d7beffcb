//! Landmark lookup orchestration with result caching.
//!
//! This module provides the concrete implementation of [`LandmarkLookup`]. It
//! consults the [`ResultCache`] first, calls the matching upstream source on a
//! miss, reshapes the payload into domain records and stores the result with
//! the ttl configured for that operation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use super::ports::{
    CacheKey, EncyclopediaSource, GeocodingSource, LandmarkLookup, ResultCache, RoutingSource,
    UpstreamError,
};
use super::{
    Error, GeocodeResult, Landmark, LandmarkDetail, LandmarkQuery, PageId, RouteGeometry,
    RouteRequest, SearchQuery,
};

const LANDMARKS_FAILURE: &str = "An error occurred while fetching landmarks";
const DETAIL_FAILURE: &str = "An error occurred while fetching landmark details";
const SEARCH_FAILURE: &str = "An error occurred during the search";
const ROUTE_FAILURE: &str = "An error occurred while fetching the route";
const LOCATION_NOT_FOUND: &str = "Location not found";
const LANDMARK_NOT_FOUND: &str = "Landmark not found";

/// Freshness windows applied to each cached operation.
///
/// Routes are never cached so they have no entry here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Ttl for nearby landmark searches.
    pub landmarks_ttl: Duration,
    /// Ttl for single landmark summaries.
    pub detail_ttl: Duration,
    /// Ttl for geocoder matches.
    pub geocode_ttl: Duration,
}

impl CachePolicy {
    /// Default ttl for nearby landmark searches.
    pub const DEFAULT_LANDMARKS_TTL: Duration = Duration::from_secs(300);
    /// Default ttl for summaries and geocoder matches.
    pub const DEFAULT_LOOKUP_TTL: Duration = Duration::from_secs(3600);
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            landmarks_ttl: Self::DEFAULT_LANDMARKS_TTL,
            detail_ttl: Self::DEFAULT_LOOKUP_TTL,
            geocode_ttl: Self::DEFAULT_LOOKUP_TTL,
        }
    }
}

/// Concrete implementation of [`LandmarkLookup`].
#[derive(Clone)]
pub struct LandmarkLookupService {
    encyclopedia: Arc<dyn EncyclopediaSource>,
    geocoder: Arc<dyn GeocodingSource>,
    router: Arc<dyn RoutingSource>,
    cache: Arc<dyn ResultCache>,
    policy: CachePolicy,
}

impl LandmarkLookupService {
    /// Create a service from its upstream sources, cache and ttl policy.
    pub fn new(
        encyclopedia: Arc<dyn EncyclopediaSource>,
        geocoder: Arc<dyn GeocodingSource>,
        router: Arc<dyn RoutingSource>,
        cache: Arc<dyn ResultCache>,
        policy: CachePolicy,
    ) -> Self {
        Self {
            encyclopedia,
            geocoder,
            router,
            cache,
            policy,
        }
    }

    /// Read and decode a fresh entry. Cache faults degrade to a miss.
    async fn read_cached<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        match self.cache.get(key).await {
            Ok(Some(entry)) => match serde_json::from_value(entry.value) {
                Ok(value) => {
                    debug!(cache_key = %key, inserted_at = %entry.inserted_at, "cache hit");
                    Some(value)
                }
                Err(err) => {
                    warn!(cache_key = %key, error = %err, "discarding undecodable cache entry");
                    None
                }
            },
            Ok(None) => {
                debug!(cache_key = %key, "cache miss");
                None
            }
            Err(err) => {
                warn!(cache_key = %key, error = %err, "cache read failed; treating as miss");
                None
            }
        }
    }

    /// Store a reshaped payload. Failures are logged and otherwise ignored.
    async fn write_cached<T: Serialize>(&self, key: &CacheKey, value: &T, ttl: Duration) {
        let document = match serde_json::to_value(value) {
            Ok(document) => document,
            Err(err) => {
                warn!(cache_key = %key, error = %err, "failed to serialise cache entry");
                return;
            }
        };
        if let Err(err) = self.cache.put(key, document, ttl).await {
            warn!(cache_key = %key, error = %err, "cache write failed");
        }
    }
}

fn upstream_failure(operation: &'static str, err: &UpstreamError, message: &str) -> Error {
    error!(operation, error = %err, "upstream request failed");
    Error::upstream(message)
}

#[async_trait]
impl LandmarkLookup for LandmarkLookupService {
    async fn landmarks(&self, query: &LandmarkQuery) -> Result<Vec<Landmark>, Error> {
        let key = CacheKey::landmarks(query);
        if let Some(hit) = self.read_cached::<Vec<Landmark>>(&key).await {
            return Ok(hit);
        }

        let places = match self.encyclopedia.search_nearby(query.centre, query.radius).await {
            Ok(places) => places,
            Err(err) if err.is_unexpected_shape() => {
                // Degraded results are not cached so the next request retries.
                error!(error = %err, "geosearch payload had an unexpected shape; returning no landmarks");
                return Ok(Vec::new());
            }
            Err(err) => return Err(upstream_failure("search_nearby", &err, LANDMARKS_FAILURE)),
        };

        let landmarks = places
            .into_iter()
            .map(|place| Landmark::new(place.page_id, place.title, place.coordinates))
            .filter(|landmark| query.filters.matches(landmark.category()))
            .collect::<Vec<_>>();
        self.write_cached(&key, &landmarks, self.policy.landmarks_ttl)
            .await;
        Ok(landmarks)
    }

    async fn landmark_detail(&self, page_id: PageId) -> Result<LandmarkDetail, Error> {
        let key = CacheKey::landmark_detail(page_id);
        if let Some(hit) = self.read_cached::<LandmarkDetail>(&key).await {
            return Ok(hit);
        }

        let summary = self
            .encyclopedia
            .fetch_summary(page_id)
            .await
            .map_err(|err| upstream_failure("fetch_summary", &err, DETAIL_FAILURE))?
            .ok_or_else(|| Error::not_found(LANDMARK_NOT_FOUND))?;

        let detail = LandmarkDetail::from_extract(summary.title, summary.extract);
        self.write_cached(&key, &detail, self.policy.detail_ttl)
            .await;
        Ok(detail)
    }

    async fn geocode(&self, query: &SearchQuery) -> Result<GeocodeResult, Error> {
        let key = CacheKey::geocode(query);
        if let Some(hit) = self.read_cached::<GeocodeResult>(&key).await {
            return Ok(hit);
        }

        let result = self
            .geocoder
            .geocode(query)
            .await
            .map_err(|err| upstream_failure("geocode", &err, SEARCH_FAILURE))?
            .ok_or_else(|| Error::not_found(LOCATION_NOT_FOUND))?;

        self.write_cached(&key, &result, self.policy.geocode_ttl)
            .await;
        Ok(result)
    }

    async fn route(&self, request: &RouteRequest) -> Result<RouteGeometry, Error> {
        self.router
            .route(request)
            .await
            .map_err(|err| upstream_failure("route", &err, ROUTE_FAILURE))
    }
}
