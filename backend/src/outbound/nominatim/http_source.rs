//! Reqwest-backed Nominatim geocoding adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::dto::NominatimPlaceDto;
use crate::domain::ports::{GeocodingSource, UpstreamError};
use crate::domain::{GeocodeResult, SearchQuery};
use crate::outbound::upstream_http::{build_client, extend_path, get_json};

/// User agent sent to the geocoder; Nominatim's usage policy requires one.
pub const DEFAULT_USER_AGENT: &str = "LocalLandmarksApp/1.0";

/// Geocoding adapter issuing `search` requests against one Nominatim host.
pub struct NominatimHttpSource {
    client: Client,
    search_endpoint: Url,
}

impl NominatimHttpSource {
    /// Build an adapter rooted at `base_url`, e.g. `https://nominatim.openstreetmap.org`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout, user_agent)?,
            search_endpoint: extend_path(&base_url, &["search"]),
        })
    }

    fn search_url(&self, query: &SearchQuery) -> Url {
        let mut url = self.search_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", query.as_str())
            .append_pair("format", "json")
            .append_pair("limit", "1");
        url
    }
}

#[async_trait]
impl GeocodingSource for NominatimHttpSource {
    async fn geocode(&self, query: &SearchQuery) -> Result<Option<GeocodeResult>, UpstreamError> {
        let hits: Vec<NominatimPlaceDto> = get_json(&self.client, self.search_url(query)).await?;
        hits.into_iter()
            .next()
            .map(NominatimPlaceDto::into_geocode_result)
            .transpose()
            .map_err(UpstreamError::unexpected_shape)
    }
}
