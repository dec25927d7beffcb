//! Reqwest-backed Wikipedia encyclopedia adapter.
//!
//! This adapter owns transport details only: query-string construction for the
//! MediaWiki action API and decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::dto::{ExtractResponseDto, GeosearchResponseDto};
use crate::domain::ports::{EncyclopediaSource, NearbyPlace, PageSummary, UpstreamError};
use crate::domain::{Coordinates, PageId, SearchRadius};
use crate::outbound::upstream_http::{build_client, get_json};

/// Maximum number of geosearch hits requested per call.
pub const GEOSEARCH_LIMIT: u32 = 50;

/// Encyclopedia adapter issuing GET requests against one `api.php` endpoint.
pub struct WikipediaHttpSource {
    client: Client,
    endpoint: Url,
}

impl WikipediaHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout, user_agent)?,
            endpoint,
        })
    }

    fn geosearch_url(&self, centre: Coordinates, radius: SearchRadius) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("action", "query")
            .append_pair("list", "geosearch")
            .append_pair("gsradius", &radius.metres().to_string())
            .append_pair(
                "gscoord",
                &format!("{}|{}", centre.latitude(), centre.longitude()),
            )
            .append_pair("gslimit", &GEOSEARCH_LIMIT.to_string())
            .append_pair("format", "json");
        url
    }

    fn extract_url(&self, page_id: PageId) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("action", "query")
            .append_pair("pageids", &page_id.to_string())
            .append_pair("prop", "extracts")
            .append_key_only("exintro")
            .append_key_only("explaintext")
            .append_pair("format", "json");
        url
    }
}

#[async_trait]
impl EncyclopediaSource for WikipediaHttpSource {
    async fn search_nearby(
        &self,
        centre: Coordinates,
        radius: SearchRadius,
    ) -> Result<Vec<NearbyPlace>, UpstreamError> {
        let decoded: GeosearchResponseDto =
            get_json(&self.client, self.geosearch_url(centre, radius)).await?;
        decoded
            .into_nearby_places()
            .map_err(UpstreamError::unexpected_shape)
    }

    async fn fetch_summary(&self, page_id: PageId) -> Result<Option<PageSummary>, UpstreamError> {
        let decoded: ExtractResponseDto = get_json(&self.client, self.extract_url(page_id)).await?;
        decoded
            .into_page_summary(page_id)
            .map_err(UpstreamError::unexpected_shape)
    }
}
