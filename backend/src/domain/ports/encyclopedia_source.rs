//! Driven port for the encyclopedia geosearch and page-extract lookups.
//!
//! The domain owns the request and record shapes; adapters decode their
//! transport payloads into these types and report schema mismatches as
//! [`UpstreamError::UnexpectedShape`].

use async_trait::async_trait;

use super::UpstreamError;
use crate::domain::{Coordinates, PageId, SearchRadius};

/// One geosearch hit before classification.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyPlace {
    /// Encyclopedia page identifier.
    pub page_id: PageId,
    /// Page title.
    pub title: String,
    /// Position reported by the geosearch.
    pub coordinates: Coordinates,
}

/// Title and plain-text introduction of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    /// Page title.
    pub title: String,
    /// Introductory extract, when the page has one.
    pub extract: Option<String>,
}

/// Port for querying the encyclopedia.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EncyclopediaSource: Send + Sync {
    /// List pages geotagged within `radius` of `centre`.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let places = source
    ///     .search_nearby(Coordinates::try_new(55.95, -3.19)?, SearchRadius::default())
    ///     .await?;
    /// assert!(places.len() <= 50);
    /// ```
    async fn search_nearby(
        &self,
        centre: Coordinates,
        radius: SearchRadius,
    ) -> Result<Vec<NearbyPlace>, UpstreamError>;

    /// Fetch the summary for one page, or `None` when the page does not exist.
    async fn fetch_summary(&self, page_id: PageId) -> Result<Option<PageSummary>, UpstreamError>;
}
