//! DTOs for decoding MediaWiki action API responses.
//!
//! The adapter decodes into these transport DTOs first, then maps into domain
//! records (`NearbyPlace`, `PageSummary`) in one pass.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::ports::{NearbyPlace, PageSummary};
use crate::domain::{Coordinates, PageId};

#[derive(Debug, Deserialize)]
pub(super) struct GeosearchResponseDto {
    pub(super) query: Option<GeosearchQueryDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GeosearchQueryDto {
    pub(super) geosearch: Option<Vec<GeosearchHitDto>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GeosearchHitDto {
    pub(super) pageid: u64,
    pub(super) title: String,
    pub(super) lat: f64,
    pub(super) lon: f64,
}

impl GeosearchResponseDto {
    pub(super) fn into_nearby_places(self) -> Result<Vec<NearbyPlace>, String> {
        self.query
            .and_then(|query| query.geosearch)
            .ok_or_else(|| "response missing query.geosearch".to_owned())?
            .into_iter()
            .map(GeosearchHitDto::into_nearby_place)
            .collect()
    }
}

impl GeosearchHitDto {
    fn into_nearby_place(self) -> Result<NearbyPlace, String> {
        let page_id = PageId::new(self.pageid)
            .map_err(|_| format!("geosearch hit '{}' has page id 0", self.title))?;
        let coordinates = Coordinates::try_new(self.lat, self.lon)
            .map_err(|error| format!("geosearch hit {page_id}: {error}"))?;
        Ok(NearbyPlace {
            page_id,
            title: self.title,
            coordinates,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ExtractResponseDto {
    pub(super) query: Option<ExtractQueryDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ExtractQueryDto {
    #[serde(default)]
    pub(super) pages: HashMap<String, ExtractPageDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ExtractPageDto {
    pub(super) title: Option<String>,
    pub(super) extract: Option<String>,
    pub(super) missing: Option<serde_json::Value>,
    pub(super) invalid: Option<serde_json::Value>,
}

impl ExtractResponseDto {
    /// Pick the requested page. Absent, missing and invalid pages map to `None`.
    pub(super) fn into_page_summary(self, page_id: PageId) -> Result<Option<PageSummary>, String> {
        let mut query = self
            .query
            .ok_or_else(|| "response missing query.pages".to_owned())?;
        let Some(page) = query.pages.remove(&page_id.to_string()) else {
            return Ok(None);
        };
        if page.missing.is_some() || page.invalid.is_some() {
            return Ok(None);
        }
        let title = page
            .title
            .ok_or_else(|| format!("page {page_id} has no title"))?;
        Ok(Some(PageSummary {
            title,
            extract: page.extract,
        }))
    }
}
