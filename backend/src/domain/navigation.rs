//! Geocoding and routing value types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::Coordinates;

/// Non-blank free-text place query.
///
/// Surrounding whitespace is trimmed; interior whitespace is preserved
/// verbatim so the geocoder sees what the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

/// Error returned when a search query is blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("search query must not be blank")]
pub struct SearchQueryValidationError;

impl SearchQuery {
    /// Validate and trim a raw query.
    ///
    /// # Examples
    /// ```
    /// use local_landmarks::domain::SearchQuery;
    ///
    /// let query = SearchQuery::new("  Eiffel Tower ").expect("non-blank");
    /// assert_eq!(query.as_str(), "Eiffel Tower");
    /// assert!(SearchQuery::new("   ").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, SearchQueryValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SearchQueryValidationError);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the trimmed query.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// First geocoder match for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    /// Matched position.
    pub coordinates: Coordinates,
    /// Human-readable name reported by the geocoder.
    pub display_name: String,
}

/// Start and end points of a driving route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    /// Route origin.
    pub start: Coordinates,
    /// Route destination.
    pub end: Coordinates,
}

/// Route geometry passed through verbatim from the router (usually GeoJSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteGeometry(Value);

impl RouteGeometry {
    /// Wrap an opaque geometry document.
    pub fn new(geometry: Value) -> Self {
        Self(geometry)
    }

    /// Borrow the raw geometry.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume the wrapper, returning the raw geometry.
    pub fn into_value(self) -> Value {
        self.0
    }
}
