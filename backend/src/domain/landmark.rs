//! Landmark value types and lookup parameters.
//!
//! Purpose: model the points of interest returned by the encyclopedia
//! geosearch and the validated parameters used to look them up. Every type is
//! immutable once constructed; validating constructors enforce the invariants
//! documented on each type.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::classify;

/// Maximum number of characters kept from an encyclopedia extract.
pub const SUMMARY_CHAR_LIMIT: usize = 200;
/// Marker appended to truncated extracts.
pub const TRUNCATION_MARKER: &str = "...";
/// Summary used when the encyclopedia has no extract for a page.
pub const NO_INFORMATION: &str = "No information available.";

/// Coarse landmark category derived from the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Museums, castles, monuments, memorials, churches and cathedrals.
    Historical,
    /// Parks, mountains, lakes, rivers and forests.
    Natural,
    /// Everything else.
    Cultural,
}

impl Category {
    /// Every category, in classification order.
    pub const ALL: [Self; 3] = [Self::Historical, Self::Natural, Self::Cultural];

    /// Stable lowercase name used on the wire and in cache keys.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Historical => "historical",
            Self::Natural => "natural",
            Self::Cultural => "cultural",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a category name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown landmark category: {value}")]
pub struct CategoryParseError {
    /// The rejected input.
    pub value: String,
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CategoryParseError {
                value: s.to_owned(),
            })
    }
}

/// Set of categories a landmark search is restricted to.
///
/// An empty filter matches every category. Ordering and duplicates in the
/// input are irrelevant, so equal filters always render identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter(BTreeSet<Category>);

impl CategoryFilter {
    /// Parse a comma-separated list of category names.
    ///
    /// Blank segments are ignored, so `""` and `","` both yield an empty
    /// (match-all) filter.
    ///
    /// # Examples
    /// ```
    /// use local_landmarks::domain::{Category, CategoryFilter};
    ///
    /// let filter = CategoryFilter::from_csv("natural, historical,natural").expect("valid");
    /// assert!(filter.matches(Category::Natural));
    /// assert!(!filter.matches(Category::Cultural));
    /// assert_eq!(filter.to_string(), "historical,natural");
    /// ```
    pub fn from_csv(raw: &str) -> Result<Self, CategoryParseError> {
        raw.split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(Category::from_str)
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    /// Returns `true` when the filter admits `category`.
    pub fn matches(&self, category: Category) -> bool {
        self.0.is_empty() || self.0.contains(&category)
    }

    /// Returns `true` when no restriction applies.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Category> for CategoryFilter {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("all");
        }
        let names = self
            .0
            .iter()
            .map(|category| category.as_str())
            .collect::<Vec<_>>();
        f.write_str(&names.join(","))
    }
}

/// Positive encyclopedia page identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct PageId(u64);

/// Error returned when a page identifier is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("page id must be a positive integer")]
pub struct PageIdValidationError;

impl PageId {
    /// Validate and wrap a raw page identifier.
    pub fn new(raw: u64) -> Result<Self, PageIdValidationError> {
        if raw == 0 {
            return Err(PageIdValidationError);
        }
        Ok(Self(raw))
    }

    /// Access the raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for PageId {
    type Error = PageIdValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageId> for u64 {
    fn from(value: PageId) -> Self {
        value.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors for [`Coordinates`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoordinatesValidationError {
    /// Latitude is NaN, infinite or outside `[-90, 90]`.
    #[error("latitude must be a finite number within [-90, 90]")]
    Latitude,
    /// Longitude is NaN, infinite or outside `[-180, 180]`.
    #[error("longitude must be a finite number within [-180, 180]")]
    Longitude,
}

/// WGS84 point.
///
/// ## Invariants
/// - Both components are finite.
/// - Latitude lies in `[-90, 90]`, longitude in `[-180, 180]`.
/// - Negative zero is normalised to zero so equal points render identically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CoordinatesDto", into = "CoordinatesDto")]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Validate and construct a point.
    ///
    /// # Examples
    /// ```
    /// use local_landmarks::domain::Coordinates;
    ///
    /// let point = Coordinates::try_new(40.7128, -74.0060).expect("valid point");
    /// assert_eq!(point.latitude(), 40.7128);
    /// assert!(Coordinates::try_new(91.0, 0.0).is_err());
    /// ```
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, CoordinatesValidationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinatesValidationError::Latitude);
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinatesValidationError::Longitude);
        }
        // Adding positive zero maps -0.0 to 0.0 and leaves other values intact.
        Ok(Self {
            latitude: latitude + 0.0,
            longitude: longitude + 0.0,
        })
    }

    /// Latitude in decimal degrees.
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct CoordinatesDto {
    lat: f64,
    lon: f64,
}

impl TryFrom<CoordinatesDto> for Coordinates {
    type Error = CoordinatesValidationError;

    fn try_from(value: CoordinatesDto) -> Result<Self, Self::Error> {
        Self::try_new(value.lat, value.lon)
    }
}

impl From<Coordinates> for CoordinatesDto {
    fn from(value: Coordinates) -> Self {
        Self {
            lat: value.latitude,
            lon: value.longitude,
        }
    }
}

/// Geosearch radius in metres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchRadius(u32);

/// Error returned when a radius falls outside the geosearch limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("radius must be between {min} and {max} metres")]
pub struct SearchRadiusValidationError {
    /// Smallest accepted radius.
    pub min: u32,
    /// Largest accepted radius.
    pub max: u32,
}

impl SearchRadius {
    /// Smallest radius the geosearch API accepts.
    pub const MIN_METRES: u32 = 10;
    /// Largest radius the geosearch API accepts; also the default.
    pub const MAX_METRES: u32 = 10_000;

    /// Validate a radius in metres.
    pub fn new(metres: u32) -> Result<Self, SearchRadiusValidationError> {
        if !(Self::MIN_METRES..=Self::MAX_METRES).contains(&metres) {
            return Err(SearchRadiusValidationError {
                min: Self::MIN_METRES,
                max: Self::MAX_METRES,
            });
        }
        Ok(Self(metres))
    }

    /// Radius in metres.
    pub const fn metres(self) -> u32 {
        self.0
    }
}

impl Default for SearchRadius {
    fn default() -> Self {
        Self(Self::MAX_METRES)
    }
}

/// Validated parameters for a nearby landmark search.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkQuery {
    /// Search centre.
    pub centre: Coordinates,
    /// Search radius.
    pub radius: SearchRadius,
    /// Categories to keep.
    pub filters: CategoryFilter,
}

/// Classified point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    page_id: PageId,
    title: String,
    coordinates: Coordinates,
    category: Category,
}

impl Landmark {
    /// Build a landmark, deriving its category from the title.
    ///
    /// # Examples
    /// ```
    /// use local_landmarks::domain::{Category, Coordinates, Landmark, PageId};
    ///
    /// let landmark = Landmark::new(
    ///     PageId::new(42).expect("positive id"),
    ///     "Royal Museum",
    ///     Coordinates::try_new(55.95, -3.19).expect("valid point"),
    /// );
    /// assert_eq!(landmark.category(), Category::Historical);
    /// ```
    pub fn new(page_id: PageId, title: impl Into<String>, coordinates: Coordinates) -> Self {
        let title = title.into();
        let category = classify(&title);
        Self {
            page_id,
            title,
            coordinates,
            category,
        }
    }

    /// Encyclopedia page identifier.
    pub const fn page_id(&self) -> PageId {
        self.page_id
    }

    /// Page title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Landmark position.
    pub const fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Derived category.
    pub const fn category(&self) -> Category {
        self.category
    }
}

/// Short description of a single landmark.
///
/// ## Invariants
/// - `summary` holds at most [`SUMMARY_CHAR_LIMIT`] characters, followed by
///   [`TRUNCATION_MARKER`] when the source extract was longer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandmarkDetail {
    title: String,
    summary: String,
}

impl LandmarkDetail {
    /// Build a detail record from an encyclopedia extract.
    ///
    /// A missing extract becomes [`NO_INFORMATION`]; long extracts are cut on a
    /// character boundary.
    ///
    /// # Examples
    /// ```
    /// use local_landmarks::domain::LandmarkDetail;
    ///
    /// let detail = LandmarkDetail::from_extract("Tower", Some("x".repeat(250)));
    /// assert_eq!(detail.summary().chars().count(), 203);
    /// assert!(detail.summary().ends_with("..."));
    /// ```
    pub fn from_extract(title: impl Into<String>, extract: Option<String>) -> Self {
        let extract = extract.unwrap_or_else(|| NO_INFORMATION.to_owned());
        let summary = if extract.chars().count() > SUMMARY_CHAR_LIMIT {
            let mut truncated = extract.chars().take(SUMMARY_CHAR_LIMIT).collect::<String>();
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        } else {
            extract
        };
        Self {
            title: title.into(),
            summary,
        }
    }

    /// Page title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Possibly truncated summary text.
    pub fn summary(&self) -> &str {
        self.summary.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Validation and normalisation rules for landmark value types.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "all")]
    #[case(" , ", "all")]
    #[case("natural", "natural")]
    #[case("cultural,historical", "historical,cultural")]
    #[case("Natural,natural,NATURAL", "natural")]
    fn filters_render_canonically(#[case] raw: &str, #[case] expected: &str) {
        let filter = CategoryFilter::from_csv(raw).expect("valid filter");
        assert_eq!(filter.to_string(), expected);
    }

    #[rstest]
    fn filters_reject_unknown_categories() {
        let err = CategoryFilter::from_csv("natural,volcanic").expect_err("unknown category");
        assert_eq!(err.value, "volcanic");
    }

    #[rstest]
    fn empty_filter_matches_everything() {
        let filter = CategoryFilter::default();
        assert!(Category::ALL.into_iter().all(|category| filter.matches(category)));
    }

    #[rstest]
    #[case(f64::NAN, 0.0, CoordinatesValidationError::Latitude)]
    #[case(90.5, 0.0, CoordinatesValidationError::Latitude)]
    #[case(0.0, f64::INFINITY, CoordinatesValidationError::Longitude)]
    #[case(0.0, -180.1, CoordinatesValidationError::Longitude)]
    fn coordinates_reject_invalid_values(
        #[case] lat: f64,
        #[case] lon: f64,
        #[case] expected: CoordinatesValidationError,
    ) {
        assert_eq!(Coordinates::try_new(lat, lon), Err(expected));
    }

    #[rstest]
    fn coordinates_normalise_negative_zero() {
        let point = Coordinates::try_new(-0.0, -0.0).expect("valid point");
        assert_eq!(point.latitude().to_string(), "0");
        assert_eq!(point.longitude().to_string(), "0");
    }

    #[rstest]
    #[case(9, false)]
    #[case(10, true)]
    #[case(10_000, true)]
    #[case(10_001, false)]
    fn radius_enforces_geosearch_limits(#[case] metres: u32, #[case] valid: bool) {
        assert_eq!(SearchRadius::new(metres).is_ok(), valid);
    }

    #[rstest]
    fn page_id_rejects_zero() {
        assert_eq!(PageId::new(0), Err(PageIdValidationError));
        assert!(serde_json::from_str::<PageId>("0").is_err());
    }

    #[rstest]
    fn detail_keeps_short_extracts_verbatim() {
        let detail = LandmarkDetail::from_extract("Tower", Some("A tall tower.".to_owned()));
        assert_eq!(detail.summary(), "A tall tower.");
    }

    #[rstest]
    fn detail_keeps_extract_of_exactly_the_limit() {
        let extract = "y".repeat(SUMMARY_CHAR_LIMIT);
        let detail = LandmarkDetail::from_extract("Tower", Some(extract.clone()));
        assert_eq!(detail.summary(), extract);
    }

    #[rstest]
    fn detail_truncates_on_character_boundaries() {
        let detail = LandmarkDetail::from_extract("Café", Some("é".repeat(300)));
        assert_eq!(detail.summary().chars().count(), SUMMARY_CHAR_LIMIT + 3);
        assert!(detail.summary().ends_with(TRUNCATION_MARKER));
    }

    #[rstest]
    fn detail_defaults_missing_extract() {
        let detail = LandmarkDetail::from_extract("Tower", None);
        assert_eq!(detail.summary(), NO_INFORMATION);
    }
}
