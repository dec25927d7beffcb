//! Shared validation helpers for inbound HTTP adapters.
//!
//! Query parameters arrive as optional strings so that every rejection goes
//! through [`ValidationError`] and produces the same `400` payload shape:
//! `details` carries the offending `field`, a machine-readable `code`, and the
//! rejected `value` where one was supplied.

use serde_json::json;
use tracing::warn;

use crate::domain::{
    CategoryFilter, Coordinates, CoordinatesValidationError, Error, PageId, SearchQuery,
    SearchRadius,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidNumber,
    OutOfRange,
    InvalidCategory,
    InvalidPageId,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidNumber => "invalid_number",
            ErrorCode::OutOfRange => "out_of_range",
            ErrorCode::InvalidCategory => "invalid_category",
            ErrorCode::InvalidPageId => "invalid_page_id",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        warn!(field = self.field, code = code.as_str(), "rejecting request");
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        let value = value.into();
        warn!(field = self.field, code = code.as_str(), value = %value, "rejecting request");
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value,
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("missing required parameter: {name}"))
        .with_code(ErrorCode::MissingField)
}

/// Return the trimmed value, treating absent and blank input alike.
pub(crate) fn require(value: Option<&str>, field: FieldName) -> Result<&str, Error> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .ok_or_else(|| missing_field_error(field))
}

/// Parse a required finite decimal number.
pub(crate) fn parse_required_f64(value: Option<&str>, field: FieldName) -> Result<f64, Error> {
    let raw = require(value, field)?;
    raw.parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .ok_or_else(|| {
            let name = field.as_str();
            ValidationError::new(field, format!("{name} must be a finite number"))
                .with_value(ErrorCode::InvalidNumber, raw)
        })
}

/// Parse a required latitude/longitude pair.
pub(crate) fn parse_coordinates(
    latitude: Option<&str>,
    longitude: Option<&str>,
    lat_field: FieldName,
    lon_field: FieldName,
) -> Result<Coordinates, Error> {
    let lat = parse_required_f64(latitude, lat_field)?;
    let lon = parse_required_f64(longitude, lon_field)?;
    Coordinates::try_new(lat, lon).map_err(|error| {
        let (field, value) = match error {
            CoordinatesValidationError::Latitude => (lat_field, lat),
            CoordinatesValidationError::Longitude => (lon_field, lon),
        };
        ValidationError::new(field, error.to_string())
            .with_value(ErrorCode::OutOfRange, value.to_string())
    })
}

/// Parse an optional radius in metres, defaulting to the maximum.
///
/// Fractional input is truncated toward zero and values above
/// [`SearchRadius::MAX_METRES`] are clamped, so map clients can send the raw
/// distance to the viewport edge.
pub(crate) fn parse_radius(value: Option<&str>, field: FieldName) -> Result<SearchRadius, Error> {
    let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(SearchRadius::default());
    };
    let metres = raw
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite() && *parsed >= 0.0)
        .ok_or_else(|| {
            let name = field.as_str();
            ValidationError::new(field, format!("{name} must be a non-negative number of metres"))
                .with_value(ErrorCode::InvalidNumber, raw)
        })?;
    let clamped = metres.trunc().min(f64::from(SearchRadius::MAX_METRES));
    // `clamped` is a whole number in `0..=MAX_METRES`, so the cast is exact.
    let whole = clamped as u32;
    SearchRadius::new(whole).map_err(|error| {
        ValidationError::new(field, error.to_string()).with_value(ErrorCode::OutOfRange, raw)
    })
}

/// Parse an optional comma-separated category list. Absent means no filter.
pub(crate) fn parse_filters(value: Option<&str>, field: FieldName) -> Result<CategoryFilter, Error> {
    CategoryFilter::from_csv(value.unwrap_or_default()).map_err(|error| {
        ValidationError::new(field, error.to_string())
            .with_value(ErrorCode::InvalidCategory, error.value)
    })
}

/// Parse a required, non-blank place query.
pub(crate) fn parse_search_query(value: Option<&str>, field: FieldName) -> Result<SearchQuery, Error> {
    value
        .and_then(|raw| SearchQuery::new(raw).ok())
        .ok_or_else(|| {
            ValidationError::new(field, "No search query provided")
                .with_code(ErrorCode::MissingField)
        })
}

/// Parse a positive integer page identifier.
pub(crate) fn parse_page_id(raw: &str, field: FieldName) -> Result<PageId, Error> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .and_then(|id| PageId::new(id).ok())
        .ok_or_else(|| {
            let name = field.as_str();
            ValidationError::new(field, format!("{name} must be a positive integer"))
                .with_value(ErrorCode::InvalidPageId, raw)
        })
}

#[cfg(test)]
mod tests {
    //! Parameter parsing and the shape of validation payloads.

    use super::*;
    use crate::domain::{Category, ErrorCode as DomainErrorCode};
    use rstest::rstest;
    use serde_json::Value;

    const LAT: FieldName = FieldName::new("lat");
    const LON: FieldName = FieldName::new("lon");
    const RADIUS: FieldName = FieldName::new("radius");
    const FILTERS: FieldName = FieldName::new("filters");

    fn detail<'a>(error: &'a Error, key: &str) -> &'a Value {
        error
            .details()
            .and_then(|details| details.get(key))
            .expect("detail present")
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn missing_latitude_is_reported(#[case] raw: Option<&str>) {
        let error = parse_coordinates(raw, Some("0"), LAT, LON).expect_err("missing");
        assert_eq!(error.code(), DomainErrorCode::InvalidRequest);
        assert_eq!(detail(&error, "field"), "lat");
        assert_eq!(detail(&error, "code"), "missing_field");
    }

    #[rstest]
    #[case("abc")]
    #[case("NaN")]
    #[case("inf")]
    fn non_numeric_longitude_is_invalid_number(#[case] raw: &str) {
        let error = parse_coordinates(Some("1"), Some(raw), LAT, LON).expect_err("invalid");
        assert_eq!(detail(&error, "field"), "lon");
        assert_eq!(detail(&error, "code"), "invalid_number");
        assert_eq!(detail(&error, "value"), raw);
    }

    #[rstest]
    #[case("91", "0", "lat")]
    #[case("-90.5", "0", "lat")]
    #[case("0", "180.01", "lon")]
    fn out_of_range_coordinates_name_the_field(
        #[case] lat: &str,
        #[case] lon: &str,
        #[case] field: &str,
    ) {
        let error = parse_coordinates(Some(lat), Some(lon), LAT, LON).expect_err("out of range");
        assert_eq!(detail(&error, "field"), field);
        assert_eq!(detail(&error, "code"), "out_of_range");
    }

    #[rstest]
    fn coordinates_keep_input_precision() {
        let point = parse_coordinates(Some(" 40.7128 "), Some("-74.0060"), LAT, LON)
            .expect("valid point");
        assert_eq!(point.latitude(), 40.7128);
        assert_eq!(point.longitude(), -74.006);
    }

    #[rstest]
    #[case(None, 10_000)]
    #[case(Some(""), 10_000)]
    #[case(Some("10"), 10)]
    #[case(Some("2500"), 2_500)]
    #[case(Some("2345.678"), 2_345)]
    #[case(Some("10.9"), 10)]
    #[case(Some("15000.5"), 10_000)]
    #[case(Some("1e6"), 10_000)]
    fn radius_defaults_and_parses(#[case] raw: Option<&str>, #[case] expected: u32) {
        assert_eq!(parse_radius(raw, RADIUS).expect("valid").metres(), expected);
    }

    #[rstest]
    #[case("far", "invalid_number")]
    #[case("inf", "invalid_number")]
    #[case("-1", "invalid_number")]
    #[case("-0.5", "invalid_number")]
    #[case("9", "out_of_range")]
    #[case("9.99", "out_of_range")]
    fn radius_rejections(#[case] raw: &str, #[case] code: &str) {
        let error = parse_radius(Some(raw), RADIUS).expect_err("rejected");
        assert_eq!(detail(&error, "code"), code);
        assert_eq!(detail(&error, "value"), raw);
    }

    #[rstest]
    fn filters_absent_match_everything() {
        let filter = parse_filters(None, FILTERS).expect("valid");
        assert!(filter.is_empty());
        assert!(Category::ALL.into_iter().all(|category| filter.matches(category)));
    }

    #[rstest]
    fn unknown_filter_is_rejected_with_value() {
        let error = parse_filters(Some("natural,volcanic"), FILTERS).expect_err("unknown");
        assert_eq!(detail(&error, "code"), "invalid_category");
        assert_eq!(detail(&error, "value"), "volcanic");
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("  \t"))]
    fn blank_search_query_is_missing(#[case] raw: Option<&str>) {
        let error = parse_search_query(raw, FieldName::new("q")).expect_err("blank");
        assert_eq!(error.message(), "No search query provided");
        assert_eq!(detail(&error, "code"), "missing_field");
    }

    #[rstest]
    #[case("0")]
    #[case("-4")]
    #[case("12a")]
    #[case("")]
    fn page_id_must_be_positive_integer(#[case] raw: &str) {
        let error = parse_page_id(raw, FieldName::new("pageid")).expect_err("invalid id");
        assert_eq!(detail(&error, "code"), "invalid_page_id");
    }
}
