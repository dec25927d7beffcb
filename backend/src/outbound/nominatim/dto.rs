//! DTOs for decoding Nominatim search results.

use serde::Deserialize;

use crate::domain::{Coordinates, GeocodeResult};

/// One search hit. Nominatim reports coordinates as decimal strings.
#[derive(Debug, Deserialize)]
pub(super) struct NominatimPlaceDto {
    pub(super) lat: String,
    pub(super) lon: String,
    pub(super) display_name: String,
}

impl NominatimPlaceDto {
    pub(super) fn into_geocode_result(self) -> Result<GeocodeResult, String> {
        let latitude = parse_coordinate("lat", &self.lat)?;
        let longitude = parse_coordinate("lon", &self.lon)?;
        let coordinates =
            Coordinates::try_new(latitude, longitude).map_err(|error| error.to_string())?;
        Ok(GeocodeResult {
            coordinates,
            display_name: self.display_name,
        })
    }
}

fn parse_coordinate(field: &str, raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|error| format!("{field} '{raw}' is not numeric: {error}"))
}
