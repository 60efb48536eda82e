//! Geocoordinate resolution from raw latitude/longitude fields.

use serde::Serialize;
use serde_json::Value;

use super::extract::extract_single;

/// A resolved geographic location.
///
/// Present on a record only when both coordinates resolve to finite numbers;
/// everything location-dependent (map links) hangs off this type so it is
/// automatically withheld otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Resolve a point from raw coordinate fields of any supported shape.
    pub fn from_fields(latitude: Option<&Value>, longitude: Option<&Value>) -> Option<Self> {
        let latitude = latitude.and_then(coordinate)?;
        let longitude = longitude.and_then(coordinate)?;
        Some(Self {
            latitude,
            longitude,
        })
    }

    /// Link to the location on OpenStreetMap.
    pub fn osm_url(&self) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map=16/{lat}/{lon}",
            lat = self.latitude,
            lon = self.longitude
        )
    }

    /// Link to the location on Google Maps.
    pub fn google_maps_url(&self) -> String {
        format!(
            "https://www.google.com/maps/search/?api=1&query={},{}",
            self.latitude, self.longitude
        )
    }
}

/// Resolve one coordinate field to a finite number, unwrapping arrays and
/// wrapped objects first and parsing numeric strings afterwards.
pub fn coordinate(value: &Value) -> Option<f64> {
    let text = extract_single(value);
    text.parse::<f64>().ok().filter(|parsed| parsed.is_finite())
}
