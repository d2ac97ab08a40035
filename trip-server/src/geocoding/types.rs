//! Nominatim response DTOs.
//!
//! These types map to the `format=jsonv2` output of `/search` and
//! `/reverse`. Nominatim sends coordinates as decimal strings.

use serde::{Deserialize, Serialize};

/// One search or reverse result.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NominatimPlace {
    /// Latitude as a decimal string.
    pub lat: String,

    /// Longitude as a decimal string.
    pub lon: String,

    /// Full comma-separated label.
    #[serde(default)]
    pub display_name: String,

    /// Structured address (requires `addressdetails=1`).
    pub address: Option<NominatimAddress>,
}

/// Structured address parts. Which fields are present depends on the place.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NominatimAddress {
    pub house_number: Option<String>,
    pub road: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub hamlet: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
}

impl NominatimAddress {
    /// The most specific populated-place name.
    pub fn locality(&self) -> Option<&str> {
        self.city
            .as_deref()
            .or(self.town.as_deref())
            .or(self.village.as_deref())
            .or(self.hamlet.as_deref())
    }
}

/// Reverse lookups answer `{"error": "..."}` when nothing is there.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum NominatimReverseResponse {
    Place(NominatimPlace),
    Error { error: String },
}
