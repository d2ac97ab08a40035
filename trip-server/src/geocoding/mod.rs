//! Address geocoding.
//!
//! Forward geocoding turns free-text input into candidate placemarks the
//! user picks from; reverse geocoding pre-fills the starting point from
//! the current position. `NominatimClient` talks to an OpenStreetMap
//! Nominatim server and `StaticGeocoder` serves fixed tables.

mod client;
mod error;
mod mock;
mod placemark;
mod provider;
mod types;

pub use client::{NominatimClient, NominatimConfig, address_lines, to_placemark};
pub use error::GeocodingError;
pub use mock::StaticGeocoder;
pub use placemark::{Placemark, formatted_address};
pub use provider::{GeocodingProvider, normalize_query};
pub use types::{NominatimAddress, NominatimPlace, NominatimReverseResponse};
