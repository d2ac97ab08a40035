//! Geocoding results.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, ResolvedWaypoint};

/// A candidate location returned by a geocoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placemark {
    /// Postal-style address lines, most specific first.
    pub address_lines: Vec<String>,
    pub coordinate: Coordinate,
}

impl Placemark {
    pub fn new(address_lines: Vec<String>, coordinate: Coordinate) -> Self {
        Self {
            address_lines,
            coordinate,
        }
    }

    /// The address lines joined with ", ".
    pub fn formatted_address(&self) -> String {
        formatted_address(&self.address_lines)
    }

    /// The placemark as a waypoint the user has confirmed.
    pub fn to_waypoint(&self) -> ResolvedWaypoint {
        ResolvedWaypoint::new(self.formatted_address(), self.coordinate)
    }
}

/// Join address lines with ", ", skipping blank lines.
pub fn formatted_address<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .map(|l| l.as_ref().trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
