//! Geographic coordinate type.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Error returned when constructing a coordinate from out-of-range values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

/// A validated WGS84 position in degrees.
///
/// Latitude is within `[-90, 90]`, longitude within `[-180, 180]`, and both
/// are finite. Negative zero is normalised on construction so that `Eq` and
/// `Hash` agree.
///
/// # Examples
///
/// ```
/// use trip_server::domain::Coordinate;
///
/// let des_moines = Coordinate::new(41.5868, -93.625).unwrap();
/// assert_eq!(des_moines.lat(), 41.5868);
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate", into = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Construct a coordinate, validating ranges.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoordinate> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(InvalidCoordinate {
                reason: "latitude and longitude must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate {
                reason: "latitude must be within [-90, 90]",
            });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidCoordinate {
                reason: "longitude must be within [-180, 180]",
            });
        }

        // -0.0 + 0.0 == +0.0
        Ok(Self {
            lat: lat + 0.0,
            lon: lon + 0.0,
        })
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.lat.to_bits());
        state.write_u64(self.lon.to_bits());
    }
}

impl From<Coordinate> for geo_types::Point<f64> {
    fn from(c: Coordinate) -> Self {
        geo_types::Point::new(c.lon, c.lat)
    }
}

impl From<&Coordinate> for geo_types::Point<f64> {
    fn from(c: &Coordinate) -> Self {
        geo_types::Point::new(c.lon, c.lat)
    }
}

impl TryFrom<geo_types::Point<f64>> for Coordinate {
    type Error = InvalidCoordinate;

    fn try_from(p: geo_types::Point<f64>) -> Result<Self, Self::Error> {
        Coordinate::new(p.y(), p.x())
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.lat, self.lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}

/// Wire form used by serde so that deserialised values are validated.
#[derive(Serialize, Deserialize)]
struct RawCoordinate {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = InvalidCoordinate;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.lat, raw.lon)
    }
}

impl From<Coordinate> for RawCoordinate {
    fn from(c: Coordinate) -> Self {
        RawCoordinate {
            lat: c.lat,
            lon: c.lon,
        }
    }
}
