//! OSRM route API response DTOs.
//!
//! These types map directly to the OSRM `route/v1` JSON response.
//! Fields we don't use are omitted; optional fields use `Option` or
//! `#[serde(default)]` because OSRM leaves them out rather than sending
//! null.

use serde::{Deserialize, Serialize};

/// Top-level response from `GET /route/v1/{profile}/{coordinates}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OsrmRouteResponse {
    /// "Ok" on success, otherwise an error code such as "NoRoute".
    pub code: String,

    /// Error description (only on failure).
    pub message: Option<String>,

    /// Candidate routes, provider-preferred first.
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

/// One candidate route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OsrmRoute {
    /// Travel time in seconds.
    pub duration: f64,

    /// Distance in meters.
    pub distance: f64,

    /// Full geometry (requires `geometries=geojson`).
    pub geometry: Option<OsrmGeometry>,

    /// One entry per waypoint pair; two waypoints means one leg.
    #[serde(default)]
    pub legs: Vec<OsrmLeg>,
}

/// GeoJSON LineString geometry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OsrmGeometry {
    /// Always "LineString" for routes.
    #[serde(rename = "type")]
    pub kind: String,

    /// `[lon, lat]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}

/// Route leg between two waypoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OsrmLeg {
    #[serde(default)]
    pub steps: Vec<OsrmStep>,
}

/// A single step (requires `steps=true`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OsrmStep {
    /// Distance of this step in meters.
    pub distance: f64,

    /// Travel time of this step in seconds.
    pub duration: f64,

    /// Name of the way travelled on.
    #[serde(default)]
    pub name: String,

    /// Road reference, e.g. "I 35".
    #[serde(rename = "ref")]
    pub road_ref: Option<String>,

    /// Name of a rotary, if this step enters one.
    pub rotary_name: Option<String>,

    pub maneuver: OsrmManeuver,
}

/// Maneuver at the start of a step.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OsrmManeuver {
    /// e.g. "depart", "turn", "arrive", "roundabout".
    #[serde(rename = "type")]
    pub kind: String,

    /// e.g. "left", "slight right", "uturn".
    pub modifier: Option<String>,

    /// Bearing after the maneuver, 0-359 clockwise from north.
    #[serde(default)]
    pub bearing_after: u16,

    /// Exit number for roundabouts.
    pub exit: Option<u32>,
}
