//! Route types returned by a directions provider.

use std::fmt;

use geo_types::LineString;
use serde::{Deserialize, Serialize};

/// How the trip is travelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    #[default]
    Automobile,
    Walking,
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransportMode::Automobile => "automobile",
            TransportMode::Walking => "walking",
        })
    }
}

/// One instruction within a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    /// Human-readable maneuver text, e.g. "Turn left onto Main Street".
    pub instruction: String,
    /// Distance covered by this step, in meters.
    pub distance: f64,
}

impl RouteStep {
    pub fn new(instruction: impl Into<String>, distance: f64) -> Self {
        Self {
            instruction: instruction.into(),
            distance,
        }
    }
}

/// A candidate route between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Expected travel time in seconds.
    pub expected_duration: f64,
    /// Route length in meters.
    pub distance: f64,
    /// Route geometry as (lon, lat) pairs.
    pub polyline: LineString<f64>,
    /// Turn-by-turn steps, in travel order.
    pub steps: Vec<RouteStep>,
}

impl Route {
    /// Creates a route with no geometry or steps.
    pub fn summary(expected_duration: f64, distance: f64) -> Self {
        Self {
            expected_duration,
            distance,
            polyline: LineString::new(Vec::new()),
            steps: Vec::new(),
        }
    }

    /// Number of steps.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}
