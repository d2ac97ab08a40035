//! Trip leg type.
//!
//! A `Leg` is one directed segment of the round trip, between two
//! consecutive waypoints, with the route chosen for it.

use serde::Serialize;

use super::{ResolvedWaypoint, Route};

/// A leg of a trip.
///
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leg {
    start: ResolvedWaypoint,
    end: ResolvedWaypoint,
    route: Route,
}

impl Leg {
    /// Construct a leg from its endpoints and selected route.
    pub fn new(start: ResolvedWaypoint, end: ResolvedWaypoint, route: Route) -> Self {
        Self { start, end, route }
    }

    /// Starting waypoint.
    pub fn start(&self) -> &ResolvedWaypoint {
        &self.start
    }

    /// Ending waypoint.
    pub fn end(&self) -> &ResolvedWaypoint {
        &self.end
    }

    /// Address the leg starts at.
    pub fn start_address(&self) -> &str {
        &self.start.address
    }

    /// Address the leg ends at.
    pub fn end_address(&self) -> &str {
        &self.end.address
    }

    /// The selected route.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Expected travel time of the selected route, in seconds.
    pub fn duration(&self) -> f64 {
        self.route.expected_duration
    }

    /// Distance of the selected route, in meters.
    pub fn distance(&self) -> f64 {
        self.route.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;

    #[test]
    fn accessors() {
        let a = ResolvedWaypoint::new("A", Coordinate::new(1.0, 1.0).unwrap());
        let b = ResolvedWaypoint::new("B", Coordinate::new(2.0, 2.0).unwrap());
        let leg = Leg::new(a.clone(), b.clone(), Route::summary(120.0, 2500.0));

        assert_eq!(leg.start(), &a);
        assert_eq!(leg.end(), &b);
        assert_eq!(leg.start_address(), "A");
        assert_eq!(leg.end_address(), "B");
        assert_eq!(leg.duration(), 120.0);
        assert_eq!(leg.distance(), 2500.0);
    }
}
