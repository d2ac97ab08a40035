//! Itinerary type.
//!
//! An `Itinerary` is the complete, ordered set of legs of a round trip
//! plus the aggregate travel time.

use serde::Serialize;

use super::{DomainError, Leg};

/// A complete round-trip itinerary.
///
/// # Invariants
///
/// - At least one leg
/// - Consecutive legs connect (end of one = start of next)
/// - `total_duration` is the sum of leg durations, accumulated in leg order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itinerary {
    legs: Vec<Leg>,
    total_duration: f64,
}

impl Itinerary {
    /// Constructs an itinerary from legs in travel order.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `legs` is empty or consecutive legs don't connect.
    pub fn new(legs: Vec<Leg>) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyItinerary);
        }

        for window in legs.windows(2) {
            if window[0].end() != window[1].start() {
                return Err(DomainError::LegsNotConnected(
                    window[0].end_address().to_string(),
                    window[1].start_address().to_string(),
                ));
            }
        }

        let mut total_duration = 0.0;
        for leg in &legs {
            total_duration += leg.duration();
        }

        Ok(Self {
            legs,
            total_duration,
        })
    }

    /// Legs in travel order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Number of legs.
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Total expected travel time in seconds.
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// Total distance in meters.
    pub fn total_distance(&self) -> f64 {
        self.legs.iter().map(Leg::distance).sum()
    }

    /// True if the last leg returns to where the first one started.
    pub fn is_round_trip(&self) -> bool {
        match (self.legs.first(), self.legs.last()) {
            (Some(first), Some(last)) => first.start() == last.end(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, ResolvedWaypoint, Route};

    fn wp(name: &str, lat: f64) -> ResolvedWaypoint {
        ResolvedWaypoint::new(name, Coordinate::new(lat, 0.0).unwrap())
    }

    fn leg(from: &ResolvedWaypoint, to: &ResolvedWaypoint, secs: f64) -> Leg {
        Leg::new(from.clone(), to.clone(), Route::summary(secs, secs * 10.0))
    }

    #[test]
    fn empty_rejected() {
        assert_eq!(Itinerary::new(vec![]), Err(DomainError::EmptyItinerary));
    }

    #[test]
    fn disconnected_rejected() {
        let (a, b, c) = (wp("A", 1.0), wp("B", 2.0), wp("C", 3.0));
        let result = Itinerary::new(vec![leg(&a, &b, 1.0), leg(&c, &a, 1.0)]);
        assert!(matches!(result, Err(DomainError::LegsNotConnected(_, _))));
    }

    #[test]
    fn totals() {
        let (a, b, c) = (wp("A", 1.0), wp("B", 2.0), wp("C", 3.0));
        let it = Itinerary::new(vec![
            leg(&a, &b, 600.0),
            leg(&b, &c, 300.5),
            leg(&c, &a, 900.25),
        ])
        .unwrap();

        assert_eq!(it.leg_count(), 3);
        assert_eq!(it.total_duration(), 600.0 + 300.5 + 900.25);
        assert_eq!(it.total_distance(), 6000.0 + 3005.0 + 9002.5);
        assert!(it.is_round_trip());
    }

    #[test]
    fn one_way_is_not_round_trip() {
        let (a, b) = (wp("A", 1.0), wp("B", 2.0));
        let it = Itinerary::new(vec![leg(&a, &b, 1.0)]).unwrap();
        assert!(!it.is_round_trip());
    }
}
