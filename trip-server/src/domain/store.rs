//! Waypoint store.
//!
//! Holds the three trip slots (start, first stop, second stop) and is the
//! single source of truth for what the user has confirmed. Presentation
//! code reflects the store; it never reads back from input widgets.

use serde::Serialize;

use super::{DomainError, ResolvedWaypoint, Waypoint};

/// Number of waypoint slots.
pub const SLOT_COUNT: usize = 3;

/// The ordered waypoint slots for one trip-planning session.
///
/// # Examples
///
/// ```
/// use trip_server::domain::{Coordinate, WaypointStore};
///
/// let mut store = WaypointStore::new();
/// assert!(!store.is_ready_for_trip());
///
/// store.update(0, "Des Moines, IA", Coordinate::new(41.59, -93.62).unwrap()).unwrap();
/// store.update(1, "Rochester, MN", Coordinate::new(44.01, -92.48).unwrap()).unwrap();
/// assert!(store.is_ready_for_trip());
///
/// let trip = store.closed_round_trip().unwrap();
/// assert_eq!(trip.len(), 3);
/// assert_eq!(trip.first(), trip.last());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WaypointStore {
    slots: [Waypoint; SLOT_COUNT],
}

impl WaypointStore {
    /// Create a store with all slots unresolved.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from explicit slot contents.
    pub fn from_slots(slots: [Waypoint; SLOT_COUNT]) -> Self {
        Self { slots }
    }

    fn check_index(index: usize) -> Result<(), DomainError> {
        if index >= SLOT_COUNT {
            return Err(DomainError::SlotOutOfRange {
                index,
                count: SLOT_COUNT,
            });
        }
        Ok(())
    }

    /// Overwrite both the address and point of a slot.
    pub fn update(
        &mut self,
        index: usize,
        address: impl Into<String>,
        point: super::Coordinate,
    ) -> Result<(), DomainError> {
        Self::check_index(index)?;
        self.slots[index] = Waypoint::resolved(address, point);
        Ok(())
    }

    /// Reset a slot to unresolved.
    pub fn clear(&mut self, index: usize) -> Result<(), DomainError> {
        Self::check_index(index)?;
        self.slots[index] = Waypoint::unset();
        Ok(())
    }

    /// Exchange the full contents of two slots.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<(), DomainError> {
        Self::check_index(i)?;
        Self::check_index(j)?;
        self.slots.swap(i, j);
        Ok(())
    }

    /// Returns the slot at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.slots.get(index)
    }

    /// Returns all slots in order.
    pub fn slots(&self) -> &[Waypoint] {
        &self.slots
    }

    /// Number of slots with a resolved point.
    pub fn resolved_count(&self) -> usize {
        self.slots.iter().filter(|w| w.is_resolved()).count()
    }

    /// True iff the start is resolved and at least one stop is.
    pub fn is_ready_for_trip(&self) -> bool {
        self.slots[0].is_resolved() && (self.slots[1].is_resolved() || self.slots[2].is_resolved())
    }

    /// The resolved slots in order, with the first repeated at the end.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientWaypoints` if [`is_ready_for_trip`] is false.
    ///
    /// [`is_ready_for_trip`]: Self::is_ready_for_trip
    pub fn closed_round_trip(&self) -> Result<Vec<ResolvedWaypoint>, DomainError> {
        if !self.is_ready_for_trip() {
            return Err(DomainError::InsufficientWaypoints);
        }

        let mut sequence: Vec<ResolvedWaypoint> =
            self.slots.iter().filter_map(Waypoint::to_resolved).collect();

        // Safe: readiness guarantees slot 0 is resolved
        let first = sequence[0].clone();
        sequence.push(first);

        Ok(sequence)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::Coordinate;
    use proptest::prelude::*;

    fn arb_waypoint() -> impl Strategy<Value = Waypoint> {
        prop_oneof![
            Just(Waypoint::unset()),
            ("[A-Za-z ]{1,16}", -90.0f64..=90.0, -180.0f64..=180.0).prop_map(
                |(address, lat, lon)| {
                    Waypoint::resolved(address, Coordinate::new(lat, lon).unwrap())
                }
            ),
        ]
    }

    fn arb_store() -> impl Strategy<Value = WaypointStore> {
        [arb_waypoint(), arb_waypoint(), arb_waypoint()].prop_map(WaypointStore::from_slots)
    }

    proptest! {
        /// A ready store's round trip is closed and one longer than the resolved count.
        #[test]
        fn round_trip_is_closed(store in arb_store()) {
            match store.closed_round_trip() {
                Ok(trip) => {
                    prop_assert!(store.is_ready_for_trip());
                    prop_assert_eq!(trip.len(), store.resolved_count() + 1);
                    prop_assert_eq!(trip.first(), trip.last());
                }
                Err(e) => {
                    prop_assert!(!store.is_ready_for_trip());
                    prop_assert_eq!(e, DomainError::InsufficientWaypoints);
                }
            }
        }

        /// Swapping twice restores the original store.
        #[test]
        fn swap_is_involution(store in arb_store(), i in 0usize..3, j in 0usize..3) {
            let mut s = store.clone();
            s.swap(i, j).unwrap();
            s.swap(i, j).unwrap();
            prop_assert_eq!(s, store);
        }

        /// The round trip preserves slot order of resolved waypoints.
        #[test]
        fn round_trip_preserves_order(store in arb_store()) {
            if let Ok(trip) = store.closed_round_trip() {
                let expected: Vec<ResolvedWaypoint> = store
                    .slots()
                    .iter()
                    .filter_map(Waypoint::to_resolved)
                    .collect();
                prop_assert_eq!(&trip[..trip.len() - 1], &expected[..]);
            }
        }
    }
}
