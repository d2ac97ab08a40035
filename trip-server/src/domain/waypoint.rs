//! Waypoint types.
//!
//! A `Waypoint` is the content of one trip slot as entered by the user.
//! A `ResolvedWaypoint` is a waypoint known to have a geographic point,
//! and is what the round-trip sequence and legs are built from.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// One slot of the trip: an optional address label and an optional point.
///
/// A waypoint is *resolved* once the user has confirmed a candidate
/// location for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Human-readable address label.
    pub address: Option<String>,
    /// Confirmed geographic location.
    pub point: Option<Coordinate>,
}

impl Waypoint {
    /// Creates a resolved waypoint.
    pub fn resolved(address: impl Into<String>, point: Coordinate) -> Self {
        Self {
            address: Some(address.into()),
            point: Some(point),
        }
    }

    /// Creates an empty waypoint.
    pub fn unset() -> Self {
        Self::default()
    }

    /// Returns true if the waypoint has a resolved point.
    pub fn is_resolved(&self) -> bool {
        self.point.is_some()
    }

    /// Returns the resolved form, if the point is known.
    ///
    /// A resolved waypoint with no address label uses its formatted
    /// coordinate as the label.
    pub fn to_resolved(&self) -> Option<ResolvedWaypoint> {
        let point = self.point?;
        let address = self
            .address
            .clone()
            .unwrap_or_else(|| point.to_string());
        Some(ResolvedWaypoint { address, point })
    }
}

/// A waypoint with a known location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedWaypoint {
    pub address: String,
    pub point: Coordinate,
}

impl ResolvedWaypoint {
    pub fn new(address: impl Into<String>, point: Coordinate) -> Self {
        Self {
            address: address.into(),
            point,
        }
    }
}

impl From<ResolvedWaypoint> for Waypoint {
    fn from(w: ResolvedWaypoint) -> Self {
        Waypoint::resolved(w.address, w.point)
    }
}

/// Logical role of each slot in the waypoint store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaypointSlot {
    /// Where the trip starts and ends.
    Start,
    /// First stop.
    FirstStop,
    /// Second stop (optional).
    SecondStop,
}

impl WaypointSlot {
    /// All slots, in trip order.
    pub const ALL: [WaypointSlot; 3] = [
        WaypointSlot::Start,
        WaypointSlot::FirstStop,
        WaypointSlot::SecondStop,
    ];

    /// Index of the slot in the store.
    pub fn index(self) -> usize {
        match self {
            WaypointSlot::Start => 0,
            WaypointSlot::FirstStop => 1,
            WaypointSlot::SecondStop => 2,
        }
    }

    /// Slot for a store index, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Label shown next to the input for this slot.
    pub fn label(self) -> &'static str {
        match self {
            WaypointSlot::Start => "Start/End Point",
            WaypointSlot::FirstStop => "Stop #1",
            WaypointSlot::SecondStop => "Stop #2 (optional)",
        }
    }
}

impl fmt::Display for WaypointSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point() -> Coordinate {
        Coordinate::new(41.5868, -93.625).unwrap()
    }

    #[test]
    fn unset_is_unresolved() {
        let w = Waypoint::unset();
        assert!(!w.is_resolved());
        assert!(w.to_resolved().is_none());
    }

    #[test]
    fn resolved_keeps_address() {
        let w = Waypoint::resolved("Des Moines, IA, United States", point());
        let r = w.to_resolved().unwrap();
        assert_eq!(r.address, "Des Moines, IA, United States");
        assert_eq!(r.point, point());
    }

    #[test]
    fn point_without_address_uses_coordinate_label() {
        let w = Waypoint {
            address: None,
            point: Some(point()),
        };
        assert_eq!(w.to_resolved().unwrap().address, "41.586800, -93.625000");
    }

    #[test]
    fn address_without_point_is_unresolved() {
        let w = Waypoint {
            address: Some("Des Moines Iowa".into()),
            point: None,
        };
        assert!(!w.is_resolved());
    }

    #[test]
    fn slot_index_roundtrip() {
        for slot in WaypointSlot::ALL {
            assert_eq!(WaypointSlot::from_index(slot.index()), Some(slot));
        }
        assert_eq!(WaypointSlot::from_index(3), None);
    }

    #[test]
    fn slot_labels() {
        assert_eq!(WaypointSlot::Start.to_string(), "Start/End Point");
        assert_eq!(WaypointSlot::SecondStop.label(), "Stop #2 (optional)");
    }
}
