//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::{Itinerary, Leg, WaypointSlot, WaypointStore, format_duration, format_miles};
use crate::geocoding::Placemark;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the trip form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub slots: Vec<SlotView>,
}

impl IndexTemplate {
    /// Form for an empty trip.
    pub fn empty() -> Self {
        Self::from_store(&WaypointStore::new())
    }

    /// Form pre-filled from a store.
    pub fn from_store(store: &WaypointStore) -> Self {
        Self {
            slots: SlotView::from_store(store),
        }
    }
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// "Did you mean..." candidate list.
#[derive(Template)]
#[template(path = "candidates.html")]
pub struct CandidatesTemplate {
    /// Slot the user is filling in
    pub slot: usize,
    pub candidates: Vec<CandidateView>,
}

/// Directions table for a planned trip.
#[derive(Template)]
#[template(path = "itinerary.html")]
pub struct ItineraryTemplate {
    pub itinerary: ItineraryView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// One input row of the trip form.
#[derive(Debug, Clone)]
pub struct SlotView {
    pub index: usize,
    pub label: &'static str,
    pub address: String,
    pub resolved: bool,
}

impl SlotView {
    /// Rows for every slot of a store.
    pub fn from_store(store: &WaypointStore) -> Vec<Self> {
        WaypointSlot::ALL
            .iter()
            .zip(store.slots())
            .map(|(slot, waypoint)| SlotView {
                index: slot.index(),
                label: slot.label(),
                address: waypoint.address.clone().unwrap_or_default(),
                resolved: waypoint.is_resolved(),
            })
            .collect()
    }
}

/// A geocoding candidate row.
#[derive(Debug, Clone)]
pub struct CandidateView {
    pub address: String,
    pub lat: f64,
    pub lon: f64,
}

impl CandidateView {
    /// Create from a geocoding placemark.
    pub fn from_placemark(placemark: &Placemark) -> Self {
        Self {
            address: placemark.formatted_address(),
            lat: placemark.coordinate.lat(),
            lon: placemark.coordinate.lon(),
        }
    }
}

/// Itinerary view model for templates.
#[derive(Debug, Clone)]
pub struct ItineraryView {
    pub segments: Vec<SegmentView>,
    pub total_display: String,
}

impl ItineraryView {
    /// Create from a domain Itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            segments: itinerary
                .legs()
                .iter()
                .enumerate()
                .map(|(i, leg)| SegmentView::from_leg(i + 1, leg))
                .collect(),
            total_display: format!("Total: {}", format_duration(itinerary.total_duration())),
        }
    }
}

/// One leg of the directions table.
#[derive(Debug, Clone)]
pub struct SegmentView {
    /// 1-based leg number
    pub number: usize,
    pub starting_point: String,
    pub ending_point: String,
    pub steps: Vec<StepView>,
    pub distance_miles: String,
    pub travel_time: String,
}

impl SegmentView {
    /// Create from a domain Leg.
    pub fn from_leg(number: usize, leg: &Leg) -> Self {
        let steps = leg
            .route()
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| StepView {
                number: i + 1,
                instruction: step.instruction.clone(),
                distance_miles: format_miles(step.distance),
            })
            .collect();

        Self {
            number,
            starting_point: leg.start_address().to_string(),
            ending_point: leg.end_address().to_string(),
            steps,
            distance_miles: format_miles(leg.distance()),
            travel_time: format_duration(leg.duration()),
        }
    }

    /// e.g. "Segment #1"
    pub fn heading(&self) -> String {
        format!("Segment #{}", self.number)
    }
}

/// A numbered step row.
#[derive(Debug, Clone)]
pub struct StepView {
    pub number: usize,
    pub instruction: String,
    pub distance_miles: String,
}

impl StepView {
    /// e.g. "1. Turn left onto Main Street - 0.25 miles"
    pub fn line(&self) -> String {
        format!(
            "{}. {} - {} miles",
            self.number, self.instruction, self.distance_miles
        )
    }
}
