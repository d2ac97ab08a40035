//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{
    Coordinate, Itinerary, Leg, ResolvedWaypoint, RouteStep, Waypoint, WaypointSlot,
    WaypointStore, format_duration, format_miles,
};
use crate::geocoding::Placemark;

use super::sessions::SessionId;

/// Forward geocoding query.
#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    /// Free-text address
    pub q: String,

    /// Slot the candidates are for (echoed into the HTML list)
    pub slot: Option<usize>,
}

/// Reverse geocoding query.
#[derive(Debug, Deserialize)]
pub struct ReverseGeocodeQuery {
    pub lat: f64,
    pub lon: f64,
}

/// A candidate location.
#[derive(Debug, Serialize)]
pub struct PlacemarkResult {
    /// Address lines joined with ", "
    pub address: String,

    /// Individual address lines
    pub address_lines: Vec<String>,

    pub lat: f64,
    pub lon: f64,
}

/// Response for geocoding.
#[derive(Debug, Serialize)]
pub struct GeocodeResponse {
    /// Candidates, best match first
    pub candidates: Vec<PlacemarkResult>,
}

/// Response for session creation.
#[derive(Debug, Serialize)]
pub struct CreateTripResponse {
    pub id: SessionId,
}

/// One slot of a trip.
#[derive(Debug, Serialize)]
pub struct WaypointResult {
    /// Slot index (0 = start/end)
    pub slot: usize,

    /// Label shown next to the input
    pub label: String,

    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,

    /// Whether the slot has a confirmed location
    pub resolved: bool,
}

/// Current state of a trip session.
#[derive(Debug, Serialize)]
pub struct TripResponse {
    pub id: SessionId,
    pub waypoints: Vec<WaypointResult>,

    /// Whether the trip can be planned
    pub ready: bool,
}

/// A waypoint supplied by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct WaypointInput {
    /// Address label; the coordinate is used if absent
    pub address: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

impl WaypointInput {
    /// Validate into a resolved waypoint.
    pub fn to_resolved(&self) -> Result<ResolvedWaypoint, crate::domain::InvalidCoordinate> {
        let point = Coordinate::new(self.lat, self.lon)?;
        let address = self
            .address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| point.to_string());
        Ok(ResolvedWaypoint::new(address, point))
    }
}

/// Request to swap two slots. Defaults to the two stops.
#[derive(Debug, Deserialize)]
pub struct SwapRequest {
    #[serde(default = "default_swap_first")]
    pub first: usize,

    #[serde(default = "default_swap_second")]
    pub second: usize,
}

fn default_swap_first() -> usize {
    WaypointSlot::FirstStop.index()
}

fn default_swap_second() -> usize {
    WaypointSlot::SecondStop.index()
}

impl Default for SwapRequest {
    fn default() -> Self {
        Self {
            first: default_swap_first(),
            second: default_swap_second(),
        }
    }
}

/// Stateless plan request with the three slots inline.
#[derive(Debug, Default, Deserialize)]
pub struct PlanTripRequest {
    pub start: Option<WaypointInput>,
    pub first_stop: Option<WaypointInput>,
    pub second_stop: Option<WaypointInput>,
}

/// A step within a leg.
#[derive(Debug, Serialize)]
pub struct StepResult {
    pub instruction: String,
    pub distance_meters: f64,
    pub distance_miles: String,
}

/// A leg of the itinerary.
#[derive(Debug, Serialize)]
pub struct LegResult {
    pub start_address: String,
    pub end_address: String,

    /// Expected travel time in seconds
    pub duration_secs: f64,

    /// Travel time in words, e.g. "1 hour, 5 minutes"
    pub duration_display: String,

    pub distance_meters: f64,
    pub distance_miles: String,

    pub steps: Vec<StepResult>,

    /// Route geometry as `[lon, lat]` pairs
    pub polyline: Vec<[f64; 2]>,
}

/// Response for trip planning.
#[derive(Debug, Serialize)]
pub struct ItineraryResult {
    pub legs: Vec<LegResult>,
    pub total_duration_secs: f64,
    pub total_duration_display: String,
    pub total_distance_meters: f64,
    pub total_distance_miles: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl PlacemarkResult {
    /// Create from a geocoding placemark.
    pub fn from_placemark(placemark: &Placemark) -> Self {
        Self {
            address: placemark.formatted_address(),
            address_lines: placemark.address_lines.clone(),
            lat: placemark.coordinate.lat(),
            lon: placemark.coordinate.lon(),
        }
    }
}

impl WaypointResult {
    /// Create from a store slot.
    pub fn from_waypoint(slot: WaypointSlot, waypoint: &Waypoint) -> Self {
        Self {
            slot: slot.index(),
            label: slot.label().to_string(),
            address: waypoint.address.clone(),
            lat: waypoint.point.map(|p| p.lat()),
            lon: waypoint.point.map(|p| p.lon()),
            resolved: waypoint.is_resolved(),
        }
    }
}

impl TripResponse {
    /// Create from a session's store.
    pub fn from_store(id: SessionId, store: &WaypointStore) -> Self {
        let waypoints = WaypointSlot::ALL
            .iter()
            .zip(store.slots())
            .map(|(slot, waypoint)| WaypointResult::from_waypoint(*slot, waypoint))
            .collect();

        Self {
            id,
            waypoints,
            ready: store.is_ready_for_trip(),
        }
    }
}

impl PlanTripRequest {
    /// Build a store from the inline slots.
    pub fn to_store(&self) -> Result<WaypointStore, crate::domain::InvalidCoordinate> {
        let slot = |input: &Option<WaypointInput>| -> Result<Waypoint, _> {
            input
                .as_ref()
                .map(|i| i.to_resolved().map(Waypoint::from))
                .transpose()
                .map(Option::unwrap_or_default)
        };

        Ok(WaypointStore::from_slots([
            slot(&self.start)?,
            slot(&self.first_stop)?,
            slot(&self.second_stop)?,
        ]))
    }
}

impl StepResult {
    /// Create from a route step.
    pub fn from_step(step: &RouteStep) -> Self {
        Self {
            instruction: step.instruction.clone(),
            distance_meters: step.distance,
            distance_miles: format_miles(step.distance),
        }
    }
}

impl LegResult {
    /// Create from a domain Leg.
    pub fn from_leg(leg: &Leg) -> Self {
        let route = leg.route();
        Self {
            start_address: leg.start_address().to_string(),
            end_address: leg.end_address().to_string(),
            duration_secs: leg.duration(),
            duration_display: format_duration(leg.duration()),
            distance_meters: leg.distance(),
            distance_miles: format_miles(leg.distance()),
            steps: route.steps.iter().map(StepResult::from_step).collect(),
            polyline: route.polyline.coords().map(|c| [c.x, c.y]).collect(),
        }
    }
}

impl ItineraryResult {
    /// Create from a domain Itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            legs: itinerary.legs().iter().map(LegResult::from_leg).collect(),
            total_duration_secs: itinerary.total_duration(),
            total_duration_display: format_duration(itinerary.total_duration()),
            total_distance_meters: itinerary.total_distance(),
            total_distance_miles: format_miles(itinerary.total_distance()),
        }
    }
}
