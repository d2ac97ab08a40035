//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post, put},
};
use serde::de::DeserializeOwned;
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

use crate::domain::{Coordinate, DomainError, InvalidCoordinate, Itinerary, WaypointStore};
use crate::geocoding::GeocodingError;
use crate::planner::PlanError;

use super::dto::*;
use super::sessions::{SessionError, SessionId};
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/geocode", get(geocode))
        .route("/geocode/reverse", get(reverse_geocode))
        .route("/trips", post(create_trip))
        .route("/trips/:id", get(get_trip).delete(delete_trip))
        .route(
            "/trips/:id/waypoints/:index",
            put(update_waypoint).delete(clear_waypoint),
        )
        .route("/trips/:id/swap", post(swap_waypoints))
        .route("/trips/:id/plan", post(plan_trip))
        .route("/trip/plan", post(plan_trip_inline))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found_page)
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the trip form.
async fn index_page() -> impl IntoResponse {
    Html(
        IndexTemplate::empty()
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Page for unknown paths.
async fn not_found_page() -> impl IntoResponse {
    let page = ErrorTemplate {
        title: "Not found".to_string(),
        message: "There is nothing at this address.".to_string(),
        details: None,
    };
    (
        StatusCode::NOT_FOUND,
        Html(
            page.render()
                .unwrap_or_else(|e| format!("Template error: {}", e)),
        ),
    )
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Parse a JSON body, logging it on failure.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "invalid JSON body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

fn render<T: Template>(template: &T) -> Result<Response, AppError> {
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html).into_response())
}

/// Forward geocoding: candidates for free-text input.
///
/// Candidates follow the `Accept` header. Failures are always a JSON
/// [`ErrorResponse`], as for every other endpoint.
async fn geocode(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<GeocodeQuery>,
) -> Result<Response, AppError> {
    let placemarks = state.geocoder.geocode(&req.q).await?;

    if accepts_html(&headers) {
        render(&CandidatesTemplate {
            slot: req.slot.unwrap_or(0),
            candidates: placemarks.iter().map(CandidateView::from_placemark).collect(),
        })
    } else {
        let candidates = placemarks
            .iter()
            .map(PlacemarkResult::from_placemark)
            .collect();
        Ok(Json(GeocodeResponse { candidates }).into_response())
    }
}

/// Reverse geocoding: addresses at the caller's position.
async fn reverse_geocode(
    State(state): State<AppState>,
    Query(req): Query<ReverseGeocodeQuery>,
) -> Result<Json<GeocodeResponse>, AppError> {
    let point = Coordinate::new(req.lat, req.lon)?;
    let placemarks = state.geocoder.reverse(point).await?;

    Ok(Json(GeocodeResponse {
        candidates: placemarks
            .iter()
            .map(PlacemarkResult::from_placemark)
            .collect(),
    }))
}

/// Start a new trip with an empty waypoint store.
async fn create_trip(State(state): State<AppState>) -> impl IntoResponse {
    let id = state.sessions.create().await;
    info!(trip = id, "trip created");
    (StatusCode::CREATED, Json(CreateTripResponse { id }))
}

/// Current slots of a trip.
async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<TripResponse>, AppError> {
    let store = state.sessions.snapshot(id).await?;
    Ok(Json(TripResponse::from_store(id, &store)))
}

/// Discard a trip.
async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Set a slot to a confirmed location.
async fn update_waypoint(
    State(state): State<AppState>,
    Path((id, index)): Path<(SessionId, usize)>,
    body: Bytes,
) -> Result<Json<TripResponse>, AppError> {
    let input: WaypointInput = parse_body(&body)?;
    let waypoint = input.to_resolved()?;

    let store = state
        .sessions
        .modify(id, |s| s.update(index, waypoint.address, waypoint.point))
        .await?;

    Ok(Json(TripResponse::from_store(id, &store)))
}

/// Reset a slot to unresolved.
async fn clear_waypoint(
    State(state): State<AppState>,
    Path((id, index)): Path<(SessionId, usize)>,
) -> Result<Json<TripResponse>, AppError> {
    let store = state.sessions.modify(id, |s| s.clear(index)).await?;
    Ok(Json(TripResponse::from_store(id, &store)))
}

/// Exchange two slots. An empty body swaps the two stops.
async fn swap_waypoints(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    body: Bytes,
) -> Result<Json<TripResponse>, AppError> {
    let req = if body.iter().all(u8::is_ascii_whitespace) {
        SwapRequest::default()
    } else {
        parse_body(&body)?
    };

    let store = state
        .sessions
        .modify(id, |s| s.swap(req.first, req.second))
        .await?;

    Ok(Json(TripResponse::from_store(id, &store)))
}

/// Plan the round trip of a session.
///
/// The store is snapshotted when the request arrives; edits made while the
/// legs are being resolved do not affect this plan.
async fn plan_trip(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<SessionId>,
) -> Result<Response, AppError> {
    let store = state.sessions.snapshot(id).await?;
    plan_and_respond(&state, &headers, &store).await
}

/// Plan a round trip from slots supplied in the request.
async fn plan_trip_inline(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let req: PlanTripRequest = parse_body(&body)?;
    let store = req.to_store()?;
    plan_and_respond(&state, &headers, &store).await
}

async fn plan_and_respond(
    state: &AppState,
    headers: &HeaderMap,
    store: &WaypointStore,
) -> Result<Response, AppError> {
    let itinerary = state.planner.plan(store).await?;
    itinerary_response(headers, &itinerary)
}

fn itinerary_response(headers: &HeaderMap, itinerary: &Itinerary) -> Result<Response, AppError> {
    if accepts_html(headers) {
        render(&ItineraryTemplate {
            itinerary: ItineraryView::from_itinerary(itinerary),
        })
    } else {
        Ok(Json(ItineraryResult::from_itinerary(itinerary)).into_response())
    }
}

/// Application error type.
///
/// Rendered as a JSON [`ErrorResponse`] regardless of the request's
/// `Accept` header, so the client reads one error shape everywhere.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unprocessable { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        let message = e.user_message().to_string();
        match e {
            PlanError::InsufficientWaypoints => AppError::Unprocessable { message },
            PlanError::DirectionsUnavailable { .. } => {
                warn!(error = %e, "planning failed");
                AppError::BadGateway { message }
            }
            PlanError::InvalidItinerary(_) => {
                error!(error = %e, "planning produced an invalid itinerary");
                AppError::Internal { message }
            }
        }
    }
}

impl From<GeocodingError> for AppError {
    fn from(e: GeocodingError) -> Self {
        let message = "Address not found...".to_string();
        match e {
            GeocodingError::NoMatches => AppError::NotFound { message },
            GeocodingError::EmptyQuery => AppError::BadRequest { message },
            other => {
                warn!(error = %other, "geocoding failed");
                AppError::BadGateway { message }
            }
        }
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::NotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            SessionError::Domain(d) => d.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::SlotOutOfRange { .. } => AppError::BadRequest {
                message: e.to_string(),
            },
            DomainError::InsufficientWaypoints => PlanError::InsufficientWaypoints.into(),
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<InvalidCoordinate> for AppError {
    fn from(e: InvalidCoordinate) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
