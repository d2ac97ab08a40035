//! Scenario tests for sequential itinerary resolution.

use std::time::Duration;

use proptest::prelude::*;

use super::*;
use crate::directions::{DirectionsRequest, MockDirectionsProvider};
use crate::domain::{Coordinate, ResolvedWaypoint, Route, WaypointStore};

fn coord(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon).unwrap()
}

fn des_moines() -> ResolvedWaypoint {
    ResolvedWaypoint::new("Des Moines, IA, United States", coord(41.5868, -93.625))
}

fn rochester() -> ResolvedWaypoint {
    ResolvedWaypoint::new("Rochester, MN, United States", coord(44.0121, -92.4802))
}

fn madison() -> ResolvedWaypoint {
    ResolvedWaypoint::new("Madison, WI, United States", coord(43.0731, -89.4012))
}

fn route(duration: f64) -> Route {
    Route::summary(duration, duration * 25.0)
}

/// Mock serving the closed triangle A -> B -> C -> A.
fn triangle_mock() -> MockDirectionsProvider {
    let (a, b, c) = (des_moines(), rochester(), madison());
    MockDirectionsProvider::new()
        .with_routes(a.point, b.point, vec![route(12_000.0), route(11_400.0)])
        .with_routes(b.point, c.point, vec![route(13_000.0)])
        .with_routes(c.point, a.point, vec![route(15_500.0), route(15_500.0), route(16_000.0)])
}

fn full_store() -> WaypointStore {
    let mut store = WaypointStore::new();
    store.update(0, des_moines().address, des_moines().point).unwrap();
    store.update(1, rochester().address, rochester().point).unwrap();
    store.update(2, madison().address, madison().point).unwrap();
    store
}

#[tokio::test]
async fn three_stop_trip_resolves_in_travel_order() {
    let mock = triangle_mock();
    let config = PlannerConfig::default();
    let store = full_store();

    let itinerary = submit_trip(&store, LegResolver::new(&mock, &config))
        .await
        .unwrap();

    let addresses: Vec<(&str, &str)> = itinerary
        .legs()
        .iter()
        .map(|l| (l.start_address(), l.end_address()))
        .collect();
    assert_eq!(
        addresses,
        vec![
            ("Des Moines, IA, United States", "Rochester, MN, United States"),
            ("Rochester, MN, United States", "Madison, WI, United States"),
            ("Madison, WI, United States", "Des Moines, IA, United States"),
        ]
    );

    let durations: Vec<f64> = itinerary.legs().iter().map(|l| l.duration()).collect();
    assert_eq!(durations, vec![11_400.0, 13_000.0, 15_500.0]);
    assert_eq!(itinerary.total_duration(), 11_400.0 + 13_000.0 + 15_500.0);

    let requested: Vec<(Coordinate, Coordinate)> = mock
        .requests()
        .iter()
        .map(|r| (r.origin, r.destination))
        .collect();
    assert_eq!(
        requested,
        vec![
            (des_moines().point, rochester().point),
            (rochester().point, madison().point),
            (madison().point, des_moines().point),
        ]
    );
}

#[tokio::test]
async fn start_and_second_stop_only() {
    let (a, c) = (des_moines(), madison());
    let mock = MockDirectionsProvider::new()
        .with_routes(a.point, c.point, vec![route(16_000.0)])
        .with_routes(c.point, a.point, vec![route(15_900.0)]);
    let config = PlannerConfig::default();

    let mut store = WaypointStore::new();
    store.update(0, a.address.clone(), a.point).unwrap();
    store.update(2, c.address.clone(), c.point).unwrap();

    let itinerary = submit_trip(&store, LegResolver::new(&mock, &config))
        .await
        .unwrap();

    assert_eq!(itinerary.leg_count(), 2);
    assert_eq!(itinerary.legs()[0].end_address(), c.address);
    assert_eq!(itinerary.legs()[1].end_address(), a.address);
    assert_eq!(itinerary.total_duration(), 31_900.0);
}

#[tokio::test]
async fn failure_on_second_leg_discards_everything() {
    let (a, b, c) = (des_moines(), rochester(), madison());
    let mock = MockDirectionsProvider::new()
        .with_routes(a.point, b.point, vec![route(100.0)])
        .with_failure(b.point, c.point, "upstream timeout")
        .with_routes(c.point, a.point, vec![route(100.0)]);
    let config = PlannerConfig::default();

    let mut aggregator = ItineraryAggregator::new(LegResolver::new(&mock, &config));
    let sequence = full_store().closed_round_trip().unwrap();

    let err = aggregator.resolve(&sequence).await.unwrap_err();

    assert!(matches!(
        err,
        PlanError::DirectionsUnavailable { leg_index: 1, .. }
    ));
    assert_eq!(err.user_message(), "Directions not available.");
    assert_eq!(aggregator.state(), ResolutionState::Failed);
    // The third leg is never requested.
    assert_eq!(mock.call_count(), 2);
}

#[tokio::test]
async fn missing_route_on_last_leg_fails() {
    let (a, b) = (des_moines(), rochester());
    let mock = MockDirectionsProvider::new().with_routes(a.point, b.point, vec![route(100.0)]);
    let config = PlannerConfig::default();

    let mut aggregator = ItineraryAggregator::new(LegResolver::new(&mock, &config));
    let err = aggregator.resolve(&[a.clone(), b, a]).await.unwrap_err();

    assert!(matches!(
        err,
        PlanError::DirectionsUnavailable { leg_index: 1, .. }
    ));
    assert_eq!(aggregator.state(), ResolutionState::Failed);
}

#[tokio::test]
async fn slow_first_leg_still_comes_first() {
    let (a, b, c) = (des_moines(), rochester(), madison());
    let mock = MockDirectionsProvider::new()
        .with_delayed_routes(a.point, b.point, vec![route(300.0)], Duration::from_millis(40))
        .with_routes(b.point, c.point, vec![route(200.0)])
        .with_delayed_routes(c.point, a.point, vec![route(100.0)], Duration::from_millis(10));
    let config = PlannerConfig::default();

    let itinerary = submit_trip(&full_store(), LegResolver::new(&mock, &config))
        .await
        .unwrap();

    let durations: Vec<f64> = itinerary.legs().iter().map(|l| l.duration()).collect();
    assert_eq!(durations, vec![300.0, 200.0, 100.0]);
    assert_eq!(mock.max_in_flight(), 1);
}

#[tokio::test]
async fn state_moves_from_idle_to_complete() {
    let mock = triangle_mock();
    let config = PlannerConfig::default();
    let mut aggregator = ItineraryAggregator::new(LegResolver::new(&mock, &config));

    assert_eq!(aggregator.state(), ResolutionState::Idle);

    let sequence = full_store().closed_round_trip().unwrap();
    aggregator.resolve(&sequence).await.unwrap();

    assert_eq!(aggregator.state(), ResolutionState::Complete);
}

#[tokio::test]
async fn short_sequence_is_rejected_without_requests() {
    let mock = triangle_mock();
    let config = PlannerConfig::default();
    let mut aggregator = ItineraryAggregator::new(LegResolver::new(&mock, &config));

    assert_eq!(
        aggregator.resolve(&[des_moines()]).await,
        Err(PlanError::InsufficientWaypoints)
    );
    assert_eq!(aggregator.resolve(&[]).await, Err(PlanError::InsufficientWaypoints));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn unready_store_is_rejected_without_requests() {
    let mock = triangle_mock();
    let config = PlannerConfig::default();

    let mut store = WaypointStore::new();
    store.update(0, des_moines().address, des_moines().point).unwrap();

    let result = submit_trip(&store, LegResolver::new(&mock, &config)).await;
    assert_eq!(result, Err(PlanError::InsufficientWaypoints));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn walking_mode_is_forwarded() {
    let mock = triangle_mock();
    let config = PlannerConfig::default().with_mode(crate::domain::TransportMode::Walking);

    submit_trip(&full_store(), LegResolver::new(&mock, &config))
        .await
        .unwrap();

    assert!(
        mock.requests()
            .iter()
            .all(|r: &DirectionsRequest| r.mode == crate::domain::TransportMode::Walking)
    );
}

#[tokio::test]
async fn total_is_sum_accumulated_in_leg_order() {
    let (a, b, c) = (des_moines(), rochester(), madison());
    let mock = MockDirectionsProvider::new()
        .with_routes(a.point, b.point, vec![route(0.1)])
        .with_routes(b.point, c.point, vec![route(0.2)])
        .with_routes(c.point, a.point, vec![route(0.3)]);
    let config = PlannerConfig::default();

    let itinerary = submit_trip(&full_store(), LegResolver::new(&mock, &config))
        .await
        .unwrap();

    let mut expected = 0.0;
    expected += 0.1;
    expected += 0.2;
    expected += 0.3;
    assert_eq!(itinerary.total_duration(), expected);
}

proptest! {
    #[test]
    fn total_matches_sequential_sum(durations in prop::collection::vec(0.0f64..100_000.0, 3)) {
        let (a, b, c) = (des_moines(), rochester(), madison());
        let mock = MockDirectionsProvider::new()
            .with_routes(a.point, b.point, vec![route(durations[0])])
            .with_routes(b.point, c.point, vec![route(durations[1])])
            .with_routes(c.point, a.point, vec![route(durations[2])]);
        let config = PlannerConfig::default();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let itinerary = runtime
            .block_on(submit_trip(&full_store(), LegResolver::new(&mock, &config)))
            .unwrap();

        let mut expected = 0.0;
        for d in &durations {
            expected += d;
        }
        prop_assert_eq!(itinerary.total_duration(), expected);
        prop_assert_eq!(itinerary.leg_count(), 3);
        prop_assert!(itinerary.is_round_trip());
    }
}
