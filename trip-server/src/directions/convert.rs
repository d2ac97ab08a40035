//! Conversion from OSRM DTOs to domain routes.
//!
//! OSRM returns maneuvers (type + modifier + road name) rather than
//! display text, so step instructions are composed here.

use geo_types::{Coord, LineString};
use tracing::warn;

use crate::domain::{Route, RouteStep};

use super::error::DirectionsError;
use super::types::{OsrmRoute, OsrmRouteResponse, OsrmStep};

/// Convert a route response into candidate routes, preserving order.
///
/// A non-"Ok" response code is mapped to an error. "NoRoute" and
/// "NoSegment" (a point could not be snapped to the network) both mean no
/// usable route exists.
pub fn convert_route_response(
    response: &OsrmRouteResponse,
) -> Result<Vec<Route>, DirectionsError> {
    match response.code.as_str() {
        "Ok" => {}
        "NoRoute" | "NoSegment" => return Err(DirectionsError::NoRoute),
        code => {
            return Err(DirectionsError::Api {
                status: 0,
                message: format!(
                    "{code}: {}",
                    response.message.as_deref().unwrap_or("no message")
                ),
            });
        }
    }

    Ok(response.routes.iter().filter_map(convert_route).collect())
}

/// Convert a single OSRM route.
///
/// Routes with a non-finite or negative duration are dropped so they can
/// never win the fastest-route selection.
pub fn convert_route(route: &OsrmRoute) -> Option<Route> {
    if !route.duration.is_finite() || route.duration < 0.0 {
        warn!(duration = route.duration, "skipping route with invalid duration");
        return None;
    }

    let polyline = route
        .geometry
        .as_ref()
        .map(|g| {
            g.coordinates
                .iter()
                .map(|[x, y]| Coord { x: *x, y: *y })
                .collect::<LineString<f64>>()
        })
        .unwrap_or_else(|| LineString::new(Vec::new()));

    let steps = route
        .legs
        .iter()
        .flat_map(|leg| leg.steps.iter())
        .map(|step| RouteStep::new(step_instruction(step), step.distance))
        .collect();

    Some(Route {
        expected_duration: route.duration,
        distance: route.distance,
        polyline,
        steps,
    })
}

/// Compose display text for a step.
pub fn step_instruction(step: &OsrmStep) -> String {
    let road = road_label(step);
    let onto = road
        .as_deref()
        .map(|r| format!(" onto {r}"))
        .unwrap_or_default();
    let modifier = step.maneuver.modifier.as_deref();

    match step.maneuver.kind.as_str() {
        "depart" => {
            let heading = compass_direction(step.maneuver.bearing_after);
            match road {
                Some(r) => format!("Head {heading} on {r}"),
                None => format!("Head {heading}"),
            }
        }
        "arrive" => match modifier {
            Some(side @ ("left" | "right")) => {
                format!("Arrive at destination, on the {side}")
            }
            _ => "Arrive at destination".to_string(),
        },
        "turn" => match modifier {
            Some("uturn") => format!("Make a U-turn{onto}"),
            Some("straight") => format!("Continue straight{onto}"),
            Some(m) => format!("Turn {m}{onto}"),
            None => format!("Turn{onto}"),
        },
        "new name" | "continue" => match modifier {
            Some("uturn") => format!("Make a U-turn{onto}"),
            Some(m) if m != "straight" => format!("Continue {m}{onto}"),
            _ => format!("Continue{onto}"),
        },
        "merge" => match modifier {
            Some(m) => format!("Merge {m}{onto}"),
            None => format!("Merge{onto}"),
        },
        "on ramp" => match modifier {
            Some(m) => format!("Take the ramp on the {}{onto}", side_of(m)),
            None => format!("Take the ramp{onto}"),
        },
        "off ramp" => match modifier {
            Some(m) => format!("Take the exit on the {}{onto}", side_of(m)),
            None => format!("Take the exit{onto}"),
        },
        "fork" => match modifier {
            Some(m) => format!("Keep {} at the fork{onto}", side_of(m)),
            None => format!("Keep at the fork{onto}"),
        },
        "end of road" => match modifier {
            Some(m) => format!("Turn {m} at the end of the road{onto}"),
            None => format!("Continue at the end of the road{onto}"),
        },
        "roundabout" | "rotary" => {
            let name = if step.maneuver.kind == "rotary" {
                step.rotary_name.as_deref().unwrap_or("the rotary")
            } else {
                "the roundabout"
            };
            match step.maneuver.exit {
                Some(n) => format!("Enter {name} and take the {} exit{onto}", ordinal(n)),
                None => format!("Enter {name}{onto}"),
            }
        }
        "exit roundabout" | "exit rotary" => format!("Exit the roundabout{onto}"),
        _ => format!("Continue{onto}"),
    }
}

/// Road name, else the road reference, else nothing.
fn road_label(step: &OsrmStep) -> Option<String> {
    let name = step.name.trim();
    if !name.is_empty() {
        return Some(name.to_string());
    }
    step.road_ref
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
}

/// "slight left" -> "left", "sharp right" -> "right".
fn side_of(modifier: &str) -> &str {
    if modifier.ends_with("left") {
        "left"
    } else if modifier.ends_with("right") {
        "right"
    } else {
        modifier
    }
}

fn compass_direction(bearing: u16) -> &'static str {
    const DIRECTIONS: [&str; 8] = [
        "north",
        "northeast",
        "east",
        "southeast",
        "south",
        "southwest",
        "west",
        "northwest",
    ];
    let sector = ((u32::from(bearing % 360) * 2 + 45) / 90) % 8;
    DIRECTIONS[sector as usize]
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directions::types::{OsrmGeometry, OsrmLeg, OsrmManeuver};

    fn step(kind: &str, modifier: Option<&str>, name: &str) -> OsrmStep {
        OsrmStep {
            distance: 100.0,
            duration: 10.0,
            name: name.to_string(),
            road_ref: None,
            rotary_name: None,
            maneuver: OsrmManeuver {
                kind: kind.to_string(),
                modifier: modifier.map(str::to_string),
                bearing_after: 0,
                exit: None,
            },
        }
    }

    fn route(duration: f64) -> OsrmRoute {
        OsrmRoute {
            duration,
            distance: duration * 20.0,
            geometry: Some(OsrmGeometry {
                kind: "LineString".into(),
                coordinates: vec![[-93.6, 41.6], [-92.5, 44.0]],
            }),
            legs: vec![OsrmLeg {
                steps: vec![
                    step("depart", None, "Locust Street"),
                    step("arrive", Some("right"), ""),
                ],
            }],
        }
    }

    #[test]
    fn instructions() {
        assert_eq!(
            step_instruction(&step("depart", None, "Locust Street")),
            "Head north on Locust Street"
        );
        assert_eq!(
            step_instruction(&step("turn", Some("left"), "Main Street")),
            "Turn left onto Main Street"
        );
        assert_eq!(
            step_instruction(&step("turn", Some("slight right"), "")),
            "Turn slight right"
        );
        assert_eq!(
            step_instruction(&step("turn", Some("uturn"), "Elm")),
            "Make a U-turn onto Elm"
        );
        assert_eq!(
            step_instruction(&step("new name", Some("straight"), "US 52")),
            "Continue onto US 52"
        );
        assert_eq!(
            step_instruction(&step("off ramp", Some("slight right"), "Exit 42")),
            "Take the exit on the right onto Exit 42"
        );
        assert_eq!(
            step_instruction(&step("fork", Some("slight left"), "I 35 North")),
            "Keep left at the fork onto I 35 North"
        );
        assert_eq!(
            step_instruction(&step("end of road", Some("right"), "Broadway")),
            "Turn right at the end of the road onto Broadway"
        );
        assert_eq!(
            step_instruction(&step("arrive", Some("left"), "")),
            "Arrive at destination, on the left"
        );
        assert_eq!(
            step_instruction(&step("arrive", None, "")),
            "Arrive at destination"
        );
    }

    #[test]
    fn roundabout_exit_ordinal() {
        let mut s = step("roundabout", Some("right"), "Grand Avenue");
        s.maneuver.exit = Some(2);
        assert_eq!(
            step_instruction(&s),
            "Enter the roundabout and take the 2nd exit onto Grand Avenue"
        );
        s.maneuver.exit = Some(11);
        assert!(step_instruction(&s).contains("11th exit"));
    }

    #[test]
    fn falls_back_to_road_ref() {
        let mut s = step("merge", Some("left"), "");
        s.road_ref = Some("I 80".into());
        assert_eq!(step_instruction(&s), "Merge left onto I 80");
    }

    #[test]
    fn compass() {
        assert_eq!(compass_direction(0), "north");
        assert_eq!(compass_direction(44), "northeast");
        assert_eq!(compass_direction(90), "east");
        assert_eq!(compass_direction(200), "south");
        assert_eq!(compass_direction(337), "northwest");
        assert_eq!(compass_direction(350), "north");
    }

    #[test]
    fn convert_ok_response_preserves_order() {
        let response = OsrmRouteResponse {
            code: "Ok".into(),
            message: None,
            routes: vec![route(600.0), route(540.0)],
        };
        let routes = convert_route_response(&response).unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].expected_duration, 600.0);
        assert_eq!(routes[1].expected_duration, 540.0);
        assert_eq!(routes[0].polyline.0.len(), 2);
        assert_eq!(routes[0].polyline.0[0].x, -93.6);
        assert_eq!(routes[0].steps.len(), 2);
        assert_eq!(routes[0].steps[1].instruction, "Arrive at destination, on the right");
    }

    #[test]
    fn convert_no_route() {
        let response = OsrmRouteResponse {
            code: "NoRoute".into(),
            message: Some("Impossible route between points".into()),
            routes: vec![],
        };
        assert!(matches!(
            convert_route_response(&response),
            Err(DirectionsError::NoRoute)
        ));
    }

    #[test]
    fn convert_other_code_is_api_error() {
        let response = OsrmRouteResponse {
            code: "InvalidQuery".into(),
            message: Some("Query string malformed".into()),
            routes: vec![],
        };
        match convert_route_response(&response) {
            Err(DirectionsError::Api { message, .. }) => {
                assert_eq!(message, "InvalidQuery: Query string malformed");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn drops_invalid_duration() {
        let response = OsrmRouteResponse {
            code: "Ok".into(),
            message: None,
            routes: vec![route(f64::NAN), route(-1.0), route(30.0)],
        };
        let routes = convert_route_response(&response).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].expected_duration, 30.0);
    }

    #[test]
    fn parses_osrm_json() {
        let json = r#"{
            "code": "Ok",
            "routes": [{
                "duration": 7342.1,
                "distance": 215432.5,
                "geometry": {"type": "LineString", "coordinates": [[-93.62, 41.59], [-92.48, 44.01]]},
                "legs": [{"steps": [
                    {"distance": 120.3, "duration": 15.2, "name": "Locust Street",
                     "maneuver": {"type": "depart", "bearing_after": 92, "location": [-93.62, 41.59]}},
                    {"distance": 0, "duration": 0, "name": "",
                     "maneuver": {"type": "arrive", "bearing_after": 0, "location": [-92.48, 44.01]}}
                ]}]
            }],
            "waypoints": []
        }"#;
        let response: OsrmRouteResponse = serde_json::from_str(json).unwrap();
        let routes = convert_route_response(&response).unwrap();
        assert_eq!(routes[0].expected_duration, 7342.1);
        assert_eq!(routes[0].steps[0].instruction, "Head east on Locust Street");
    }
}
