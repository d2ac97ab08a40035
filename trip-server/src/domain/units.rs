//! Display formatting for durations and distances.

/// Meters per statute mile.
pub const METERS_PER_MILE: f64 = 1609.344;

/// Formats a duration in seconds with full unit names.
///
/// Hours, minutes and seconds are shown; zero-valued units are omitted.
/// Fractional seconds are rounded to the nearest second.
///
/// ```
/// use trip_server::domain::format_duration;
///
/// assert_eq!(format_duration(3903.0), "1 hour, 5 minutes, 3 seconds");
/// assert_eq!(format_duration(7200.0), "2 hours");
/// assert_eq!(format_duration(0.0), "0 seconds");
/// ```
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.round() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    let mut parts = Vec::with_capacity(3);
    if hours > 0 {
        parts.push(plural(hours, "hour"));
    }
    if minutes > 0 {
        parts.push(plural(minutes, "minute"));
    }
    if secs > 0 {
        parts.push(plural(secs, "second"));
    }

    if parts.is_empty() {
        return "0 seconds".to_string();
    }
    parts.join(", ")
}

fn plural(n: u64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// Formats meters as miles with two decimals.
///
/// ```
/// use trip_server::domain::format_miles;
///
/// assert_eq!(format_miles(1609.344), "1.00");
/// ```
pub fn format_miles(meters: f64) -> String {
    format!("{:.2}", meters / METERS_PER_MILE)
}
