//! Time utilities: rendering durations and epoch-millisecond instants.

use crate::core::clock::Millis;
use chrono::{Local, TimeZone};

/// Render a duration as `HH:MM:SS`, truncating to whole seconds.
/// Hours are not wrapped at 24.
pub fn format_hms(millis: Millis) -> String {
    let seconds = millis.max(0) / 1000;
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds / 60) % 60,
        seconds % 60
    )
}

/// Render an epoch-millisecond instant in local time using a chrono
/// format string. Out-of-range values are shown raw.
pub fn format_instant(millis: Millis, fmt: &str) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format(fmt).to_string(),
        None => millis.to_string(),
    }
}

/// RFC 3339 rendering in local time, used for exports.
pub fn instant_rfc3339(millis: Millis) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.to_rfc3339(),
        None => millis.to_string(),
    }
}
