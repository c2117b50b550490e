use serde::Serialize;

use crate::core::clock::Millis;
use crate::core::timelog::TimeLog;
use crate::utils::time::instant_rfc3339;

/// Flat, one-row-per-interval view of a timepiece for export.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct IntervalExport {
    pub timepiece_id: u64,
    pub name: String,
    pub interval: usize,
    pub start_ms: Millis,
    pub stop_ms: Option<Millis>,
    pub start: String,
    pub stop: String,
    pub duration_ms: Millis,
    pub running: bool,
}

pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "timepiece_id",
        "name",
        "interval",
        "start_ms",
        "stop_ms",
        "start",
        "stop",
        "duration_ms",
        "running",
    ]
}

pub(crate) fn to_row(e: &IntervalExport) -> Vec<String> {
    vec![
        e.timepiece_id.to_string(),
        e.name.clone(),
        e.interval.to_string(),
        e.start_ms.to_string(),
        e.stop_ms.map(|s| s.to_string()).unwrap_or_default(),
        e.start.clone(),
        e.stop.clone(),
        e.duration_ms.to_string(),
        e.running.to_string(),
    ]
}

/// Intervals of `log`, open ones measured up to the log's current time.
pub fn rows_for(log: &TimeLog) -> Vec<IntervalExport> {
    let now = log.now();
    log.intervals()
        .iter()
        .enumerate()
        .map(|(i, iv)| IntervalExport {
            timepiece_id: log.id(),
            name: log.name().to_string(),
            interval: i + 1,
            start_ms: iv.start,
            stop_ms: iv.stop,
            start: instant_rfc3339(iv.start),
            stop: iv.stop.map(instant_rfc3339).unwrap_or_default(),
            duration_ms: iv.duration(now),
            running: iv.is_open(),
        })
        .collect()
}
