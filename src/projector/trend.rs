use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::gateway::types::Transaction;

const TIME_LABEL_FORMAT: &str = "%-I:%M:%S %p";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub label: String,
    pub score: f64,
}

/// Time-of-day label for a backend timestamp.
///
/// Accepts RFC 3339 (shown in local time), naive `YYYY-MM-DD[T ]HH:MM[:SS[.f]]`
/// and a bare `YYYY-MM-DD` (midnight). Anything else is returned verbatim.
pub fn time_label(timestamp: &str) -> String {
    let normalized = timestamp.trim().replacen(' ', "T", 1);

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return dt.with_timezone(&Local).format(TIME_LABEL_FORMAT).to_string();
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, pattern) {
            return naive.format(TIME_LABEL_FORMAT).to_string();
        }
    }

    if let Some(midnight) = NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return midnight.format(TIME_LABEL_FORMAT).to_string();
    }

    timestamp.to_string()
}

/// The most recent `points` records, oldest first, labelled by time of day.
pub fn trend_series(snapshot: &[Transaction], points: usize) -> Vec<TrendPoint> {
    let newest = &snapshot[..snapshot.len().min(points)];
    newest
        .iter()
        .rev()
        .map(|tx| TrendPoint {
            label: time_label(&tx.timestamp),
            score: tx.score,
        })
        .collect()
}
