pub mod aggregate;
pub mod search;
pub mod trend;

use crate::gateway::types::Transaction;

pub use aggregate::{aggregate_by_category, aggregate_by_location, Buckets};
pub use search::{project_searchable, SearchView};
pub use trend::{trend_series, TrendPoint};

pub const UNKNOWN_LOCATION: &str = "Unknown";
pub const UNCATEGORIZED: &str = "Uncategorized";
pub const NOT_AVAILABLE: &str = "N/A";

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Location label used for display and grouping.
pub fn location_label(tx: &Transaction) -> &str {
    present(tx.location.as_deref()).unwrap_or(UNKNOWN_LOCATION)
}

/// Category label used as an aggregation bucket.
pub fn category_bucket(tx: &Transaction) -> &str {
    present(tx.category.as_deref()).unwrap_or(UNCATEGORIZED)
}

/// Category label shown in a table cell.
pub fn category_cell(tx: &Transaction) -> &str {
    present(tx.category.as_deref()).unwrap_or(NOT_AVAILABLE)
}

/// Severity label shown in the badge.
pub fn level_label(tx: &Transaction) -> &str {
    present(tx.level.as_deref()).unwrap_or(NOT_AVAILABLE)
}

pub fn reason_text(tx: &Transaction) -> &str {
    tx.reason.as_deref().unwrap_or("")
}

/// CSS class for a severity badge. The level is lower-cased and anything
/// outside `[a-z0-9_-]` becomes `-`, so it is always a valid class token.
pub fn badge_class(tx: &Transaction) -> String {
    let fragment: String = level_label(tx)
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();
    format!("badge-{}", fragment)
}

/// Dashboard table input: the first `n` records in snapshot order.
pub fn top_n(snapshot: &[Transaction], n: usize) -> &[Transaction] {
    &snapshot[..snapshot.len().min(n)]
}

/// Alert feed input: records scoring strictly above `threshold`.
pub fn alerts(snapshot: &[Transaction], threshold: f64) -> Vec<&Transaction> {
    snapshot.iter().filter(|tx| tx.score > threshold).collect()
}
