use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Backend identifier for a transaction. The scoring API emits integers,
/// older exports emit strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TransactionId {
    Int(i64),
    Text(String),
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A scored transaction as returned by `GET /transactions`.
///
/// Optional fields stay optional here; fallback labels are resolved by the
/// projector, not during decoding.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub reviewed: bool,
}

/// Severity levels shown as summary counters, in display order.
pub const SEVERITY_LEVELS: [&str; 4] = ["CRITICAL", "HIGH", "MEDIUM", "LOW"];

/// Counts per severity label from `GET /stats`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct StatsSummary {
    pub counts: HashMap<String, u64>,
}

impl StatsSummary {
    /// Count for a level; missing keys are zero.
    pub fn count(&self, level: &str) -> u64 {
        self.counts.get(level).copied().unwrap_or(0)
    }
}

/// Response of `POST /simulate`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationOutcome {
    pub added: u64,
    #[serde(default)]
    pub message: Option<String>,
}

/// Immutable transaction sequence captured by one poll cycle.
pub type Snapshot = std::sync::Arc<[Transaction]>;

#[cfg(test)]
pub(crate) fn sample_tx(id: i64, score: f64, location: Option<&str>, category: Option<&str>) -> Transaction {
    Transaction {
        id: TransactionId::Int(id),
        timestamp: "2023-10-27 18:00:00".to_string(),
        amount: 1500.0,
        score,
        level: Some(if score > 70.0 { "CRITICAL" } else { "LOW" }.to_string()),
        reason: Some("Amount > 3x Avg".to_string()),
        location: location.map(str::to_string),
        category: category.map(str::to_string),
        reviewed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_transaction_with_missing_optionals() {
        let json = r#"{"id": 42, "timestamp": "2024-01-01 10:00:00", "amount": 15000.0,
                       "score": 85.0, "level": "CRITICAL", "reason": "Amount > 3x Avg"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.id, TransactionId::Int(42));
        assert_eq!(tx.location, None);
        assert_eq!(tx.category, None);
        assert!(!tx.reviewed);
    }

    #[test]
    fn test_decode_string_id_and_null_location() {
        let json = r#"{"id": "TX-9", "timestamp": "t", "amount": 1, "score": 2,
                       "level": "LOW", "reason": "", "location": null, "reviewed": true}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.id.to_string(), "TX-9");
        assert_eq!(tx.location, None);
        assert!(tx.reviewed);
    }

    #[test]
    fn test_stats_missing_levels_default_to_zero() {
        let stats: StatsSummary = serde_json::from_str(r#"{"CRITICAL": 2, "HIGH": 5}"#).unwrap();
        assert_eq!(stats.count("CRITICAL"), 2);
        assert_eq!(stats.count("HIGH"), 5);
        assert_eq!(stats.count("MEDIUM"), 0);
        assert_eq!(stats.count("LOW"), 0);
    }
}
