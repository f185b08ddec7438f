pub mod client;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{FetchError, FetchGateway, HttpGateway};
pub use types::{SimulationOutcome, Snapshot, StatsSummary, Transaction, TransactionId};
