use futures::future::BoxFuture;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::client::{FetchError, FetchGateway};
use super::types::{SimulationOutcome, StatsSummary, Transaction};

/// Scripted response for one `fetch_transactions` call.
pub struct ScriptedBatch {
    pub delay: Duration,
    pub transactions: Vec<Transaction>,
}

/// Scripted in-memory gateway for tests.
#[derive(Default)]
pub struct FakeGateway {
    pub stats: Mutex<StatsSummary>,
    pub fail_summary: Mutex<bool>,
    pub fail_simulation: Mutex<bool>,
    batches: Mutex<VecDeque<ScriptedBatch>>,
    summary_calls: AtomicUsize,
    transaction_calls: AtomicUsize,
    simulation_calls: AtomicUsize,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_batch(&self, delay: Duration, transactions: Vec<Transaction>) {
        self.batches.lock().unwrap().push_back(ScriptedBatch {
            delay,
            transactions,
        });
    }

    pub fn summary_calls(&self) -> usize {
        self.summary_calls.load(Ordering::SeqCst)
    }

    pub fn transaction_calls(&self) -> usize {
        self.transaction_calls.load(Ordering::SeqCst)
    }

    pub fn simulation_calls(&self) -> usize {
        self.simulation_calls.load(Ordering::SeqCst)
    }
}

fn bad_gateway(path: &'static str) -> FetchError {
    FetchError::Status {
        path,
        status: StatusCode::BAD_GATEWAY,
    }
}

impl FetchGateway for FakeGateway {
    fn fetch_summary(&self) -> BoxFuture<'_, Result<StatsSummary, FetchError>> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        let result = if *self.fail_summary.lock().unwrap() {
            Err(bad_gateway("/stats"))
        } else {
            Ok(self.stats.lock().unwrap().clone())
        };
        Box::pin(async move { result })
    }

    fn fetch_transactions(&self) -> BoxFuture<'_, Result<Vec<Transaction>, FetchError>> {
        self.transaction_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.batches.lock().unwrap().pop_front();
        Box::pin(async move {
            match next {
                Some(batch) => {
                    tokio::time::sleep(batch.delay).await;
                    Ok(batch.transactions)
                }
                None => Ok(Vec::new()),
            }
        })
    }

    fn trigger_simulation(&self) -> BoxFuture<'_, Result<SimulationOutcome, FetchError>> {
        self.simulation_calls.fetch_add(1, Ordering::SeqCst);
        let result = if *self.fail_simulation.lock().unwrap() {
            Err(bad_gateway("/simulate"))
        } else {
            Ok(SimulationOutcome {
                added: 5,
                message: Some("Simulation and Analysis triggered".to_string()),
            })
        };
        Box::pin(async move { result })
    }
}
