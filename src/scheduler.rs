use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::config::PollingConfig;
use crate::gateway::{FetchError, FetchGateway, SimulationOutcome};
use crate::page::NotificationLevel;
use crate::state::{Applied, SharedDashboard};

/// The two fetch tasks of one refresh cycle. They resolve independently.
pub struct CycleHandle {
    pub cycle: u64,
    pub summary: JoinHandle<()>,
    pub transactions: JoinHandle<()>,
}

impl CycleHandle {
    /// Wait for both fetches of this cycle to finish rendering.
    pub async fn join(self) {
        let (summary, transactions) = tokio::join!(self.summary, self.transactions);
        if let Err(e) = summary.and(transactions) {
            tracing::error!(cycle = self.cycle, error = %e, "Refresh task panicked");
        }
    }
}

/// Drives fetch-and-render cycles against the dashboard state.
#[derive(Clone)]
pub struct Poller {
    gateway: Arc<dyn FetchGateway>,
    dashboard: SharedDashboard,
    next_cycle: Arc<AtomicU64>,
    interval: Duration,
}

impl Poller {
    pub fn new(gateway: Arc<dyn FetchGateway>, dashboard: SharedDashboard, polling: &PollingConfig) -> Self {
        Self {
            gateway,
            dashboard,
            next_cycle: Arc::new(AtomicU64::new(0)),
            interval: Duration::from_millis(polling.interval_ms),
        }
    }

    pub fn dashboard(&self) -> &SharedDashboard {
        &self.dashboard
    }

    /// Start one refresh cycle without waiting for it. Cycles may overlap; each
    /// gets a higher sequence number than every cycle started before it.
    pub fn spawn_cycle(&self) -> CycleHandle {
        let cycle = self.next_cycle.fetch_add(1, Ordering::SeqCst) + 1;

        let gateway = self.gateway.clone();
        let dashboard = self.dashboard.clone();
        let summary = tokio::spawn(async move {
            match gateway.fetch_summary().await {
                Ok(stats) => {
                    let outcome = dashboard.lock().await.apply_summary(cycle, &stats);
                    if let Applied::Stale { latest } = outcome {
                        tracing::debug!(cycle, latest, "Discarded stale stats response");
                    }
                }
                Err(e) => tracing::error!(cycle, error = %e, "Error fetching stats"),
            }
        });

        let gateway = self.gateway.clone();
        let dashboard = self.dashboard.clone();
        let transactions = tokio::spawn(async move {
            match gateway.fetch_transactions().await {
                Ok(batch) => {
                    let count = batch.len();
                    let outcome = dashboard.lock().await.apply_transactions(cycle, batch);
                    match outcome {
                        Applied::Rendered(report) => tracing::debug!(
                            cycle,
                            count,
                            transactions_view = ?report.transactions,
                            charts = ?report.charts,
                            "Applied transactions snapshot"
                        ),
                        Applied::Stale { latest } => tracing::info!(
                            cycle,
                            latest,
                            count,
                            "Discarded stale transactions response"
                        ),
                    }
                }
                Err(e) => tracing::error!(cycle, error = %e, "Error fetching transactions"),
            }
        });

        CycleHandle {
            cycle,
            summary,
            transactions,
        }
    }

    /// Run one cycle now, then one per interval while auto-refresh is on.
    /// Stops ticking when `shutdown` fires; in-flight fetches are left to finish.
    pub async fn run(self, shutdown: CancellationToken) {
        tracing::info!(
            interval_ms = self.interval.as_millis() as u64,
            "Poll scheduler started"
        );

        self.spawn_cycle();

        let mut ticker = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = shutdown.cancelled() => {
                    tracing::info!("Shutdown received, stopping poll scheduler");
                    break;
                }
            }

            let enabled = self.dashboard.lock().await.page().auto_refresh_enabled();
            if enabled {
                self.spawn_cycle();
            } else {
                tracing::trace!("Auto-refresh disabled, skipping tick");
            }
        }
    }

    /// Ask the backend to inject simulated transactions. The result is pushed
    /// to the page as a notification; on success a refresh cycle follows.
    pub async fn simulate(&self) -> Result<SimulationOutcome, FetchError> {
        match self.gateway.trigger_simulation().await {
            Ok(outcome) => {
                tracing::info!(added = outcome.added, "Simulation triggered");
                self.dashboard.lock().await.page_mut().notify(
                    NotificationLevel::Info,
                    format!("Simulation added {} transactions", outcome.added),
                );
                self.spawn_cycle();
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Simulation request failed");
                self.dashboard
                    .lock()
                    .await
                    .page_mut()
                    .notify(NotificationLevel::Error, format!("Simulation failed: {}", e));
                Err(e)
            }
        }
    }
}
