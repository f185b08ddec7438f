use serde::Serialize;
use std::sync::Arc;

use crate::charts::{ChartLifecycleManager, ChartRender, ChartSurface};
use crate::config::{PollingConfig, ViewConfig};
use crate::gateway::types::{Snapshot, StatsSummary, Transaction};
use crate::page::{self, Page};
use crate::render::{self, RenderSkipCache, ViewRender};

/// Shared handle used by the scheduler tasks and the console.
pub type SharedDashboard = Arc<tokio::sync::Mutex<DashboardState>>;

/// Whether a response was applied to the views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Applied<T> {
    Rendered(T),
    /// A newer cycle already applied this data source.
    Stale { latest: u64 },
}

/// Outcome of rendering one transactions snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnapshotRender {
    pub dashboard: ViewRender,
    pub charts: ChartRender,
    pub transactions: ViewRender,
    pub alerts: ViewRender,
}

/// Latest cycle applied per data source.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct AppliedCycles {
    pub summary: u64,
    pub transactions: u64,
}

/// All view state for one dashboard session: the page, the current snapshot,
/// the render-skip memo and the chart instances.
pub struct DashboardState {
    page: Page,
    snapshot: Snapshot,
    search_cache: RenderSkipCache,
    charts: ChartLifecycleManager,
    views: ViewConfig,
    ordered_apply: bool,
    applied: AppliedCycles,
}

impl DashboardState {
    pub fn new(
        page: Page,
        surface: Box<dyn ChartSurface>,
        views: ViewConfig,
        polling: &PollingConfig,
    ) -> Self {
        Self {
            page,
            snapshot: Arc::from(Vec::new()),
            search_cache: RenderSkipCache::new(),
            charts: ChartLifecycleManager::new(surface),
            views,
            ordered_apply: polling.ordered_apply,
            applied: AppliedCycles::default(),
        }
    }

    pub fn into_shared(self) -> SharedDashboard {
        Arc::new(tokio::sync::Mutex::new(self))
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.clone()
    }

    pub fn charts(&self) -> &ChartLifecycleManager {
        &self.charts
    }

    pub fn applied(&self) -> AppliedCycles {
        self.applied
    }

    fn is_stale(&self, cycle: u64, latest: u64) -> bool {
        self.ordered_apply && cycle < latest
    }

    /// Render the severity counters from cycle `cycle`.
    pub fn apply_summary(&mut self, cycle: u64, stats: &StatsSummary) -> Applied<usize> {
        if self.is_stale(cycle, self.applied.summary) {
            return Applied::Stale {
                latest: self.applied.summary,
            };
        }
        self.applied.summary = cycle;
        Applied::Rendered(render::render_stats(&mut self.page, stats))
    }

    /// Replace the snapshot with one fetched in cycle `cycle` and rebuild
    /// every view derived from it.
    pub fn apply_transactions(
        &mut self,
        cycle: u64,
        transactions: Vec<Transaction>,
    ) -> Applied<SnapshotRender> {
        if self.is_stale(cycle, self.applied.transactions) {
            return Applied::Stale {
                latest: self.applied.transactions,
            };
        }
        self.applied.transactions = cycle;
        self.snapshot = Arc::from(transactions);
        Applied::Rendered(self.render_snapshot())
    }

    fn render_snapshot(&mut self) -> SnapshotRender {
        let snapshot = self.snapshot.clone();
        let views = &self.views;

        let dashboard = render::render_dashboard_table(&mut self.page, &snapshot, views.dashboard_rows);
        let charts = self.charts.render(&self.page, &snapshot, views.trend_points);
        let transactions = render::render_transactions_view(
            &mut self.page,
            &mut self.search_cache,
            &snapshot,
            views.search_cap,
        );
        let alerts = render::render_alerts(&mut self.page, &snapshot, views.alert_threshold);

        SnapshotRender {
            dashboard,
            charts,
            transactions,
            alerts,
        }
    }

    /// Update the search box and re-render the searchable view from the
    /// current snapshot.
    pub fn search(&mut self, term: &str) -> ViewRender {
        if !self.page.set_input(page::TX_SEARCH, term) {
            return ViewRender::Unmounted;
        }
        let snapshot = self.snapshot.clone();
        render::render_transactions_view(
            &mut self.page,
            &mut self.search_cache,
            &snapshot,
            self.views.search_cap,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartRegistry;
    use crate::gateway::types::sample_tx;

    fn state(ordered_apply: bool) -> DashboardState {
        let polling = PollingConfig {
            ordered_apply,
            ..PollingConfig::default()
        };
        DashboardState::new(
            Page::dashboard(true),
            Box::new(ChartRegistry::new()),
            ViewConfig::default(),
            &polling,
        )
    }

    fn batch(n: i64) -> Vec<Transaction> {
        (0..n).map(|i| sample_tx(i, 80.0, Some("Tokyo"), None)).collect()
    }

    #[test]
    fn test_apply_transactions_renders_every_view() {
        let mut state = state(true);
        let outcome = state.apply_transactions(1, batch(12));
        assert_eq!(
            outcome,
            Applied::Rendered(SnapshotRender {
                dashboard: ViewRender::Rebuilt { rows: 10 },
                charts: ChartRender::Rendered,
                transactions: ViewRender::Rebuilt { rows: 12 },
                alerts: ViewRender::Rebuilt { rows: 12 },
            })
        );
        assert_eq!(state.snapshot().len(), 12);
        assert_eq!(state.applied().transactions, 1);
    }

    #[test]
    fn test_stale_snapshot_is_discarded_when_ordered() {
        let mut state = state(true);
        state.apply_transactions(5, batch(30));
        let held = state.snapshot();

        assert_eq!(
            state.apply_transactions(4, batch(3)),
            Applied::Stale { latest: 5 }
        );
        assert_eq!(state.snapshot().len(), 30);
        // The previous snapshot is still the same allocation
        assert!(Arc::ptr_eq(&held, &state.snapshot()));
    }

    #[test]
    fn test_last_arrival_wins_when_unordered() {
        let mut state = state(false);
        state.apply_transactions(5, batch(30));
        assert!(matches!(state.apply_transactions(4, batch(3)), Applied::Rendered(_)));
        assert_eq!(state.snapshot().len(), 3);
    }

    #[test]
    fn test_snapshot_is_replaced_not_mutated() {
        let mut state = state(true);
        state.apply_transactions(1, batch(4));
        let reader = state.snapshot();
        state.apply_transactions(2, batch(9));
        assert_eq!(reader.len(), 4);
        assert_eq!(state.snapshot().len(), 9);
    }

    #[test]
    fn test_summary_ordering_is_independent_of_transactions() {
        let mut state = state(true);
        state.apply_transactions(7, batch(1));
        let stats: StatsSummary = serde_json::from_str(r#"{"HIGH": 3}"#).unwrap();
        assert_eq!(state.apply_summary(2, &stats), Applied::Rendered(4));
        assert_eq!(state.page().content(page::STAT_HIGH), Some("3"));
        assert_eq!(state.apply_summary(1, &stats), Applied::Stale { latest: 2 });
    }

    #[test]
    fn test_search_rerenders_from_current_snapshot() {
        let mut state = state(true);
        let mut txs = batch(5);
        txs[2].location = Some("Berlin".to_string());
        state.apply_transactions(1, txs);

        assert_eq!(state.search("berLIN"), ViewRender::Rebuilt { rows: 1 });
        assert_eq!(state.search("berLIN"), ViewRender::Skipped);
        assert_eq!(state.search(""), ViewRender::Rebuilt { rows: 5 });
    }

    #[test]
    fn test_missing_mounts_are_no_ops() {
        let polling = PollingConfig::default();
        let mut state = DashboardState::new(
            Page::empty(),
            Box::new(ChartRegistry::new()),
            ViewConfig::default(),
            &polling,
        );
        let outcome = state.apply_transactions(1, batch(3));
        assert_eq!(
            outcome,
            Applied::Rendered(SnapshotRender {
                dashboard: ViewRender::Unmounted,
                charts: ChartRender::MissingCanvas,
                transactions: ViewRender::Unmounted,
                alerts: ViewRender::Unmounted,
            })
        );
        assert_eq!(state.search("x"), ViewRender::Unmounted);
        assert!(state.charts().active().is_empty());
    }
}
