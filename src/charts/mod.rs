pub mod surface;

use serde::Serialize;

use crate::gateway::types::Transaction;
use crate::page::{self, Page};
use crate::projector::{self, Buckets};

pub use surface::{ActiveChart, ChartHandle, ChartKind, ChartRegistry, ChartSpec, ChartSurface};

const TREND_TENSION: f64 = 0.4;

/// One chart mount point and the instance it currently owns, if any.
#[derive(Debug)]
struct ChartSlot {
    canvas: &'static str,
    handle: Option<ChartHandle>,
}

impl ChartSlot {
    fn new(canvas: &'static str) -> Self {
        Self {
            canvas,
            handle: None,
        }
    }

    /// Destroy the current instance (if any), then create and own a new one.
    fn replace(&mut self, surface: &mut dyn ChartSurface, spec: ChartSpec) {
        if let Some(old) = self.handle.take() {
            surface.destroy(old);
        }
        self.handle = Some(surface.create(self.canvas, spec));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartRender {
    Rendered,
    /// At least one canvas is not on the page; nothing was touched.
    MissingCanvas,
}

/// Owns the trend, location and category charts.
///
/// Every render destroys and recreates all three instances, so each slot
/// holds at most one live chart at any time.
pub struct ChartLifecycleManager {
    surface: Box<dyn ChartSurface>,
    trend: ChartSlot,
    location: ChartSlot,
    category: ChartSlot,
}

impl ChartLifecycleManager {
    pub fn new(surface: Box<dyn ChartSurface>) -> Self {
        Self {
            surface,
            trend: ChartSlot::new(page::RISK_TREND_CANVAS),
            location: ChartSlot::new(page::LOCATION_CANVAS),
            category: ChartSlot::new(page::CATEGORY_CANVAS),
        }
    }

    pub fn render(&mut self, page: &Page, snapshot: &[Transaction], trend_points: usize) -> ChartRender {
        let slots = [&self.trend, &self.location, &self.category];
        if slots.iter().any(|slot| !page.is_canvas(slot.canvas)) {
            return ChartRender::MissingCanvas;
        }

        let trend = projector::trend_series(snapshot, trend_points);
        let trend_spec = ChartSpec {
            kind: ChartKind::Line,
            labels: trend.iter().map(|p| p.label.clone()).collect(),
            values: trend.iter().map(|p| p.score).collect(),
            tension: Some(TREND_TENSION),
            fill: true,
            show_legend: false,
        };
        let location_spec = bucket_spec(ChartKind::Bar, &projector::aggregate_by_location(snapshot), false);
        let category_spec =
            bucket_spec(ChartKind::Doughnut, &projector::aggregate_by_category(snapshot), true);

        let surface = self.surface.as_mut();
        self.trend.replace(surface, trend_spec);
        self.location.replace(surface, location_spec);
        self.category.replace(surface, category_spec);

        ChartRender::Rendered
    }

    pub fn active(&self) -> Vec<ActiveChart> {
        self.surface.active()
    }

    pub fn destroyed_count(&self) -> u64 {
        self.surface.destroyed_count()
    }

    /// Handles currently owned by the trend, location and category slots.
    pub fn handles(&self) -> [Option<ChartHandle>; 3] {
        [self.trend.handle, self.location.handle, self.category.handle]
    }
}

fn bucket_spec(kind: ChartKind, buckets: &Buckets, show_legend: bool) -> ChartSpec {
    ChartSpec {
        kind,
        labels: buckets.labels().to_vec(),
        values: buckets.counts().iter().map(|&c| c as f64).collect(),
        tension: None,
        fill: false,
        show_legend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::types::sample_tx;
    use crate::page::Element;

    fn snapshot() -> Vec<Transaction> {
        vec![
            sample_tx(3, 91.0, Some("Tokyo"), Some("Retail")),
            sample_tx(2, 40.0, None, Some("Food")),
            sample_tx(1, 12.0, Some("Tokyo"), None),
        ]
    }

    #[test]
    fn test_exactly_one_live_chart_per_slot_after_many_cycles() {
        let page = Page::dashboard(true);
        let mut charts = ChartLifecycleManager::new(Box::new(ChartRegistry::new()));
        assert_eq!(charts.handles(), [None, None, None]);

        for _ in 0..7 {
            assert_eq!(charts.render(&page, &snapshot(), 50), ChartRender::Rendered);
            let active = charts.active();
            assert_eq!(active.len(), 3);
            for canvas in [page::RISK_TREND_CANVAS, page::LOCATION_CANVAS, page::CATEGORY_CANVAS] {
                assert_eq!(active.iter().filter(|c| c.canvas == canvas).count(), 1);
            }
            assert!(charts.handles().iter().all(Option::is_some));
        }
    }

    #[test]
    fn test_chart_data_matches_projections() {
        let page = Page::dashboard(true);
        let mut charts = ChartLifecycleManager::new(Box::new(ChartRegistry::new()));
        charts.render(&page, &snapshot(), 50);

        let active = charts.active();
        let by_canvas = |canvas: &str| {
            active
                .iter()
                .find(|c| c.canvas == canvas)
                .map(|c| c.spec.clone())
                .unwrap()
        };

        let trend = by_canvas(page::RISK_TREND_CANVAS);
        assert_eq!(trend.kind, ChartKind::Line);
        assert_eq!(trend.values, vec![12.0, 40.0, 91.0]);
        assert_eq!(trend.tension, Some(0.4));

        let location = by_canvas(page::LOCATION_CANVAS);
        assert_eq!(location.kind, ChartKind::Bar);
        assert_eq!(location.labels, vec!["Tokyo", "Unknown"]);
        assert_eq!(location.values, vec![2.0, 1.0]);

        let category = by_canvas(page::CATEGORY_CANVAS);
        assert_eq!(category.kind, ChartKind::Doughnut);
        assert_eq!(category.labels, vec!["Retail", "Food", "Uncategorized"]);
    }

    #[test]
    fn test_missing_canvas_skips_all_charts() {
        let mut page = Page::dashboard(true);
        let mut charts = ChartLifecycleManager::new(Box::new(ChartRegistry::new()));
        charts.render(&page, &snapshot(), 50);
        let before = charts.handles();

        page.unmount(page::CATEGORY_CANVAS);
        assert_eq!(charts.render(&page, &snapshot(), 50), ChartRender::MissingCanvas);
        assert_eq!(charts.handles(), before);
        assert_eq!(charts.active().len(), 3);
    }

    #[test]
    fn test_non_canvas_mount_counts_as_missing() {
        let mut page = Page::dashboard(true);
        page.mount(page::LOCATION_CANVAS, Element::Html(String::new()));
        let mut charts = ChartLifecycleManager::new(Box::new(ChartRegistry::new()));

        assert_eq!(charts.render(&page, &snapshot(), 50), ChartRender::MissingCanvas);
        assert!(charts.active().is_empty());
        assert_eq!(charts.handles(), [None, None, None]);
    }

    #[test]
    fn test_each_render_destroys_previous_instances() {
        let page = Page::dashboard(true);
        let mut charts = ChartLifecycleManager::new(Box::new(ChartRegistry::new()));
        charts.render(&page, &snapshot(), 50);
        assert_eq!(charts.destroyed_count(), 0);
        charts.render(&page, &snapshot(), 50);
        assert_eq!(charts.destroyed_count(), 3);
    }
}
