pub mod cache;
pub mod html;

use serde::Serialize;

use crate::gateway::types::{StatsSummary, Transaction, SEVERITY_LEVELS};
use crate::page::{self, Page};
use crate::projector;

pub use cache::RenderSkipCache;

/// Result of one view builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum ViewRender {
    Rebuilt { rows: usize },
    Skipped,
    Unmounted,
}

/// Write the four severity counters. Returns how many counters were mounted.
pub fn render_stats(page: &mut Page, stats: &StatsSummary) -> usize {
    let mut written = 0;
    for level in SEVERITY_LEVELS {
        if let Some(id) = page::stat_element(level) {
            if page.set_text(id, stats.count(level).to_string()) {
                written += 1;
            }
        }
    }
    written
}

pub fn render_dashboard_table(page: &mut Page, snapshot: &[Transaction], rows: usize) -> ViewRender {
    if !page.has(page::DASHBOARD_TRANSACTIONS_BODY) {
        return ViewRender::Unmounted;
    }
    let top = projector::top_n(snapshot, rows);
    page.set_html(page::DASHBOARD_TRANSACTIONS_BODY, html::table_body(top));
    ViewRender::Rebuilt { rows: top.len() }
}

/// Rebuild the searchable table unless its signature is unchanged.
pub fn render_transactions_view(
    page: &mut Page,
    cache: &mut RenderSkipCache,
    snapshot: &[Transaction],
    cap: usize,
) -> ViewRender {
    if !page.has(page::ALL_TRANSACTIONS_BODY) {
        return ViewRender::Unmounted;
    }

    let term = page
        .input_value(page::TX_SEARCH)
        .map(str::to_lowercase)
        .unwrap_or_default();

    if !cache.begin_rebuild(snapshot.len(), &term) {
        return ViewRender::Skipped;
    }

    let view = projector::project_searchable(snapshot, &term, cap);
    let mut body = html::table_body(view.rows.iter().copied());
    if let Some(info) = view.info_line() {
        body.push_str(&html::info_row(&info));
    }
    page.set_html(page::ALL_TRANSACTIONS_BODY, body);

    tracing::debug!(
        rows = view.rows.len(),
        total = snapshot.len(),
        search = %term,
        "Rebuilt transactions view"
    );
    ViewRender::Rebuilt {
        rows: view.rows.len(),
    }
}

pub fn render_alerts(page: &mut Page, snapshot: &[Transaction], threshold: f64) -> ViewRender {
    if !page.has(page::ALERTS_CONTAINER) {
        return ViewRender::Unmounted;
    }

    let flagged = projector::alerts(snapshot, threshold);
    let markup = if flagged.is_empty() {
        html::EMPTY_ALERTS.to_string()
    } else {
        flagged.iter().map(|tx| html::alert_card(tx)).collect()
    };
    page.set_html(page::ALERTS_CONTAINER, markup);

    ViewRender::Rebuilt {
        rows: flagged.len(),
    }
}
