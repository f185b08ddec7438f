use crate::gateway::types::Transaction;

/// Input for the full transaction table.
#[derive(Debug)]
pub struct SearchView<'a> {
    pub rows: Vec<&'a Transaction>,
    /// Set when the unfiltered list was capped: `(shown, total)`.
    pub truncated: Option<(usize, usize)>,
}

impl SearchView<'_> {
    pub fn info_line(&self) -> Option<String> {
        self.truncated
            .map(|(shown, total)| format!("Showing recent {} of {} transactions...", shown, total))
    }
}

fn matches(tx: &Transaction, term: &str) -> bool {
    if tx.id.to_string().contains(term) {
        return true;
    }
    tx.location
        .as_deref()
        .map(|loc| loc.to_lowercase().contains(term))
        .unwrap_or(false)
}

/// Project the searchable view. `term` must already be case-folded.
///
/// With a term every match is returned. Without one the first `cap` records
/// are returned, and `truncated` is set when more exist.
pub fn project_searchable<'a>(snapshot: &'a [Transaction], term: &str, cap: usize) -> SearchView<'a> {
    if !term.is_empty() {
        return SearchView {
            rows: snapshot.iter().filter(|tx| matches(tx, term)).collect(),
            truncated: None,
        };
    }

    let shown = snapshot.len().min(cap);
    SearchView {
        rows: snapshot[..shown].iter().collect(),
        truncated: (snapshot.len() > cap).then_some((shown, snapshot.len())),
    }
}
