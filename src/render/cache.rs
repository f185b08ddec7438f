/// What the searchable view was last built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSignature {
    pub count: usize,
    pub search_term: String,
}

/// Memo of the last rebuilt signature for the searchable transaction view.
///
/// The signature is coarse: a snapshot with the same length but different
/// contents is considered unchanged.
#[derive(Debug, Default)]
pub struct RenderSkipCache {
    last: RenderSignature,
}

impl RenderSkipCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if a view built from `(count, search_term)` would match what is on screen.
    pub fn should_skip(&self, count: usize, search_term: &str) -> bool {
        self.last.count == count && self.last.search_term == search_term
    }

    /// Decide and, on a rebuild, record the new signature. Returns true when
    /// the caller must rebuild.
    pub fn begin_rebuild(&mut self, count: usize, search_term: &str) -> bool {
        if self.should_skip(count, search_term) {
            return false;
        }
        self.last = RenderSignature {
            count,
            search_term: search_term.to_string(),
        };
        true
    }

    pub fn last(&self) -> &RenderSignature {
        &self.last
    }
}
