// Completion status: result collection, limit tracking, pattern errors

use wordtrie_core::error::PatternError;

/// Collects results for one completion query.
///
/// Search routines check [`is_full`](Self::is_full) before doing any work
/// and stop descending once the limit is reached. Pattern errors are
/// recorded once per distinct error, however many branches hit them.
#[derive(Debug, Clone, Default)]
pub struct CompletionStatus {
    limit: usize,
    results: Vec<String>,
    errors: Vec<PatternError>,
}

impl CompletionStatus {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            results: Vec::with_capacity(limit.min(64)),
            errors: Vec::new(),
        }
    }

    /// Returns `true` once `limit` results have been collected.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.results.len() >= self.limit
    }

    /// Add a result. Ignored once the limit is reached.
    pub fn push(&mut self, word: String) {
        if !self.is_full() {
            self.results.push(word);
        }
    }

    /// Record a malformed-pattern error for the current branch.
    pub fn report(&mut self, error: PatternError) {
        if !self.errors.contains(&error) {
            self.errors.push(error);
        }
    }

    pub fn results(&self) -> &[String] {
        &self.results
    }

    pub fn errors(&self) -> &[PatternError] {
        &self.errors
    }

    pub fn into_results(self) -> Vec<String> {
        self.results
    }

    /// Consume the status, returning results and errors.
    pub fn into_parts(self) -> (Vec<String>, Vec<PatternError>) {
        (self.results, self.errors)
    }
}
