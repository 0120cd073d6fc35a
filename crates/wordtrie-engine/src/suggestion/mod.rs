// Completion over the trie: plain prefixes and wildcard patterns
//
// Architecture:
//   - `status`: result collection with limit tracking and pattern errors
//   - `prefix`: depth-first completion below a located prefix node
//   - `pattern`: wildcard matching from the root (`.`, `[set]`, `[^set]`)

pub mod pattern;
pub mod prefix;
pub mod status;

pub use pattern::{Pattern, pattern_admits};
pub use status::CompletionStatus;

use wordtrie_core::enums::QueryKind;
use wordtrie_core::metrics::{Metrics, NoopMetrics};

use crate::index::TrieIndex;

/// Lightweight view over an index that answers `suggest` queries.
///
/// Queries containing `.` or `[` run the wildcard matcher from the root;
/// anything else is completed as a prefix.
#[derive(Clone, Copy)]
pub struct PrefixSuggester<'a> {
    index: &'a TrieIndex,
}

impl<'a> PrefixSuggester<'a> {
    pub fn new(index: &'a TrieIndex) -> Self {
        Self { index }
    }

    /// Complete `query`, returning results and any pattern errors.
    pub fn suggest(&self, query: &str, limit: usize) -> CompletionStatus {
        self.suggest_with(query, limit, &mut NoopMetrics)
    }

    pub fn suggest_with(
        &self,
        query: &str,
        limit: usize,
        metrics: &mut dyn Metrics,
    ) -> CompletionStatus {
        let mut status = CompletionStatus::new(limit);
        match QueryKind::classify(query) {
            QueryKind::Pattern => {
                pattern::complete_pattern(self.index, query, &mut status, metrics)
            }
            _ => prefix::complete_prefix(self.index, query, &mut status, metrics),
        }
        status
    }
}
