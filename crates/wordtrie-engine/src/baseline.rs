// Sorted word list with binary search, kept as a benchmark baseline
//
// Every operation is a binary search over a sorted, deduplicated vector.
// Prefix completion finds the first word >= prefix and the first word past
// the prefix range, then returns the leading `limit` words of that slice.

use wordtrie_core::error::WordError;
use wordtrie_core::metrics::{Metrics, NoopMetrics, Operation};

#[derive(Debug, Clone, Default)]
pub struct SortedWordList {
    words: Vec<String>,
}

impl SortedWordList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `word` at its sorted position. Returns `Ok(false)` if it was
    /// already present.
    pub fn insert(&mut self, word: &str) -> Result<bool, WordError> {
        WordError::check(word)?;
        match self.find(word, &mut NoopMetrics) {
            Ok(_) => Ok(false),
            Err(at) => {
                self.words.insert(at, word.to_string());
                Ok(true)
            }
        }
    }

    pub fn remove(&mut self, word: &str) -> bool {
        match self.find(word, &mut NoopMetrics) {
            Ok(at) => {
                self.words.remove(at);
                true
            }
            Err(_) => false,
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.contains_with(word, &mut NoopMetrics)
    }

    pub fn contains_with(&self, word: &str, metrics: &mut dyn Metrics) -> bool {
        self.find(word, metrics).is_ok()
    }

    /// Up to `limit` words starting with `prefix`, in lexicographic order.
    pub fn suggest(&self, prefix: &str, limit: usize) -> Vec<String> {
        self.suggest_with(prefix, limit, &mut NoopMetrics)
    }

    pub fn suggest_with(&self, prefix: &str, limit: usize, metrics: &mut dyn Metrics) -> Vec<String> {
        let start = self.words.partition_point(|w| {
            metrics.record(Operation::KeyComparison);
            w.as_str() < prefix
        });
        let end = start
            + self.words[start..].partition_point(|w| {
                metrics.record(Operation::KeyComparison);
                w.starts_with(prefix)
            });
        self.words[start..end].iter().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    fn find(&self, word: &str, metrics: &mut dyn Metrics) -> Result<usize, usize> {
        self.words.binary_search_by(|stored| {
            metrics.record(Operation::KeyComparison);
            stored.as_str().cmp(word)
        })
    }
}

impl<S: AsRef<str>> FromIterator<S> for SortedWordList {
    /// Collect valid words, skipping anything outside the alphabet.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut words: Vec<String> = iter
            .into_iter()
            .map(|w| w.as_ref().to_string())
            .filter(|w| WordError::check(w).is_ok())
            .collect();
        words.sort_unstable();
        words.dedup();
        Self { words }
    }
}
