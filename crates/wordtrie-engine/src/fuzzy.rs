// Bounded Levenshtein search over the trie
//
// One dynamic-programming row is kept per tree depth. The row for a node is
// computed from its parent's row and the node's letter, so words sharing a
// prefix share the work for that prefix. A subtree is skipped as soon as
// every cell of the current row exceeds the distance bound: later rows can
// only grow from there.

use wordtrie_core::alphabet::Letter;
use wordtrie_core::metrics::{Metrics, NoopMetrics, Operation};

use crate::index::{NodeId, TrieIndex};

/// A stored word within the distance bound of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyMatch {
    pub word: String,
    pub distance: usize,
}

/// Levenshtein distance between two strings, counted in characters.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = (curr[j] + 1).min(prev[j + 1] + 1).min(substitution);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Lightweight view over an index that answers fuzzy queries.
#[derive(Clone, Copy)]
pub struct FuzzyMatcher<'a> {
    index: &'a TrieIndex,
}

impl<'a> FuzzyMatcher<'a> {
    pub fn new(index: &'a TrieIndex) -> Self {
        Self { index }
    }

    /// Every stored word within `max_distance` of `query`, closest first,
    /// truncated to `limit`.
    ///
    /// Words at the same distance keep their discovery order, which is
    /// lexicographic.
    pub fn search(&self, query: &str, max_distance: usize, limit: usize) -> Vec<FuzzyMatch> {
        self.search_with(query, max_distance, limit, &mut NoopMetrics)
    }

    pub fn search_with(
        &self,
        query: &str,
        max_distance: usize,
        limit: usize,
        metrics: &mut dyn Metrics,
    ) -> Vec<FuzzyMatch> {
        let query: Vec<char> = query.chars().collect();
        let mut walk = RowWalk {
            index: self.index,
            query: &query,
            max_distance,
            rows: vec![(0..=query.len()).collect()],
            word: String::new(),
            hits: Vec::new(),
        };

        for (letter, child) in self.index.children(self.index.root()) {
            metrics.record(Operation::EdgeProbe);
            walk.visit(child, letter, 1, metrics);
        }

        let mut hits = walk.hits;
        hits.sort_by_key(|hit| hit.distance);
        hits.truncate(limit);
        hits
    }
}

struct RowWalk<'a, 'q> {
    index: &'a TrieIndex,
    query: &'q [char],
    max_distance: usize,
    /// `rows[d]` is the row for the node at depth `d` on the current path.
    rows: Vec<Vec<usize>>,
    word: String,
    hits: Vec<FuzzyMatch>,
}

impl RowWalk<'_, '_> {
    fn visit(&mut self, node: NodeId, letter: Letter, depth: usize, metrics: &mut dyn Metrics) {
        metrics.record(Operation::NodeVisit);
        let ch = letter.as_char();
        let cols = self.query.len() + 1;
        if self.rows.len() <= depth {
            self.rows.push(vec![0; cols]);
        }

        let (distance, row_min) = {
            let (done, rest) = self.rows.split_at_mut(depth);
            let prev = &done[depth - 1];
            let row = &mut rest[0];

            row[0] = prev[0] + 1;
            for j in 1..cols {
                metrics.record(Operation::DpCell);
                let insertion = row[j - 1] + 1;
                let deletion = prev[j] + 1;
                let substitution = prev[j - 1] + usize::from(self.query[j - 1] != ch);
                row[j] = insertion.min(deletion).min(substitution);
            }
            (row[cols - 1], row.iter().copied().min().unwrap_or(usize::MAX))
        };

        self.word.push(ch);

        if distance <= self.max_distance && self.index.is_terminal(node) {
            self.hits.push(FuzzyMatch {
                word: self.word.clone(),
                distance,
            });
        }

        if row_min <= self.max_distance {
            for (next_letter, child) in self.index.children(node) {
                metrics.record(Operation::EdgeProbe);
                self.visit(child, next_letter, depth + 1, metrics);
            }
        }

        self.word.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordtrie_core::metrics::CountingMetrics;

    const FUZZY_WORDS: &[&str] = &[
        "apple",
        "apa",
        "banana",
        "app",
        "application",
        "mango",
        "apprehensive",
        "car",
        "clr",
        "caw",
        "carry",
        "ear",
        "ctr",
    ];

    fn index_of(words: &[&str]) -> TrieIndex {
        words.iter().collect()
    }

    fn words(matches: &[FuzzyMatch]) -> Vec<&str> {
        matches.iter().map(|m| m.word.as_str()).collect()
    }

    #[test]
    fn edit_distance_basics() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("car", "carry"), 2);
        assert_eq!(edit_distance("app", "apa"), 1);
        assert_eq!(edit_distance("flaw", "lawn"), 2);
    }

    #[test]
    fn finds_close_words_sorted_by_distance() {
        let index = index_of(FUZZY_WORDS);
        let matches = FuzzyMatcher::new(&index).search("app", 2, 5);
        assert_eq!(words(&matches), ["app", "apa", "apple"]);
        assert_eq!(
            matches.iter().map(|m| m.distance).collect::<Vec<_>>(),
            [0, 1, 2]
        );
    }

    #[test]
    fn equal_distances_keep_lexicographic_order() {
        let index = index_of(FUZZY_WORDS);
        let matches = FuzzyMatcher::new(&index).search("car", 1, 5);
        assert_eq!(words(&matches), ["car", "caw", "clr", "ctr", "ear"]);
    }

    #[test]
    fn limit_keeps_smallest_distances() {
        let index = index_of(FUZZY_WORDS);
        let matches = FuzzyMatcher::new(&index).search("car", 2, 2);
        assert_eq!(words(&matches), ["car", "caw"]);
    }

    #[test]
    fn reported_distances_are_exact() {
        let index = index_of(FUZZY_WORDS);
        for query in ["app", "car", "mang", "bananas", "x"] {
            for m in FuzzyMatcher::new(&index).search(query, 3, usize::MAX) {
                assert_eq!(m.distance, edit_distance(query, &m.word), "{query} -> {}", m.word);
                assert!(m.distance <= 3);
            }
        }
    }

    #[test]
    fn nothing_qualifying_is_omitted() {
        let index = index_of(FUZZY_WORDS);
        let found = FuzzyMatcher::new(&index).search("cat", 2, usize::MAX);
        let mut expected: Vec<&str> = FUZZY_WORDS
            .iter()
            .copied()
            .filter(|w| edit_distance("cat", w) <= 2)
            .collect();
        let mut got = words(&found);
        expected.sort_unstable();
        got.sort_unstable();
        assert_eq!(got, expected);
    }

    #[test]
    fn zero_distance_is_exact_lookup() {
        let index = index_of(FUZZY_WORDS);
        let matches = FuzzyMatcher::new(&index).search("carry", 0, 10);
        assert_eq!(words(&matches), ["carry"]);
        assert!(FuzzyMatcher::new(&index).search("cary", 0, 10).is_empty());
    }

    #[test]
    fn empty_query_matches_short_words() {
        let index = index_of(&["a", "ab", "abc", "b"]);
        let matches = FuzzyMatcher::new(&index).search("", 1, 10);
        assert_eq!(words(&matches), ["a", "b"]);
    }

    #[test]
    fn empty_index_yields_nothing() {
        let index = TrieIndex::new();
        assert!(FuzzyMatcher::new(&index).search("abc", 2, 10).is_empty());
    }

    #[test]
    fn pruning_skips_distant_subtrees() {
        let index = index_of(FUZZY_WORDS);
        let mut tight = CountingMetrics::new();
        FuzzyMatcher::new(&index).search_with("car", 0, 10, &mut tight);
        let mut loose = CountingMetrics::new();
        FuzzyMatcher::new(&index).search_with("car", 20, 10, &mut loose);
        assert!(tight.node_visits < loose.node_visits);
        assert_eq!(loose.node_visits as usize, index.node_count() - 1);
    }
}
