// AutocompleteEngine: the index and its suggestion cache behind one API
//
// Design notes:
// - The engine owns the TrieIndex and builds lightweight PrefixSuggester and
//   FuzzyMatcher views over it on each call.
// - Read paths take `&self`; the cache sits in a `RefCell` so hits can bump
//   frequencies and misses can store results.
// - `suggest` and `fuzzy_search` share one cache key space. A fuzzy result
//   cached under "car" is served to a later `suggest("car")` and vice versa.
// - Mutations drop every cached list containing the word. Insertions also
//   drop entries whose query would now admit the new word.

use std::cell::RefCell;

use log::{trace, warn};
use wordtrie_core::enums::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_LIMIT, DEFAULT_MAX_DISTANCE, QueryKind,
};
use wordtrie_core::error::WordError;
use wordtrie_core::metrics::{Metrics, NoopMetrics};

use crate::cache::{CacheEntry, SuggestionCache};
use crate::fuzzy::{FuzzyMatch, FuzzyMatcher, edit_distance};
use crate::index::TrieIndex;
use crate::suggestion::{PrefixSuggester, pattern_admits};

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Number of cached queries. `0` disables caching.
    pub cache_capacity: usize,
    /// Limit used by [`AutocompleteEngine::suggest_default`] and
    /// [`AutocompleteEngine::fuzzy_default`].
    pub default_limit: usize,
    /// Distance bound used by [`AutocompleteEngine::fuzzy_default`].
    pub default_max_distance: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            default_limit: DEFAULT_LIMIT,
            default_max_distance: DEFAULT_MAX_DISTANCE,
        }
    }
}

/// In-memory autocomplete engine.
pub struct AutocompleteEngine {
    index: TrieIndex,
    options: EngineOptions,
    /// Wrapped in `RefCell` so `&self` queries can record hits and misses.
    cache: RefCell<SuggestionCache>,
}

impl AutocompleteEngine {
    pub fn new() -> Self {
        Self::with_options(EngineOptions::default())
    }

    pub fn with_options(options: EngineOptions) -> Self {
        Self {
            index: TrieIndex::new(),
            options,
            cache: RefCell::new(SuggestionCache::new(options.cache_capacity)),
        }
    }

    /// Build an engine seeded with `words`.
    ///
    /// Fails on the first word outside `a..=z`.
    pub fn from_words<I, S>(words: I, options: EngineOptions) -> Result<Self, WordError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut engine = Self::with_options(options);
        engine.extend_words(words)?;
        Ok(engine)
    }

    /// Insert every word, returning how many were not stored before.
    ///
    /// Words preceding an invalid one stay inserted.
    pub fn extend_words<I, S>(&mut self, words: I) -> Result<usize, WordError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for word in words {
            if self.insert(word.as_ref())? {
                added += 1;
            }
        }
        Ok(added)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Store `word`. Returns `Ok(false)` if it was already present.
    pub fn insert(&mut self, word: &str) -> Result<bool, WordError> {
        let added = self.index.insert(word)?;
        let cache = self.cache.get_mut();
        cache.invalidate_by_word(word);
        if added {
            cache.invalidate_where(|key, entry| query_admits(key, entry, word));
        }
        Ok(added)
    }

    /// Delete `word`. Returns `false` if it was not stored.
    pub fn remove(&mut self, word: &str) -> bool {
        let removed = self.index.remove(word);
        self.cache.get_mut().invalidate_by_word(word);
        removed
    }

    /// Release every word and every cached result.
    pub fn clear(&mut self) {
        self.index.clear();
        self.cache.get_mut().clear();
    }

    pub fn clear_cache(&mut self) {
        self.cache.get_mut().clear();
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(word)
    }

    /// Complete `query` with up to `limit` stored words.
    ///
    /// Plain queries are completed as prefixes in lexicographic order.
    /// Queries containing `.` or `[` are matched as whole-word patterns.
    /// Malformed brackets are logged and only end the branches that reach
    /// them.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<String> {
        self.suggest_with(query, limit, &mut NoopMetrics)
    }

    pub fn suggest_with(&self, query: &str, limit: usize, metrics: &mut dyn Metrics) -> Vec<String> {
        if let Some(hit) = self.cached(query, limit) {
            return hit;
        }

        let status = PrefixSuggester::new(&self.index).suggest_with(query, limit, metrics);
        let (results, errors) = status.into_parts();
        for error in &errors {
            warn!("pattern {query:?}: {error}");
        }

        self.store(query, &results, QueryKind::classify(query));
        results
    }

    /// `suggest` with the configured default limit.
    pub fn suggest_default(&self, query: &str) -> Vec<String> {
        self.suggest(query, self.options.default_limit)
    }

    /// Stored words within `max_distance` edits of `query`, closest first.
    pub fn fuzzy_search(&self, query: &str, max_distance: usize, limit: usize) -> Vec<String> {
        self.fuzzy_search_with(query, max_distance, limit, &mut NoopMetrics)
    }

    pub fn fuzzy_search_with(
        &self,
        query: &str,
        max_distance: usize,
        limit: usize,
        metrics: &mut dyn Metrics,
    ) -> Vec<String> {
        if let Some(hit) = self.cached(query, limit) {
            return hit;
        }

        let results: Vec<String> = FuzzyMatcher::new(&self.index)
            .search_with(query, max_distance, limit, metrics)
            .into_iter()
            .map(|m| m.word)
            .collect();

        self.store(query, &results, QueryKind::Fuzzy { max_distance });
        results
    }

    /// `fuzzy_search` with the configured default distance and limit.
    pub fn fuzzy_default(&self, query: &str) -> Vec<String> {
        self.fuzzy_search(
            query,
            self.options.default_max_distance,
            self.options.default_limit,
        )
    }

    /// Fuzzy matches with their distances. Bypasses the cache.
    pub fn fuzzy_matches(&self, query: &str, max_distance: usize, limit: usize) -> Vec<FuzzyMatch> {
        FuzzyMatcher::new(&self.index).search(query, max_distance, limit)
    }

    /// Serve `query` from the cache if the entry holds at least `limit`
    /// results.
    fn cached(&self, query: &str, limit: usize) -> Option<Vec<String>> {
        if self.options.cache_capacity == 0 {
            return None;
        }
        let mut cache = self.cache.borrow_mut();
        let cached = cache.get(query);
        if cached.is_empty() || cached.len() < limit {
            trace!("cache miss for {query:?}");
            return None;
        }
        let hit = cached[..limit].to_vec();
        cache.update(query, None, true);
        trace!("cache hit for {query:?}");
        Some(hit)
    }

    fn store(&self, query: &str, results: &[String], kind: QueryKind) {
        if self.options.cache_capacity == 0 || results.is_empty() {
            return;
        }
        let mut cache = self.cache.borrow_mut();
        cache.make_room(query);
        cache.insert(query, results.to_vec(), kind);
    }

    // ========================================================================
    // Options and accessors
    // ========================================================================

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Resize the cache, evicting least frequently used entries if it
    /// shrinks. `0` disables caching and drops every entry.
    pub fn set_cache_capacity(&mut self, capacity: usize) {
        self.options.cache_capacity = capacity;
        let cache = self.cache.get_mut();
        cache.set_capacity(capacity);
        if capacity == 0 {
            cache.clear();
        }
    }

    pub fn set_default_limit(&mut self, limit: usize) {
        self.options.default_limit = limit;
    }

    pub fn set_default_max_distance(&mut self, max_distance: usize) {
        self.options.default_max_distance = max_distance;
    }

    /// Number of stored words.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &TrieIndex {
        &self.index
    }

    /// Copy of the cache as it stands, for statistics.
    ///
    /// The copy is detached: later queries neither see it nor update it.
    pub fn cache_snapshot(&self) -> SuggestionCache {
        self.cache.borrow().clone()
    }
}

impl Default for AutocompleteEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the query behind a cache entry would match `word`.
fn query_admits(key: &str, entry: &CacheEntry, word: &str) -> bool {
    match entry.kind() {
        QueryKind::Prefix => word.starts_with(key),
        QueryKind::Pattern => pattern_admits(key, word),
        QueryKind::Fuzzy { max_distance } => edit_distance(key, word) <= max_distance,
    }
}
