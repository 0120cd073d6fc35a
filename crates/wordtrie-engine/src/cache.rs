// Suggestion cache with least-frequently-used eviction
//
// Maps a query string to the result list last computed for it. Every cache
// hit bumps the entry's frequency; eviction drops the entry with the lowest
// frequency, the oldest one among equals. Entries are dropped, never
// recomputed, when the index changes under them.

use hashbrown::HashMap;
use log::debug;
use wordtrie_core::enums::QueryKind;

/// One cached result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    results: Vec<String>,
    frequency: u64,
    kind: QueryKind,
    /// Insertion sequence number, used to break frequency ties.
    stamp: u64,
}

impl CacheEntry {
    pub fn results(&self) -> &[String] {
        &self.results
    }

    /// Number of times this entry was stored or served.
    pub fn frequency(&self) -> u64 {
        self.frequency
    }

    /// The search that produced the results.
    pub fn kind(&self) -> QueryKind {
        self.kind
    }
}

/// Capacity-bounded query cache.
///
/// `insert` never evicts on its own: callers make room first with
/// [`make_room`](Self::make_room) or trim afterwards with
/// [`evict`](Self::evict).
#[derive(Debug, Clone)]
pub struct SuggestionCache {
    entries: HashMap<String, CacheEntry>,
    capacity: usize,
    next_stamp: u64,
}

impl SuggestionCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity.saturating_add(1).min(1024)),
            capacity,
            next_stamp: 0,
        }
    }

    /// Cached results for `key`, or an empty slice.
    pub fn get(&self, key: &str) -> &[String] {
        self.entries
            .get(key)
            .map(|entry| entry.results.as_slice())
            .unwrap_or(&[])
    }

    pub fn entry(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Store `results` under `key` with frequency 1, replacing any previous
    /// entry. Empty result lists are refused.
    pub fn insert(&mut self, key: &str, results: Vec<String>, kind: QueryKind) -> bool {
        if results.is_empty() {
            return false;
        }
        debug!("cache: inserted {key:?} with {} results", results.len());
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                results,
                frequency: 1,
                kind,
                stamp,
            },
        );
        true
    }

    /// Replace the payload and/or bump the frequency of an existing entry.
    ///
    /// Replacing the payload with an empty list drops the entry. Returns
    /// `false` if `key` is not cached.
    pub fn update(&mut self, key: &str, results: Option<Vec<String>>, bump_frequency: bool) -> bool {
        let Some(entry) = self.entries.get_mut(key) else {
            return false;
        };
        if bump_frequency {
            entry.frequency += 1;
            debug!("cache: {key:?} frequency now {}", entry.frequency);
        }
        if let Some(results) = results {
            if results.is_empty() {
                self.entries.remove(key);
                debug!("cache: dropped {key:?} (no results)");
                return true;
            }
            entry.results = results;
            debug!("cache: refreshed {key:?}");
        }
        true
    }

    /// If the cache holds more than `capacity` entries, drop the least
    /// frequently used one and return its key.
    pub fn evict(&mut self) -> Option<String> {
        if self.entries.len() > self.capacity {
            self.evict_lfu()
        } else {
            None
        }
    }

    /// Ensure that inserting `key` will not take the cache past capacity.
    ///
    /// Replacing an existing key needs no room.
    pub fn make_room(&mut self, key: &str) -> Option<String> {
        if self.capacity > 0
            && !self.entries.contains_key(key)
            && self.entries.len() >= self.capacity
        {
            self.evict_lfu()
        } else {
            None
        }
    }

    fn evict_lfu(&mut self) -> Option<String> {
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| (entry.frequency, entry.stamp))
            .map(|(key, _)| key.clone())?;
        if let Some(entry) = self.entries.remove(&victim) {
            debug!(
                "cache: evicted {victim:?} with frequency {}",
                entry.frequency
            );
        }
        Some(victim)
    }

    /// Drop every entry whose results contain `word`. Returns how many were
    /// dropped.
    pub fn invalidate_by_word(&mut self, word: &str) -> usize {
        self.invalidate_where(|_, entry| entry.results.iter().any(|r| r == word))
    }

    /// Drop every entry for which `stale(key, entry)` holds.
    pub fn invalidate_where<F>(&mut self, mut stale: F) -> usize
    where
        F: FnMut(&str, &CacheEntry) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|key, entry| {
            let drop = stale(key, entry);
            if drop {
                debug!("cache: invalidated {key:?}");
            }
            !drop
        });
        before - self.entries.len()
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn frequency(&self, key: &str) -> Option<u64> {
        self.entries.get(key).map(|entry| entry.frequency)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity, evicting least frequently used entries until the
    /// cache fits.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.evict().is_some() {}
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        debug!("cache: cleared");
    }

    /// Cached keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn new_cache_is_empty() {
        let cache = SuggestionCache::new(4);
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 4);
        assert!(cache.get("app").is_empty());
        assert!(cache.entry("app").is_none());
    }

    #[test]
    fn insert_and_get() {
        let mut cache = SuggestionCache::new(4);
        assert!(cache.insert("ap", list(&["ape", "apple"]), QueryKind::Prefix));
        assert_eq!(cache.get("ap"), ["ape", "apple"]);
        assert_eq!(cache.frequency("ap"), Some(1));
        assert_eq!(cache.entry("ap").unwrap().kind(), QueryKind::Prefix);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn empty_results_are_not_cached() {
        let mut cache = SuggestionCache::new(4);
        assert!(!cache.insert("zz", Vec::new(), QueryKind::Prefix));
        assert!(cache.is_empty());
    }

    #[test]
    fn insert_replaces_existing_key() {
        let mut cache = SuggestionCache::new(4);
        cache.insert("ap", list(&["ape"]), QueryKind::Prefix);
        cache.update("ap", None, true);
        cache.insert("ap", list(&["apple"]), QueryKind::Fuzzy { max_distance: 1 });
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("ap"), ["apple"]);
        assert_eq!(cache.frequency("ap"), Some(1));
    }

    #[test]
    fn update_bumps_frequency_and_replaces_payload() {
        let mut cache = SuggestionCache::new(4);
        cache.insert("ap", list(&["ape"]), QueryKind::Prefix);
        assert!(cache.update("ap", None, true));
        assert!(cache.update("ap", None, true));
        assert_eq!(cache.frequency("ap"), Some(3));
        assert!(cache.update("ap", Some(list(&["apex"])), false));
        assert_eq!(cache.get("ap"), ["apex"]);
        assert_eq!(cache.frequency("ap"), Some(3));
    }

    #[test]
    fn update_with_empty_payload_drops_entry() {
        let mut cache = SuggestionCache::new(4);
        cache.insert("ap", list(&["ape"]), QueryKind::Prefix);
        assert!(cache.update("ap", Some(Vec::new()), true));
        assert!(!cache.contains_key("ap"));
    }

    #[test]
    fn update_missing_key_is_noop() {
        let mut cache = SuggestionCache::new(4);
        assert!(!cache.update("nope", Some(list(&["x"])), true));
        assert!(cache.is_empty());
    }

    #[test]
    fn evict_only_when_over_capacity() {
        let mut cache = SuggestionCache::new(2);
        cache.insert("a", list(&["a"]), QueryKind::Prefix);
        cache.insert("b", list(&["b"]), QueryKind::Prefix);
        assert_eq!(cache.evict(), None);
        cache.insert("c", list(&["c"]), QueryKind::Prefix);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.evict(), Some("a".to_string()));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn evict_removes_least_frequent() {
        let mut cache = SuggestionCache::new(2);
        cache.insert("a", list(&["a"]), QueryKind::Prefix);
        cache.insert("b", list(&["b"]), QueryKind::Prefix);
        cache.insert("c", list(&["c"]), QueryKind::Prefix);
        cache.update("a", None, true);
        cache.update("c", None, true);
        assert_eq!(cache.evict(), Some("b".to_string()));
        assert!(cache.contains_key("a"));
        assert!(cache.contains_key("c"));
    }

    #[test]
    fn frequency_ties_evict_oldest() {
        let mut cache = SuggestionCache::new(1);
        cache.insert("first", list(&["x"]), QueryKind::Prefix);
        cache.insert("second", list(&["y"]), QueryKind::Prefix);
        assert_eq!(cache.evict(), Some("first".to_string()));
    }

    #[test]
    fn make_room_keeps_size_within_capacity() {
        let mut cache = SuggestionCache::new(2);
        for key in ["a", "b", "c", "d"] {
            cache.make_room(key);
            cache.insert(key, list(&[key]), QueryKind::Prefix);
            assert!(cache.len() <= 2);
        }
        assert!(cache.contains_key("c"));
        assert!(cache.contains_key("d"));
    }

    #[test]
    fn make_room_for_existing_key_evicts_nothing() {
        let mut cache = SuggestionCache::new(2);
        cache.insert("a", list(&["a"]), QueryKind::Prefix);
        cache.insert("b", list(&["b"]), QueryKind::Prefix);
        assert_eq!(cache.make_room("a"), None);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn invalidate_by_word_drops_every_containing_entry() {
        let mut cache = SuggestionCache::new(8);
        cache.insert("ap", list(&["ape", "apple"]), QueryKind::Prefix);
        cache.insert("app", list(&["apple", "apply"]), QueryKind::Prefix);
        cache.insert("b", list(&["banana"]), QueryKind::Prefix);
        cache.insert("appl", list(&["applet"]), QueryKind::Prefix);
        assert_eq!(cache.invalidate_by_word("apple"), 2);
        assert!(!cache.contains_key("ap"));
        assert!(!cache.contains_key("app"));
        assert!(cache.contains_key("b"));
        // Exact match only.
        assert!(cache.contains_key("appl"));
    }

    #[test]
    fn invalidate_where_uses_predicate() {
        let mut cache = SuggestionCache::new(8);
        cache.insert("ca", list(&["cat"]), QueryKind::Prefix);
        cache.insert("c.t", list(&["cat"]), QueryKind::Pattern);
        let dropped = cache.invalidate_where(|_, entry| entry.kind() == QueryKind::Pattern);
        assert_eq!(dropped, 1);
        assert!(cache.contains_key("ca"));
    }

    #[test]
    fn set_capacity_shrinks() {
        let mut cache = SuggestionCache::new(4);
        for key in ["a", "b", "c", "d"] {
            cache.insert(key, list(&[key]), QueryKind::Prefix);
        }
        cache.update("d", None, true);
        cache.set_capacity(1);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains_key("d"));
    }

    #[test]
    fn clear_and_remove() {
        let mut cache = SuggestionCache::new(4);
        cache.insert("a", list(&["a"]), QueryKind::Prefix);
        cache.insert("b", list(&["b"]), QueryKind::Prefix);
        assert!(cache.remove("a"));
        assert!(!cache.remove("a"));
        assert_eq!(cache.keys().collect::<Vec<_>>(), ["b"]);
        cache.clear();
        assert!(cache.is_empty());
    }
}
