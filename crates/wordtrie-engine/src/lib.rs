//! Trie-backed autocomplete engine.
//!
//! Stores a vocabulary of lowercase `a..=z` words and answers prefix,
//! wildcard and bounded edit-distance queries, with a least-frequently-used
//! cache in front of the searches.
//!
//! # Architecture
//!
//! - [`index`] -- arena-allocated prefix tree (insert, remove, lookup)
//! - [`suggestion`] -- prefix completion and wildcard patterns
//! - [`fuzzy`] -- Levenshtein search with one DP row per tree depth
//! - [`cache`] -- query result cache with LFU eviction
//! - [`engine`] -- [`AutocompleteEngine`], tying the pieces together
//! - `baseline` -- sorted-array comparison point (feature `baseline`)
//!
//! ```
//! use wordtrie_engine::AutocompleteEngine;
//!
//! let mut engine = AutocompleteEngine::new();
//! engine.extend_words(["car", "cart", "care", "cat"]).unwrap();
//! assert_eq!(engine.suggest("car", 2), ["car", "care"]);
//! assert_eq!(engine.suggest("ca.", 10), ["car", "cat"]);
//! assert_eq!(engine.fuzzy_search("cax", 1, 10), ["car", "cat"]);
//! ```

pub mod cache;
pub mod engine;
pub mod fuzzy;
pub mod index;
pub mod suggestion;

#[cfg(feature = "baseline")]
pub mod baseline;

pub use cache::{CacheEntry, SuggestionCache};
pub use engine::{AutocompleteEngine, EngineOptions};
pub use fuzzy::{FuzzyMatch, FuzzyMatcher, edit_distance};
pub use index::{NodeId, TrieIndex};
pub use suggestion::{CompletionStatus, Pattern, PrefixSuggester, pattern_admits};

#[cfg(feature = "baseline")]
pub use baseline::SortedWordList;
