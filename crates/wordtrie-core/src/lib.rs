//! Shared types for the wordtrie autocomplete engine.
//!
//! - [`alphabet`] -- the 26-letter alphabet and letter sets
//! - [`enums`] -- query classification and default limits
//! - [`error`] -- word and pattern errors
//! - [`metrics`] -- elementary-operation counters for read paths

pub mod alphabet;
pub mod enums;
pub mod error;
pub mod metrics;

pub use alphabet::{ALPHABET_SIZE, Letter, LetterSet, MAX_WORD_LEN};
pub use enums::QueryKind;
pub use error::{PatternError, WordError};
pub use metrics::{CountingMetrics, Metrics, NoopMetrics, Operation};
