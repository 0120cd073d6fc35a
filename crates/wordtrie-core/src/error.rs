// Error types shared by the index, the suggesters and the command-line tools

use crate::alphabet::{MAX_WORD_LEN, first_invalid};

/// A word was refused by the index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WordError {
    #[error("invalid character {ch:?} at offset {position} in {word:?}")]
    InvalidCharacter {
        word: String,
        position: usize,
        ch: char,
    },

    /// The word is longer than [`MAX_WORD_LEN`]. The word itself is not kept.
    #[error("word of {len} letters exceeds the {max}-letter limit")]
    TooLong { len: usize, max: usize },
}

impl WordError {
    /// Validate `word` against the alphabet and the length limit.
    pub fn check(word: &str) -> Result<(), WordError> {
        if let Some((position, ch)) = first_invalid(word) {
            return Err(WordError::InvalidCharacter {
                word: word.to_string(),
                position,
                ch,
            });
        }
        // All ASCII from here on, so bytes are letters.
        if word.len() > MAX_WORD_LEN {
            return Err(WordError::TooLong {
                len: word.len(),
                max: MAX_WORD_LEN,
            });
        }
        Ok(())
    }
}

/// A malformed bracket expression in a wildcard query.
///
/// Positions are character offsets into the full query string, pointing at
/// the opening `[`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum PatternError {
    /// `[` with no closing `]` after it.
    #[error("bracket expression at offset {position} is missing its closing ']'")]
    UnclosedBracket { position: usize },

    /// `[^` with no closing `]` after it.
    #[error("negated bracket expression at offset {position} is missing its closing ']'")]
    UnclosedNegation { position: usize },
}

impl PatternError {
    pub fn position(&self) -> usize {
        match *self {
            PatternError::UnclosedBracket { position }
            | PatternError::UnclosedNegation { position } => position,
        }
    }
}
