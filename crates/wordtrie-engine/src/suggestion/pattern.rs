// Wildcard completion: `.`, `[set]` and `[^set]` matched against the trie
//
// The pattern is scanned left to right. Literal characters follow a single
// child. Each wildcard token fans out over every admissible existing child
// and resumes matching the rest of the pattern from there in its own
// recursive call. Bracket expressions are parsed lazily when the scan
// reaches them, so a malformed bracket only ends the branches that get that
// far.
//
// A pattern matches whole words: a word is emitted only when the pattern is
// exhausted exactly at a terminal node.

use wordtrie_core::alphabet::{Letter, LetterSet};
use wordtrie_core::error::PatternError;
use wordtrie_core::metrics::{Metrics, Operation};

use crate::index::{NodeId, TrieIndex};

use super::status::CompletionStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Literal(char),
    Any,
    Class(LetterSet),
}

impl Token {
    fn matches(self, c: char) -> bool {
        match self {
            Token::Literal(l) => l == c,
            Token::Any => Letter::from_char(c).is_some(),
            Token::Class(set) => Letter::from_char(c).is_some_and(|l| set.contains(l)),
        }
    }
}

/// Parse the token starting at `pos`.
///
/// Returns `Ok(None)` at the end of the pattern, otherwise the token and the
/// position just past it.
fn next_token(pattern: &[char], pos: usize) -> Result<Option<(Token, usize)>, PatternError> {
    let Some(&c) = pattern.get(pos) else {
        return Ok(None);
    };
    match c {
        '.' => Ok(Some((Token::Any, pos + 1))),
        '[' => {
            let mut start = pos + 1;
            let negated = pattern.get(start) == Some(&'^');
            if negated {
                start += 1;
            }
            let Some(offset) = pattern[start.min(pattern.len())..]
                .iter()
                .position(|&ch| ch == ']')
            else {
                return Err(if negated {
                    PatternError::UnclosedNegation { position: pos }
                } else {
                    PatternError::UnclosedBracket { position: pos }
                });
            };
            let end = start + offset;
            let set = LetterSet::from_chars(pattern[start..end].iter().copied());
            let set = if negated { set.complement() } else { set };
            Ok(Some((Token::Class(set), end + 1)))
        }
        other => Ok(Some((Token::Literal(other), pos + 1))),
    }
}

/// A wildcard pattern, usable to test single words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    chars: Vec<char>,
}

impl Pattern {
    pub fn new(pattern: &str) -> Self {
        Self {
            chars: pattern.chars().collect(),
        }
    }

    /// Check every bracket expression in the pattern.
    pub fn validate(&self) -> Result<(), PatternError> {
        let mut pos = 0;
        while let Some((_, next)) = next_token(&self.chars, pos)? {
            pos = next;
        }
        Ok(())
    }

    /// Returns `Ok(true)` if `word` matches the whole pattern.
    ///
    /// As in the trie search, a malformed bracket is only reported if the
    /// word matches everything before it.
    pub fn admits(&self, word: &str) -> Result<bool, PatternError> {
        let mut chars = word.chars();
        let mut pos = 0;
        loop {
            match next_token(&self.chars, pos)? {
                None => return Ok(chars.next().is_none()),
                Some((token, next)) => {
                    match chars.next() {
                        Some(c) if token.matches(c) => pos = next,
                        _ => return Ok(false),
                    }
                }
            }
        }
    }
}

/// Returns `true` if `word` matches `pattern`. Malformed patterns admit
/// nothing.
pub fn pattern_admits(pattern: &str, word: &str) -> bool {
    Pattern::new(pattern).admits(word).unwrap_or(false)
}

/// Collect stored words matching `pattern`, searching from the root.
pub fn complete_pattern(
    index: &TrieIndex,
    pattern: &str,
    status: &mut CompletionStatus,
    metrics: &mut dyn Metrics,
) {
    let chars: Vec<char> = pattern.chars().collect();
    let mut buf = String::new();
    search(index, &chars, 0, index.root(), &mut buf, status, metrics);
}

fn search(
    index: &TrieIndex,
    pattern: &[char],
    mut pos: usize,
    mut node: NodeId,
    buf: &mut String,
    status: &mut CompletionStatus,
    metrics: &mut dyn Metrics,
) {
    if status.is_full() {
        return;
    }
    metrics.record(Operation::NodeVisit);
    let base_len = buf.len();

    loop {
        match next_token(pattern, pos) {
            Err(error) => {
                status.report(error);
                break;
            }
            Ok(None) => {
                if index.is_terminal(node) {
                    status.push(buf.clone());
                }
                break;
            }
            Ok(Some((Token::Literal(c), next))) => {
                metrics.record(Operation::EdgeProbe);
                match Letter::from_char(c).and_then(|l| index.child(node, l)) {
                    Some(child) => {
                        buf.push(c);
                        node = child;
                        pos = next;
                    }
                    None => break,
                }
            }
            Ok(Some((Token::Any, next))) => {
                branch(index, pattern, next, node, LetterSet::full(), buf, status, metrics);
                break;
            }
            Ok(Some((Token::Class(set), next))) => {
                branch(index, pattern, next, node, set, buf, status, metrics);
                break;
            }
        }
    }

    buf.truncate(base_len);
}

/// Resume the search at `next` from every child of `node` whose letter is
/// in `set`.
#[allow(clippy::too_many_arguments)]
fn branch(
    index: &TrieIndex,
    pattern: &[char],
    next: usize,
    node: NodeId,
    set: LetterSet,
    buf: &mut String,
    status: &mut CompletionStatus,
    metrics: &mut dyn Metrics,
) {
    for letter in set.iter() {
        metrics.record(Operation::EdgeProbe);
        if let Some(child) = index.child(node, letter) {
            buf.push(letter.as_char());
            search(index, pattern, next, child, buf, status, metrics);
            buf.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordtrie_core::metrics::NoopMetrics;

    const PATTERN_WORDS: &[&str] = &[
        "abefg", "abcdef", "abefh", "acefg", "acefhi", "acebh", "acefh", "adefh", "aeefg",
        "ajefh", "axefyz", "aaefaa",
    ];

    fn index_of(words: &[&str]) -> TrieIndex {
        words.iter().collect()
    }

    fn run(index: &TrieIndex, pattern: &str, limit: usize) -> CompletionStatus {
        let mut status = CompletionStatus::new(limit);
        complete_pattern(index, pattern, &mut status, &mut NoopMetrics);
        status
    }

    fn matches(index: &TrieIndex, pattern: &str, limit: usize) -> Vec<String> {
        run(index, pattern, limit).into_results()
    }

    #[test]
    fn inclusion_brackets() {
        let index = index_of(PATTERN_WORDS);
        assert_eq!(
            matches(&index, "a[bcd]ef[gh]", 10),
            ["abefg", "abefh", "acefg", "acefh", "adefh"]
        );
    }

    #[test]
    fn exclusion_brackets() {
        let index = index_of(PATTERN_WORDS);
        assert_eq!(matches(&index, "a[^bcd]ef[gh]", 10), ["aeefg", "ajefh"]);
    }

    #[test]
    fn dots_match_exactly_one_letter() {
        let index = index_of(PATTERN_WORDS);
        assert_eq!(
            matches(&index, "a.ef..", 10),
            ["aaefaa", "acefhi", "axefyz"]
        );
        assert_eq!(
            matches(&index, "a.ef.", 10),
            ["abefg", "abefh", "acefg", "acefh", "adefh", "aeefg", "ajefh"]
        );
    }

    #[test]
    fn limit_applies_across_branches() {
        let index = index_of(PATTERN_WORDS);
        assert_eq!(matches(&index, "a[bcd]ef[gh]", 3), ["abefg", "abefh", "acefg"]);
    }

    #[test]
    fn bracket_listing_order_does_not_matter() {
        let index = index_of(PATTERN_WORDS);
        assert_eq!(
            matches(&index, "a[dcb]ef[hg]", 10),
            matches(&index, "a[bcd]ef[gh]", 10)
        );
    }

    #[test]
    fn empty_and_negated_empty_brackets() {
        let index = index_of(&["ab", "ac"]);
        assert!(matches(&index, "a[]", 10).is_empty());
        assert_eq!(matches(&index, "a[^]", 10), ["ab", "ac"]);
    }

    #[test]
    fn unclosed_bracket_is_reported() {
        let index = index_of(PATTERN_WORDS);
        let status = run(&index, "a.e[fg", 10);
        assert!(status.results().is_empty());
        assert_eq!(status.errors(), [PatternError::UnclosedBracket { position: 3 }]);
    }

    #[test]
    fn unclosed_negation_is_reported() {
        let index = index_of(PATTERN_WORDS);
        let status = run(&index, "a[^bc", 10);
        assert_eq!(status.errors(), [PatternError::UnclosedNegation { position: 1 }]);
    }

    #[test]
    fn bracket_at_end_is_unclosed() {
        let index = index_of(&["ab"]);
        let status = run(&index, "ab[", 10);
        assert_eq!(status.errors(), [PatternError::UnclosedBracket { position: 2 }]);
    }

    #[test]
    fn malformed_bracket_unreached_is_silent() {
        let index = index_of(&["ab"]);
        let status = run(&index, "zz[a", 10);
        assert!(status.results().is_empty());
        assert!(status.errors().is_empty());
    }

    #[test]
    fn non_letter_literal_kills_branch() {
        let index = index_of(&["ab"]);
        assert!(matches(&index, "a.]", 10).is_empty());
        assert!(matches(&index, "A.", 10).is_empty());
    }

    #[test]
    fn pattern_admits_single_words() {
        assert!(pattern_admits("a[bcd]ef[gh]", "acefh"));
        assert!(!pattern_admits("a[bcd]ef[gh]", "aeefh"));
        assert!(pattern_admits("a[^bcd]ef[gh]", "aeefh"));
        assert!(pattern_admits("a.ef..", "axefyz"));
        assert!(!pattern_admits("a.ef..", "axefy"));
        assert!(!pattern_admits("a.ef..", "axefyzz"));
        assert!(!pattern_admits("a[bc", "ab"));
    }

    #[test]
    fn validate_finds_unreached_errors() {
        assert!(Pattern::new("a[bc]d.").validate().is_ok());
        assert_eq!(
            Pattern::new("zz[a").validate(),
            Err(PatternError::UnclosedBracket { position: 2 })
        );
        assert_eq!(
            Pattern::new("[^").validate(),
            Err(PatternError::UnclosedNegation { position: 0 })
        );
    }

    #[test]
    fn admits_reports_error_only_when_reached() {
        let pattern = Pattern::new("ab[c");
        assert_eq!(pattern.admits("xy"), Ok(false));
        assert_eq!(
            pattern.admits("abc"),
            Err(PatternError::UnclosedBracket { position: 2 })
        );
    }
}
