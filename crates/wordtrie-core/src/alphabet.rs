// Alphabet handling: letter offsets and letter sets
//
// The trie keys every child slot by a `Letter`. Traversal code only goes
// through `Letter::from_char`, `Letter::ALL` and `Letter::as_char`, so the
// alphabet can be swapped here without touching the search algorithms.

/// Number of letters in the alphabet (`a` through `z`).
pub const ALPHABET_SIZE: usize = 26;

/// Longest word the index accepts.
///
/// Trie walks recurse once per letter, so this also bounds their stack depth.
pub const MAX_WORD_LEN: usize = 256;

/// A single lowercase ASCII letter, stored as its offset from `'a'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Letter(u8);

impl Letter {
    /// All letters in ascending order.
    pub const ALL: [Letter; ALPHABET_SIZE] = {
        let mut all = [Letter(0); ALPHABET_SIZE];
        let mut i = 0;
        while i < ALPHABET_SIZE {
            all[i] = Letter(i as u8);
            i += 1;
        }
        all
    };

    /// Map a character to its letter, or `None` if it is outside `a..=z`.
    #[inline]
    pub fn from_char(c: char) -> Option<Letter> {
        if c.is_ascii_lowercase() {
            Some(Letter(c as u8 - b'a'))
        } else {
            None
        }
    }

    /// Slot index of this letter (0 for `a`, 25 for `z`).
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn as_char(self) -> char {
        (b'a' + self.0) as char
    }
}

/// Returns the offset of the first character outside the alphabet, if any.
pub fn first_invalid(word: &str) -> Option<(usize, char)> {
    word.chars()
        .enumerate()
        .find(|&(_, c)| Letter::from_char(c).is_none())
}

/// Convert a word to letters, stopping at the first invalid character.
///
/// Returns `None` if any character is outside the alphabet.
pub fn to_letters(word: &str) -> Option<Vec<Letter>> {
    word.chars().map(Letter::from_char).collect()
}

/// A set of letters, stored as a 26-bit mask.
///
/// Iteration always yields letters in ascending order, regardless of the
/// order they were added in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LetterSet(u32);

impl LetterSet {
    const FULL_MASK: u32 = (1 << ALPHABET_SIZE) - 1;

    /// The empty set.
    pub const fn empty() -> Self {
        LetterSet(0)
    }

    /// The set of all 26 letters.
    pub const fn full() -> Self {
        LetterSet(Self::FULL_MASK)
    }

    /// Build a set from the alphabet characters of `chars`.
    ///
    /// Characters outside the alphabet are ignored.
    pub fn from_chars<I: IntoIterator<Item = char>>(chars: I) -> Self {
        let mut set = LetterSet::empty();
        for c in chars {
            if let Some(letter) = Letter::from_char(c) {
                set.insert(letter);
            }
        }
        set
    }

    pub fn insert(&mut self, letter: Letter) {
        self.0 |= 1 << letter.index();
    }

    pub fn contains(self, letter: Letter) -> bool {
        self.0 & (1 << letter.index()) != 0
    }

    /// Every letter not in this set.
    pub fn complement(self) -> Self {
        LetterSet(!self.0 & Self::FULL_MASK)
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the members in ascending order.
    pub fn iter(self) -> impl Iterator<Item = Letter> {
        Letter::ALL.into_iter().filter(move |&l| self.contains(l))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_round_trips_through_char() {
        for c in 'a'..='z' {
            let letter = Letter::from_char(c).unwrap();
            assert_eq!(letter.as_char(), c);
        }
    }

    #[test]
    fn letter_indices_follow_alphabet() {
        assert_eq!(Letter::from_char('a').unwrap().index(), 0);
        assert_eq!(Letter::from_char('z').unwrap().index(), 25);
        assert_eq!(Letter::ALL[7].as_char(), 'h');
    }

    #[test]
    fn non_letters_are_rejected() {
        for c in ['A', 'Z', '.', '[', ' ', '0', '\u{00E4}'] {
            assert!(Letter::from_char(c).is_none(), "{c:?} should be rejected");
        }
    }

    #[test]
    fn first_invalid_reports_position() {
        assert_eq!(first_invalid("apple"), None);
        assert_eq!(first_invalid("apPle"), Some((2, 'P')));
        assert_eq!(first_invalid(""), None);
        assert_eq!(first_invalid("two words"), Some((3, ' ')));
    }

    #[test]
    fn to_letters_converts_whole_word() {
        let letters = to_letters("abc").unwrap();
        assert_eq!(letters.iter().map(|l| l.index()).collect::<Vec<_>>(), [0, 1, 2]);
        assert!(to_letters("a-b").is_none());
    }

    #[test]
    fn letter_set_iterates_in_ascending_order() {
        let set = LetterSet::from_chars("dcb".chars());
        let letters: String = set.iter().map(Letter::as_char).collect();
        assert_eq!(letters, "bcd");
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn letter_set_ignores_duplicates_and_non_letters() {
        let set = LetterSet::from_chars("aa^-a".chars());
        assert_eq!(set.len(), 1);
        assert!(set.contains(Letter::from_char('a').unwrap()));
    }

    #[test]
    fn letter_set_complement() {
        let set = LetterSet::from_chars("bcd".chars());
        let complement = set.complement();
        assert_eq!(complement.len(), 23);
        assert!(!complement.contains(Letter::from_char('c').unwrap()));
        assert!(complement.contains(Letter::from_char('e').unwrap()));
        assert_eq!(LetterSet::empty().complement(), LetterSet::full());
        assert!(LetterSet::full().complement().is_empty());
    }
}
