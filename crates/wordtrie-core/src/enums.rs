// Shared enums: query classification and defaults

/// Default number of suggestions returned by a query.
pub const DEFAULT_LIMIT: usize = 10;

/// Default maximum edit distance for fuzzy search.
pub const DEFAULT_MAX_DISTANCE: usize = 1;

/// Default number of cached queries.
pub const DEFAULT_CACHE_CAPACITY: usize = 10;

/// Which search produced a cached result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// Plain prefix completion.
    Prefix,
    /// Wildcard pattern (`.`, `[set]`, `[^set]`).
    Pattern,
    /// Bounded edit-distance search.
    Fuzzy { max_distance: usize },
}

impl QueryKind {
    /// Classify a `suggest` query: any `.` or `[` switches to pattern mode.
    pub fn classify(query: &str) -> QueryKind {
        if has_wildcard(query) {
            QueryKind::Pattern
        } else {
            QueryKind::Prefix
        }
    }
}

/// Returns `true` if the query uses wildcard syntax.
pub fn has_wildcard(query: &str) -> bool {
    query.contains(['.', '['])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_queries_are_prefixes() {
        assert_eq!(QueryKind::classify("app"), QueryKind::Prefix);
        assert_eq!(QueryKind::classify(""), QueryKind::Prefix);
    }

    #[test]
    fn dot_or_bracket_selects_pattern_mode() {
        assert_eq!(QueryKind::classify("a.c"), QueryKind::Pattern);
        assert_eq!(QueryKind::classify("a[bc]"), QueryKind::Pattern);
        assert_eq!(QueryKind::classify("[^x"), QueryKind::Pattern);
    }

    #[test]
    fn lone_closing_bracket_or_caret_is_not_a_wildcard() {
        assert!(!has_wildcard("a]b"));
        assert!(!has_wildcard("a^b"));
    }
}
