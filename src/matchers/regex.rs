//! Regex matcher - a fixed set of named patterns.

use super::{Matcher, PatternError};
use crate::types::{Match, MatchKind};
use ::regex::Regex;

/// The named patterns and their sources. Kept small on purpose: regexes
/// are a coarse net, and every hit still competes in the combiner.
const PATTERNS: [(&str, &str); 1] = [("recent_year", r"19\d\d|20[0-2]\d")];

/// Evaluates the fixed named patterns against the password.
pub struct RegexMatcher {
    patterns: Vec<(&'static str, Regex)>,
}

impl RegexMatcher {
    /// Compiles the pattern set.
    ///
    /// # Errors
    ///
    /// Returns `PatternError::InvalidRegex` if a pattern fails to compile.
    pub fn new() -> Result<Self, PatternError> {
        let mut patterns = Vec::with_capacity(PATTERNS.len());
        for (name, source) in PATTERNS {
            let regex = Regex::new(source)
                .map_err(|source| PatternError::InvalidRegex { name, source })?;
            patterns.push((name, regex));
        }
        Ok(RegexMatcher { patterns })
    }
}

impl Matcher for RegexMatcher {
    fn matches(&self, password: &str) -> Vec<Match> {
        // Byte offset of each char, for mapping regex spans to char indices.
        let byte_to_char: std::collections::HashMap<usize, usize> = password
            .char_indices()
            .enumerate()
            .map(|(ci, (bi, _))| (bi, ci))
            .collect();

        let mut out = Vec::new();
        for (name, regex) in &self.patterns {
            for found in regex.find_iter(password) {
                let Some(&start) = byte_to_char.get(&found.start()) else {
                    continue;
                };
                let len = found.as_str().chars().count();
                out.push(Match {
                    start,
                    end: start + len - 1,
                    token: found.as_str().to_string(),
                    kind: MatchKind::Regex { name },
                    guesses: 0.0,
                });
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_year_is_matched() {
        let matcher = RegexMatcher::new().expect("patterns compile");
        let matches = matcher.matches("born1987ok");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].token, "1987");
        assert_eq!(matches[0].start, 4);
        assert_eq!(matches[0].end, 7);
        assert_eq!(matches[0].kind, MatchKind::Regex { name: "recent_year" });
    }

    #[test]
    fn test_two_thousands_years() {
        let matcher = RegexMatcher::new().expect("patterns compile");
        assert_eq!(matcher.matches("2023").len(), 1);
        assert_eq!(matcher.matches("2029").len(), 1);
        // Outside the recognized range.
        assert!(matcher.matches("2099").is_empty());
    }

    #[test]
    fn test_char_indices_with_multibyte_prefix() {
        let matcher = RegexMatcher::new().expect("patterns compile");
        let matches = matcher.matches("é2019");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].start, 1);
        assert_eq!(matches[0].end, 4);
    }

    #[test]
    fn test_no_year_no_match() {
        let matcher = RegexMatcher::new().expect("patterns compile");
        assert!(matcher.matches("no digits here").is_empty());
    }
}
