//! Pattern matchers.
//!
//! Each matcher proposes candidate explanations for substrings of the
//! password. Matchers are stateless (or hold only read-only reference
//! data), produce overlapping candidates freely, and never resolve overlap
//! themselves; the combiner in `scoring` does that.

mod date;
mod dictionary;
mod l33t;
mod regex;
mod repeat;
mod sequence;
mod spatial;

pub use date::DateMatcher;
pub use dictionary::{DictionaryMatcher, ReverseDictionaryMatcher};
pub use l33t::{L33tMatcher, MAX_L33T_VARIANTS};
pub use regex::RegexMatcher;
pub use repeat::RepeatMatcher;
pub use sequence::SequenceMatcher;
pub use spatial::SpatialMatcher;

use crate::dictionary::RankedDictionary;
use crate::types::Match;
use std::sync::Arc;
use thiserror::Error;

/// A pattern matcher: given a password, produce zero or more candidate
/// matches. Order of results is unspecified.
pub trait Matcher: Send + Sync {
    fn matches(&self, password: &str) -> Vec<Match>;
}

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Invalid {name} pattern: {source}")]
    InvalidRegex {
        name: &'static str,
        source: ::regex::Error,
    },
}

/// Builds the full built-in matcher set over the given ranked word lists:
/// one plain and one reverse dictionary matcher per list, a leet wrapper
/// over all lists, and one of each structural matcher.
pub fn default_matchers(
    dictionaries: &[Arc<RankedDictionary>],
) -> Result<Vec<Box<dyn Matcher>>, PatternError> {
    let mut matchers: Vec<Box<dyn Matcher>> = Vec::new();
    for dict in dictionaries {
        matchers.push(Box::new(DictionaryMatcher::new(Arc::clone(dict))));
    }
    for dict in dictionaries {
        matchers.push(Box::new(ReverseDictionaryMatcher::new(Arc::clone(dict))));
    }
    matchers.push(Box::new(L33tMatcher::new(
        dictionaries
            .iter()
            .map(|d| DictionaryMatcher::new(Arc::clone(d)))
            .collect(),
    )));
    matchers.push(Box::new(RepeatMatcher::new()));
    matchers.push(Box::new(SequenceMatcher::new()));
    matchers.push(Box::new(RegexMatcher::new()?));
    matchers.push(Box::new(DateMatcher::new()?));
    matchers.push(Box::new(SpatialMatcher::new()));
    Ok(matchers)
}

/// Builds the per-call matchers over caller-supplied identifying terms:
/// the synthesized user-input list and its leet wrapper.
pub fn user_input_matchers(terms: &[String]) -> Vec<Box<dyn Matcher>> {
    let dict = Arc::new(RankedDictionary::user_inputs(terms));
    vec![
        Box::new(DictionaryMatcher::new(Arc::clone(&dict))),
        Box::new(L33tMatcher::new(vec![DictionaryMatcher::new(dict)])),
    ]
}

/// Per-char lowercasing that preserves char indices (multi-char foldings
/// like `ß` keep their first char rather than shifting positions).
pub(crate) fn lowercase_chars(chars: &[char]) -> Vec<char> {
    chars
        .iter()
        .map(|c| c.to_lowercase().next().unwrap_or(*c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matchers_cover_all_kinds() {
        let dict = Arc::new(
            RankedDictionary::from_ordered_words("passwords", ["password"]).expect("valid"),
        );
        let matchers = default_matchers(&[dict]).expect("patterns compile");
        // dictionary + reverse + l33t + repeat + sequence + regex + date + spatial
        assert_eq!(matchers.len(), 8);
    }

    #[test]
    fn test_user_input_matchers_find_terms() {
        let matchers = user_input_matchers(&["rosebud".to_string()]);
        let found: Vec<Match> = matchers
            .iter()
            .flat_map(|m| m.matches("myrosebud"))
            .collect();
        assert!(found.iter().any(|m| m.token == "rosebud"));
    }

    #[test]
    fn test_lowercase_preserves_indices() {
        let chars: Vec<char> = "AßC".chars().collect();
        let lower = lowercase_chars(&chars);
        assert_eq!(lower.len(), chars.len());
        assert_eq!(lower[0], 'a');
        assert_eq!(lower[2], 'c');
    }
}
