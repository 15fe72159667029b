//! Dictionary matchers - ranked word-list lookups over every substring.

use super::{lowercase_chars, Matcher};
use crate::dictionary::RankedDictionary;
use crate::types::{Match, MatchKind};
use std::sync::Arc;

/// Finds every substring of the lowercased password that appears in one
/// ranked word list.
pub struct DictionaryMatcher {
    dictionary: Arc<RankedDictionary>,
}

impl DictionaryMatcher {
    pub fn new(dictionary: Arc<RankedDictionary>) -> Self {
        DictionaryMatcher { dictionary }
    }
}

impl Matcher for DictionaryMatcher {
    fn matches(&self, password: &str) -> Vec<Match> {
        let chars: Vec<char> = password.chars().collect();
        let lower = lowercase_chars(&chars);
        let mut out = Vec::new();
        for i in 0..chars.len() {
            let mut word = String::new();
            for j in i..chars.len() {
                word.push(lower[j]);
                if let Some(rank) = self.dictionary.rank_of(&word) {
                    out.push(Match {
                        start: i,
                        end: j,
                        token: chars[i..=j].iter().collect(),
                        kind: MatchKind::Dictionary {
                            dictionary: self.dictionary.name().to_string(),
                            rank,
                            reversed: false,
                            l33t: false,
                            substitutions: Vec::new(),
                        },
                        guesses: 0.0,
                    });
                }
            }
        }
        out
    }
}

/// Runs dictionary matching against the reversed password and maps hits
/// back to original coordinates.
pub struct ReverseDictionaryMatcher {
    inner: DictionaryMatcher,
}

impl ReverseDictionaryMatcher {
    pub fn new(dictionary: Arc<RankedDictionary>) -> Self {
        ReverseDictionaryMatcher {
            inner: DictionaryMatcher::new(dictionary),
        }
    }
}

impl Matcher for ReverseDictionaryMatcher {
    fn matches(&self, password: &str) -> Vec<Match> {
        let n = password.chars().count();
        let reversed: String = password.chars().rev().collect();
        self.inner
            .matches(&reversed)
            .into_iter()
            .map(|mut m| {
                let start = n - 1 - m.end;
                let end = n - 1 - m.start;
                m.start = start;
                m.end = end;
                m.token = m.token.chars().rev().collect();
                if let MatchKind::Dictionary { reversed, .. } = &mut m.kind {
                    *reversed = true;
                }
                m
            })
            .collect()
    }
}
