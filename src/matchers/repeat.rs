//! Repeat matcher - a base token repeated two or more times.

use super::Matcher;
use crate::types::{Match, MatchKind};

/// Finds, at each start position, the longest span covered by an integer
/// number of repetitions of some base token, reporting the shortest base
/// that reproduces that span. The base token's own guesses are filled in
/// later by a recursive match-and-combine pass over just the base.
pub struct RepeatMatcher;

impl RepeatMatcher {
    pub fn new() -> Self {
        RepeatMatcher
    }
}

impl Default for RepeatMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher for RepeatMatcher {
    fn matches(&self, password: &str) -> Vec<Match> {
        let chars: Vec<char> = password.chars().collect();
        let n = chars.len();
        let mut out = Vec::new();

        let mut i = 0;
        while i < n {
            // (span, base_len) of the best repeat starting at i: widest
            // span first, then shortest base.
            let mut best: Option<(usize, usize)> = None;
            for base_len in 1..=(n - i) / 2 {
                let mut count = 1;
                while i + (count + 1) * base_len <= n
                    && chars[i + count * base_len..i + (count + 1) * base_len]
                        == chars[i..i + base_len]
                {
                    count += 1;
                }
                if count < 2 {
                    continue;
                }
                let span = count * base_len;
                let better = match best {
                    None => true,
                    Some((best_span, best_base)) => {
                        span > best_span || (span == best_span && base_len < best_base)
                    }
                };
                if better {
                    best = Some((span, base_len));
                }
            }

            match best {
                Some((span, base_len)) => {
                    out.push(Match {
                        start: i,
                        end: i + span - 1,
                        token: chars[i..i + span].iter().collect(),
                        kind: MatchKind::Repeat {
                            base_token: chars[i..i + base_len].iter().collect(),
                            base_guesses: 0.0,
                            repeat_count: span / base_len,
                        },
                        guesses: 0.0,
                    });
                    i += span;
                }
                None => i += 1,
            }
        }
        out
    }
}
