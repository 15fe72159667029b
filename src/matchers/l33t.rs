//! L33t matcher - dictionary matching through leet-speak substitutions.

use super::{DictionaryMatcher, Matcher};
use crate::types::{Match, MatchKind};

/// Upper bound on de-substitution variants tried per password, so symbol
/// heavy inputs stay cheap. Enumeration order is deterministic, so the cap
/// always keeps the same variants.
pub const MAX_L33T_VARIANTS: usize = 64;

/// Substitutable letters and the symbols commonly used for them.
const L33T_TABLE: [(char, &[char]); 12] = [
    ('a', &['4', '@']),
    ('b', &['8']),
    ('c', &['(', '{', '[', '<']),
    ('e', &['3']),
    ('g', &['6', '9']),
    ('i', &['1', '!', '|']),
    ('l', &['1', '|', '7']),
    ('o', &['0']),
    ('s', &['$', '5']),
    ('t', &['+', '7']),
    ('x', &['%']),
    ('z', &['2']),
];

/// Wraps one or more dictionary matchers and re-runs them on de-leeted
/// variants of the password.
pub struct L33tMatcher {
    dictionaries: Vec<DictionaryMatcher>,
}

impl L33tMatcher {
    pub fn new(dictionaries: Vec<DictionaryMatcher>) -> Self {
        L33tMatcher { dictionaries }
    }
}

/// For each substitutable symbol present in the password, the letters it
/// could stand for, in table order.
fn relevant_substitutions(password: &str) -> Vec<(char, Vec<char>)> {
    let mut subs: Vec<(char, Vec<char>)> = Vec::new();
    for &(letter, symbols) in &L33T_TABLE {
        for &symbol in symbols {
            if !password.contains(symbol) {
                continue;
            }
            match subs.iter_mut().find(|(s, _)| *s == symbol) {
                Some((_, letters)) => letters.push(letter),
                None => subs.push((symbol, vec![letter])),
            }
        }
    }
    subs.sort_by_key(|&(symbol, _)| symbol);
    subs
}

/// All consistent assignments of present symbols to letters, capped at
/// [`MAX_L33T_VARIANTS`].
fn enumerate_assignments(subs: &[(char, Vec<char>)]) -> Vec<Vec<(char, char)>> {
    let mut assignments: Vec<Vec<(char, char)>> = vec![Vec::new()];
    for (symbol, letters) in subs {
        let mut next = Vec::new();
        for assignment in &assignments {
            for &letter in letters {
                if next.len() == MAX_L33T_VARIANTS {
                    break;
                }
                let mut extended = assignment.clone();
                extended.push((*symbol, letter));
                next.push(extended);
            }
        }
        assignments = next;
    }
    assignments
}

impl Matcher for L33tMatcher {
    fn matches(&self, password: &str) -> Vec<Match> {
        let subs = relevant_substitutions(password);
        if subs.is_empty() {
            return Vec::new();
        }
        let chars: Vec<char> = password.chars().collect();

        let mut out: Vec<Match> = Vec::new();
        for assignment in enumerate_assignments(&subs) {
            let translated: String = chars
                .iter()
                .map(|&c| {
                    assignment
                        .iter()
                        .find(|&&(symbol, _)| symbol == c)
                        .map(|&(_, letter)| letter)
                        .unwrap_or(c)
                })
                .collect();

            for dictionary in &self.dictionaries {
                for m in dictionary.matches(&translated) {
                    // Single characters produce too much noise, and tokens
                    // without any substituted symbol are already covered by
                    // the plain dictionary matcher.
                    if m.end == m.start {
                        continue;
                    }
                    let token: String = chars[m.start..=m.end].iter().collect();
                    let mut used: Vec<(char, char)> = assignment
                        .iter()
                        .filter(|&&(symbol, _)| token.contains(symbol))
                        .copied()
                        .collect();
                    if used.is_empty() {
                        continue;
                    }
                    used.sort_unstable();

                    let (dictionary_name, rank) = match &m.kind {
                        MatchKind::Dictionary {
                            dictionary, rank, ..
                        } => (dictionary.clone(), *rank),
                        _ => continue,
                    };
                    let candidate = Match {
                        start: m.start,
                        end: m.end,
                        token,
                        kind: MatchKind::Dictionary {
                            dictionary: dictionary_name,
                            rank,
                            reversed: false,
                            l33t: true,
                            substitutions: used,
                        },
                        guesses: 0.0,
                    };
                    if !out.contains(&candidate) {
                        out.push(candidate);
                    }
                }
            }
        }
        out
    }
}
