//! Sequence combiner and score mapping.
//!
//! The combiner searches over all candidate matches for the decomposition
//! of the whole password that minimizes total estimated guesses, filling
//! uncovered spans with per-character bruteforce. The score mapper folds
//! the resulting guess count onto the 0-4 scale.

use crate::estimate::{bruteforce_guesses, char_class_size, MIN_GUESSES};
use crate::types::{CrackTimes, Match, MatchKind, Score};
use std::collections::BTreeMap;

/// Guess thresholds for the 0-4 score, in ascending order. Below the first
/// threshold scores 0; at or above the last scores 4.
pub const SCORE_THRESHOLD_WEAK: f64 = 1.0e3;
pub const SCORE_THRESHOLD_FAIR: f64 = 1.0e6;
pub const SCORE_THRESHOLD_STRONG: f64 = 1.0e8;
pub const SCORE_THRESHOLD_VERY_STRONG: f64 = 1.0e10;

/// Maps a guess count onto the 0-4 scale.
pub fn score_from_guesses(guesses: f64) -> Score {
    if guesses < SCORE_THRESHOLD_WEAK {
        Score::Trivial
    } else if guesses < SCORE_THRESHOLD_FAIR {
        Score::Weak
    } else if guesses < SCORE_THRESHOLD_STRONG {
        Score::Fair
    } else if guesses < SCORE_THRESHOLD_VERY_STRONG {
        Score::Strong
    } else {
        Score::VeryStrong
    }
}

/// Fixed attacker speeds for the coarse crack-time estimates.
pub const ONLINE_THROTTLED_PER_SECOND: f64 = 100.0 / 3600.0;
pub const ONLINE_UNTHROTTLED_PER_SECOND: f64 = 10.0;
pub const OFFLINE_SLOW_HASH_PER_SECOND: f64 = 1.0e4;
pub const OFFLINE_FAST_HASH_PER_SECOND: f64 = 1.0e10;

/// Seconds to exhaust `guesses` under each attacker model.
pub fn crack_times(guesses: f64) -> CrackTimes {
    CrackTimes {
        online_throttled_secs: guesses / ONLINE_THROTTLED_PER_SECOND,
        online_unthrottled_secs: guesses / ONLINE_UNTHROTTLED_PER_SECOND,
        offline_slow_hash_secs: guesses / OFFLINE_SLOW_HASH_PER_SECOND,
        offline_fast_hash_secs: guesses / OFFLINE_FAST_HASH_PER_SECOND,
    }
}

#[derive(Clone)]
enum Step {
    /// The character at this position was bruteforced.
    Char,
    /// This match ends at this position.
    Use(Match),
}

/// Finds the decomposition of `password` minimizing total guesses.
///
/// Dynamic program over prefix end positions. Each state additionally
/// tracks how many pattern matches the path used, because an attacker who
/// does not know where pattern boundaries fall pays a correction that
/// grows with the match count: the l-th match on a path multiplies its
/// cost by l (a lone match pays no correction). Bruteforced characters
/// carry no correction, so the all-bruteforce path always bounds the
/// result from above. Ties prefer fewer, then longer, matches.
pub(crate) fn most_guessable_decomposition(
    password: &str,
    candidates: Vec<Match>,
) -> (Vec<Match>, f64) {
    let chars: Vec<char> = password.chars().collect();
    let n = chars.len();
    if n == 0 {
        return (Vec::new(), MIN_GUESSES);
    }

    let mut by_end: Vec<Vec<Match>> = vec![Vec::new(); n];
    for m in candidates {
        debug_assert!(m.start <= m.end && m.end < n, "match out of bounds");
        if m.start <= m.end && m.end < n {
            by_end[m.end].push(m);
        }
    }
    // Longer matches first, so they win ties at equal cost.
    for bucket in &mut by_end {
        bucket.sort_by_key(|m| m.start);
    }

    // optimal[k][l]: cheapest cover of chars[0..=k] using exactly l
    // pattern matches, with the step that got there.
    let mut optimal: Vec<BTreeMap<usize, (f64, Step)>> = vec![BTreeMap::new(); n];

    for k in 0..n {
        let mut updates: Vec<(usize, f64, Step)> = Vec::new();

        let class = char_class_size(chars[k]);
        if k == 0 {
            updates.push((0, class, Step::Char));
        } else {
            for (l, entry) in &optimal[k - 1] {
                updates.push((*l, entry.0 * class, Step::Char));
            }
        }

        for m in &by_end[k] {
            if m.start == 0 {
                updates.push((1, m.guesses, Step::Use(m.clone())));
            } else {
                for (l, entry) in &optimal[m.start - 1] {
                    let count = l + 1;
                    updates.push((
                        count,
                        entry.0 * m.guesses * count as f64,
                        Step::Use(m.clone()),
                    ));
                }
            }
        }

        let slot = &mut optimal[k];
        for (l, guesses, step) in updates {
            let better = match slot.get(&l) {
                Some((current, _)) => guesses < *current,
                None => true,
            };
            if better {
                slot.insert(l, (guesses, step));
            }
        }
    }

    // Cheapest full cover; ties resolve to the fewest matches because the
    // map iterates match counts in ascending order.
    let mut best: Option<(usize, f64)> = None;
    for (&l, entry) in &optimal[n - 1] {
        let better = match best {
            Some((_, g)) => entry.0 < g,
            None => true,
        };
        if better {
            best = Some((l, entry.0));
        }
    }
    let (mut count, total) = best.unwrap_or((0, bruteforce_guesses(password)));

    // Walk back-pointers, merging adjacent bruteforced chars.
    let mut reversed_sequence: Vec<Match> = Vec::new();
    let mut gap_end: Option<usize> = None;
    let mut pos = n as isize - 1;
    while pos >= 0 {
        let k = pos as usize;
        match optimal[k].get(&count).map(|(_, step)| step.clone()) {
            Some(Step::Char) | None => {
                gap_end.get_or_insert(k);
                pos -= 1;
            }
            Some(Step::Use(m)) => {
                if let Some(end) = gap_end.take() {
                    reversed_sequence.push(gap_match(&chars, k + 1, end));
                }
                pos = m.start as isize - 1;
                reversed_sequence.push(m);
                count -= 1;
            }
        }
    }
    if let Some(end) = gap_end.take() {
        reversed_sequence.push(gap_match(&chars, 0, end));
    }
    reversed_sequence.reverse();

    (reversed_sequence, total.max(MIN_GUESSES))
}

fn gap_match(chars: &[char], start: usize, end: usize) -> Match {
    let token: String = chars[start..=end].iter().collect();
    let guesses = bruteforce_guesses(&token);
    Match {
        start,
        end,
        token,
        kind: MatchKind::Bruteforce,
        guesses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(start: usize, end: usize, token: &str, guesses: f64) -> Match {
        Match {
            start,
            end,
            token: token.to_string(),
            kind: MatchKind::Sequence {
                ascending: true,
                space: 10,
            },
            guesses,
        }
    }

    #[test]
    fn test_empty_password() {
        let (sequence, guesses) = most_guessable_decomposition("", Vec::new());
        assert!(sequence.is_empty());
        assert_eq!(guesses, 1.0);
    }

    #[test]
    fn test_all_bruteforce_fallback() {
        let (sequence, guesses) = most_guessable_decomposition("a1!", Vec::new());
        assert_eq!(sequence.len(), 1);
        assert_eq!(sequence[0].kind, MatchKind::Bruteforce);
        assert_eq!(sequence[0].token, "a1!");
        assert_eq!(guesses, 26.0 * 10.0 * 33.0);
    }

    #[test]
    fn test_single_covering_match_pays_no_correction() {
        let m = candidate(0, 4, "12345", 20.0);
        let (sequence, guesses) = most_guessable_decomposition("12345", vec![m]);
        assert_eq!(sequence.len(), 1);
        assert_eq!(guesses, 20.0);
    }

    #[test]
    fn test_match_with_bruteforce_tail() {
        let m = candidate(0, 4, "12345", 20.0);
        let (sequence, guesses) = most_guessable_decomposition("12345xy", vec![m]);
        assert_eq!(sequence.len(), 2);
        assert_eq!(sequence[0].token, "12345");
        assert_eq!(sequence[1].kind, MatchKind::Bruteforce);
        assert_eq!(sequence[1].token, "xy");
        assert_eq!(guesses, 20.0 * 26.0 * 26.0);
    }

    #[test]
    fn test_cheap_match_beats_bruteforce() {
        let expensive = candidate(0, 4, "12345", 1.0e12);
        let (sequence, guesses) = most_guessable_decomposition("12345", vec![expensive]);
        // The match costs more than typing five digits blind; bruteforce
        // wins.
        assert_eq!(guesses, 1.0e5);
        assert_eq!(sequence.len(), 1);
        assert_eq!(sequence[0].kind, MatchKind::Bruteforce);
    }

    #[test]
    fn test_second_match_pays_correction() {
        let first = candidate(0, 2, "123", 12.0);
        let second = candidate(3, 5, "789", 50.0);
        let (sequence, guesses) = most_guessable_decomposition("123789", vec![first, second]);
        assert_eq!(sequence.len(), 2);
        // 12 * 50 * 2 for the second match's boundary correction.
        assert_eq!(guesses, 12.0 * 50.0 * 2.0);
    }

    #[test]
    fn test_fewer_matches_win_ties() {
        let whole = candidate(0, 3, "1234", 100.0);
        let left = candidate(0, 1, "12", 10.0);
        let right = candidate(2, 3, "34", 5.0);
        // Split path: 10 * 5 * 2 = 100, a tie with the whole-span match.
        let (sequence, guesses) =
            most_guessable_decomposition("1234", vec![whole, left, right]);
        assert_eq!(guesses, 100.0);
        assert_eq!(sequence.len(), 1);
        assert_eq!(sequence[0].token, "1234");
    }

    #[test]
    fn test_gap_between_matches_is_bridged() {
        let left = candidate(0, 2, "123", 12.0);
        let right = candidate(5, 7, "789", 12.0);
        let (sequence, _) = most_guessable_decomposition("123xx789", vec![left, right]);
        let kinds: Vec<&str> = sequence.iter().map(|m| m.kind.pattern_name()).collect();
        assert_eq!(kinds, vec!["sequence", "bruteforce", "sequence"]);
        assert_eq!(sequence[1].token, "xx");
    }

    #[test]
    fn test_structured_path_never_beats_its_own_span_bruteforced() {
        let m = candidate(0, 2, "111", 5.0);
        let (_, with_match) = most_guessable_decomposition("111", vec![m]);
        let (_, pure) = most_guessable_decomposition("111", Vec::new());
        assert!(with_match <= pure);
    }

    #[test]
    fn test_score_thresholds() {
        assert_eq!(score_from_guesses(0.0), Score::Trivial);
        assert_eq!(score_from_guesses(999.0), Score::Trivial);
        assert_eq!(score_from_guesses(1.0e3), Score::Weak);
        assert_eq!(score_from_guesses(1.0e6), Score::Fair);
        assert_eq!(score_from_guesses(1.0e8), Score::Strong);
        assert_eq!(score_from_guesses(1.0e10), Score::VeryStrong);
        assert_eq!(score_from_guesses(f64::INFINITY), Score::VeryStrong);
    }

    #[test]
    fn test_crack_times_are_linear_in_guesses() {
        let times = crack_times(1.0e4);
        assert_eq!(times.offline_slow_hash_secs, 1.0);
        assert_eq!(times.online_unthrottled_secs, 1.0e3);
        assert_eq!(times.offline_fast_hash_secs, 1.0e-6);
        assert!(times.online_throttled_secs > times.online_unthrottled_secs);
    }
}
