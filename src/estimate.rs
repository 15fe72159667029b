//! Guess estimation - per-pattern-kind formulas.
//!
//! Converts a match's structural properties into the number of guesses an
//! attacker working that pattern family would need. Guesses are the single
//! currency the combiner minimizes, so the formulas here must stay
//! consistent across kinds: a value of N always means "about N attempts".

use crate::types::{Match, MatchKind};

/// Fixed "now" for year-distance terms. A constant, not the wall clock, so
/// results are reproducible.
pub const REFERENCE_YEAR: i32 = 2025;
/// Smallest year distance credited to any date or year pattern.
pub const MIN_YEAR_SPACE: i32 = 20;

/// Guesses per day for a date's day and month fields.
const DAYS_PER_YEAR: f64 = 365.0;
/// Extra factor for dates written with a separator.
const DATE_SEPARATOR_FACTOR: f64 = 4.0;

/// Reversed tokens shorter than this get no reversal tax: flipping a
/// couple of characters is not a transformation an attacker has to search.
const MIN_REVERSED_TAX_LEN: usize = 4;

/// Every match explains at least one attempt.
pub const MIN_GUESSES: f64 = 1.0;

/// Smallest plausible character class sizes for the bruteforce floor.
pub const DIGIT_SPACE: f64 = 10.0;
pub const LOWERCASE_SPACE: f64 = 26.0;
pub const UPPERCASE_SPACE: f64 = 26.0;
pub const SYMBOL_SPACE: f64 = 33.0;
pub const UNICODE_SPACE: f64 = 100.0;

/// Size of the smallest plausible character class containing `c`.
pub fn char_class_size(c: char) -> f64 {
    if c.is_ascii_digit() {
        DIGIT_SPACE
    } else if c.is_ascii_lowercase() {
        LOWERCASE_SPACE
    } else if c.is_ascii_uppercase() {
        UPPERCASE_SPACE
    } else if c.is_ascii() {
        SYMBOL_SPACE
    } else {
        UNICODE_SPACE
    }
}

/// Guesses to bruteforce `token` one character class at a time. This is
/// the floor model: no pattern may cost more than exhaustive search.
pub fn bruteforce_guesses(token: &str) -> f64 {
    token
        .chars()
        .map(char_class_size)
        .fold(MIN_GUESSES, |acc, s| acc * s)
}

/// Fills in the guess estimate for a structural match. Repeat matches must
/// already carry their base guesses.
pub(crate) fn estimate_guesses(m: &Match) -> f64 {
    let guesses = match &m.kind {
        MatchKind::Dictionary {
            rank,
            reversed,
            l33t,
            substitutions,
            ..
        } => dictionary_guesses(&m.token, *rank, *reversed, *l33t, substitutions),
        MatchKind::Spatial {
            turns,
            shifted_count,
            starting_positions,
            average_degree,
            ..
        } => spatial_guesses(
            m.token_len(),
            *turns,
            *shifted_count,
            *starting_positions,
            *average_degree,
        ),
        MatchKind::Sequence { ascending, space } => {
            sequence_guesses(&m.token, *ascending, *space)
        }
        MatchKind::Repeat {
            base_guesses,
            repeat_count,
            ..
        } => base_guesses * *repeat_count as f64,
        MatchKind::Regex { name } => regex_guesses(name, &m.token),
        MatchKind::Date { separator, year, .. } => date_guesses(separator.is_some(), *year),
        MatchKind::Bruteforce => bruteforce_guesses(&m.token),
    };
    guesses.max(MIN_GUESSES)
}

fn dictionary_guesses(
    token: &str,
    rank: usize,
    reversed: bool,
    l33t: bool,
    substitutions: &[(char, char)],
) -> f64 {
    let mut guesses = rank as f64 * uppercase_variations(token);
    if l33t {
        guesses *= l33t_variations(substitutions, token);
    }
    if reversed && token.chars().count() >= MIN_REVERSED_TAX_LEN {
        guesses *= 2.0;
    }
    guesses
}

/// How many capitalization patterns the token's shape admits. The common
/// shapes (all-lower, all-caps, leading or trailing capital) cost little;
/// scattered capitals cost the full choice count.
pub(crate) fn uppercase_variations(token: &str) -> f64 {
    let chars: Vec<char> = token.chars().collect();
    let upper = chars.iter().filter(|c| c.is_uppercase()).count();
    if upper == 0 {
        return 1.0;
    }
    let lower = chars.iter().filter(|c| c.is_lowercase()).count();
    let first_upper = chars.first().is_some_and(|c| c.is_uppercase());
    let last_upper = chars.last().is_some_and(|c| c.is_uppercase());
    if lower == 0 || (upper == 1 && (first_upper || last_upper)) {
        return 2.0;
    }
    (1..=upper.min(lower))
        .map(|i| n_ck(upper + lower, i))
        .sum()
}

/// Distinct ways the substituted characters could have been chosen, from
/// the counts of substituted vs unsubstituted occurrences of each pair.
pub(crate) fn l33t_variations(substitutions: &[(char, char)], token: &str) -> f64 {
    let lower: Vec<char> = token
        .chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect();
    let mut variations = 1.0;
    for &(symbol, letter) in substitutions {
        let subbed = lower.iter().filter(|&&c| c == symbol).count();
        let unsubbed = lower.iter().filter(|&&c| c == letter).count();
        if subbed == 0 || unsubbed == 0 {
            variations *= 2.0;
        } else {
            let possibilities: f64 = (1..=subbed.min(unsubbed))
                .map(|i| n_ck(subbed + unsubbed, i))
                .sum();
            variations *= possibilities;
        }
    }
    variations
}

/// Path-counting over walk length and turn count. A straight run is one
/// leg; every turn opens a new fan of directions at every key.
fn spatial_guesses(
    token_len: usize,
    turns: usize,
    shifted_count: usize,
    starting_positions: usize,
    average_degree: f64,
) -> f64 {
    let s = starting_positions as f64;
    let legs = turns + 1;
    let mut guesses = 0.0;
    for i in 2..=token_len {
        let possible_legs = legs.min(i - 1);
        for j in 1..=possible_legs {
            guesses += n_ck(i - 1, j - 1) * s * average_degree.powi(j as i32);
        }
    }

    if shifted_count > 0 {
        let unshifted = token_len.saturating_sub(shifted_count);
        if unshifted == 0 {
            guesses *= 2.0;
        } else {
            let variations: f64 = (1..=shifted_count.min(unshifted))
                .map(|i| n_ck(shifted_count + unshifted, i))
                .sum();
            guesses *= variations;
        }
    }
    guesses
}

fn sequence_guesses(token: &str, ascending: bool, space: u32) -> f64 {
    let len = token.chars().count() as f64;
    let base = match token.chars().next() {
        // Obvious anchors: starts of alphabets and keyruns.
        Some('a' | 'A' | 'z' | 'Z' | '0' | '1' | '9') => 4.0,
        Some(c) if c.is_ascii_digit() => 10.0,
        _ => f64::from(space),
    };
    let base = if ascending { base } else { base * 2.0 };
    base * len
}

fn regex_guesses(name: &str, token: &str) -> f64 {
    match name {
        "recent_year" => match token.parse::<i32>() {
            Ok(year) => f64::from((year - REFERENCE_YEAR).abs().max(MIN_YEAR_SPACE)),
            Err(_) => bruteforce_guesses(token),
        },
        _ => bruteforce_guesses(token),
    }
}

fn date_guesses(has_separator: bool, year: i32) -> f64 {
    let year_space = f64::from((year - REFERENCE_YEAR).abs().max(MIN_YEAR_SPACE));
    let mut guesses = DAYS_PER_YEAR * year_space;
    if has_separator {
        guesses *= DATE_SEPARATOR_FACTOR;
    }
    guesses
}

/// Binomial coefficient as f64; exact for the small arguments seen here.
fn n_ck(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut result = 1.0;
    for i in 0..k {
        result = result * (n - i) as f64 / (i + 1) as f64;
    }
    result
}
