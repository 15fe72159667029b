//! Core data types: candidate matches, scores, and the final estimate.

/// A candidate explanation for the substring `password[start..=end]`.
///
/// Many overlapping matches may cover the same span; overlap is resolved
/// by the combiner in `scoring`, never by the matchers themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// Char index of the first character of the token.
    pub start: usize,
    /// Char index of the last character of the token (inclusive).
    pub end: usize,
    /// The matched substring, exactly as it appears in the password.
    pub token: String,
    /// Which pattern produced this match, with kind-specific metadata.
    pub kind: MatchKind,
    /// Estimated guesses an attacker needs to produce this token via this
    /// pattern. Zero until the estimator has run; at least 1 afterwards.
    pub guesses: f64,
}

impl Match {
    /// Token length in characters.
    pub fn token_len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Closed set of pattern kinds. The estimator, combiner and feedback
/// generator all switch exhaustively over this enum, so adding a matcher
/// kind is a compile-time-checked extension.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchKind {
    /// A ranked word-list hit, possibly reversed or de-leeted.
    Dictionary {
        /// Name of the list the word was found in.
        dictionary: String,
        /// 1-based frequency rank of the word.
        rank: usize,
        /// The token matched only after reversing the password.
        reversed: bool,
        /// The token matched only after undoing leet substitutions.
        l33t: bool,
        /// Substitutions actually used in the token, as
        /// `(substituted char, original letter)` pairs, sorted.
        substitutions: Vec<(char, char)>,
    },
    /// A walk over physically adjacent keys on one keyboard layout.
    Spatial {
        layout: &'static str,
        /// Direction changes along the walk.
        turns: usize,
        /// Keys typed with shift held.
        shifted_count: usize,
        /// Number of keys on the layout.
        starting_positions: usize,
        /// Average neighbour fan-out of the layout's keys.
        average_degree: f64,
    },
    /// A constant-delta run inside one character class, e.g. "6789" or "wxyz".
    Sequence {
        ascending: bool,
        /// Alphabet size of the character class the run lives in.
        space: u32,
    },
    /// A base token repeated two or more times, e.g. "abcabcabc".
    Repeat {
        base_token: String,
        /// Guesses for one occurrence of the base token, filled by the
        /// estimator via a recursive match-and-combine pass.
        base_guesses: f64,
        repeat_count: usize,
    },
    /// A hit from the fixed set of named regex patterns.
    Regex { name: &'static str },
    /// A date-shaped substring with validated day/month/year fields.
    Date {
        separator: Option<char>,
        year: i32,
        month: u32,
        day: u32,
    },
    /// Gap filler chosen by the combiner for spans no pattern explains.
    Bruteforce,
}

impl MatchKind {
    /// Short name of the pattern kind, as exposed to feedback consumers.
    pub fn pattern_name(&self) -> &'static str {
        match self {
            MatchKind::Dictionary { .. } => "dictionary",
            MatchKind::Spatial { .. } => "spatial",
            MatchKind::Sequence { .. } => "sequence",
            MatchKind::Repeat { .. } => "repeat",
            MatchKind::Regex { .. } => "regex",
            MatchKind::Date { .. } => "date",
            MatchKind::Bruteforce => "bruteforce",
        }
    }
}

/// Integer strength score, 0 (trivial) through 4 (strong).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Score {
    Trivial = 0,
    Weak = 1,
    Fair = 2,
    Strong = 3,
    VeryStrong = 4,
}

impl Score {
    pub fn value(self) -> u8 {
        self as u8
    }
}

/// Seconds to exhaust the guess count under fixed attacker-speed models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrackTimes {
    /// Online attack against a rate-limited service (100 guesses/hour).
    pub online_throttled_secs: f64,
    /// Online attack with no rate limiting (10 guesses/second).
    pub online_unthrottled_secs: f64,
    /// Offline attack against a slow hash (1e4 guesses/second).
    pub offline_slow_hash_secs: f64,
    /// Offline attack against a fast hash (1e10 guesses/second).
    pub offline_fast_hash_secs: f64,
}

/// Human-readable advice derived from the winning decomposition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Feedback {
    pub warning: Option<&'static str>,
    pub suggestions: Vec<&'static str>,
}

/// The complete result of evaluating one password.
#[derive(Debug, Clone, PartialEq)]
pub struct StrengthEstimate {
    /// Total estimated guesses for the whole password, at least 1.
    pub guesses: f64,
    pub guesses_log10: f64,
    pub score: Score,
    /// The winning decomposition: ordered, non-overlapping matches whose
    /// spans cover the password exactly once.
    pub sequence: Vec<Match>,
    pub crack_times: CrackTimes,
    pub feedback: Feedback,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_len_is_inclusive() {
        let m = Match {
            start: 2,
            end: 4,
            token: "abc".to_string(),
            kind: MatchKind::Bruteforce,
            guesses: 0.0,
        };
        assert_eq!(m.token_len(), 3);
    }

    #[test]
    fn test_score_values() {
        assert_eq!(Score::Trivial.value(), 0);
        assert_eq!(Score::VeryStrong.value(), 4);
        assert!(Score::Weak < Score::Fair);
    }

    #[test]
    fn test_pattern_names() {
        assert_eq!(MatchKind::Bruteforce.pattern_name(), "bruteforce");
        let kind = MatchKind::Sequence {
            ascending: true,
            space: 10,
        };
        assert_eq!(kind.pattern_name(), "sequence");
    }
}
