//! Password strength estimation library
//!
//! Estimates how many guesses an attacker would need to crack a password
//! by decomposing it into pattern matches (dictionary words, keyboard
//! walks, sequences, repeats, dates, leet substitutions) and searching for
//! the decomposition that minimizes total guesses. The guess count maps to
//! a 0-4 score with human-readable feedback and coarse crack-time
//! estimates.
//!
//! This is a strength advisor, not an authentication mechanism: it never
//! stores, transmits, or validates credentials.
//!
//! # Features
//!
//! - `async` (default): Enables cancellable evaluation and the channel
//!   based variant
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_WORDLIST_DIR`: Directory containing the built-in word list files
//!   (default: `./assets`)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_guessability::{Evaluator, RankedDictionary};
//! use secrecy::SecretString;
//!
//! let passwords = RankedDictionary::from_ordered_words(
//!     "passwords",
//!     ["123456", "password", "qwerty"],
//! )?;
//! let evaluator = Evaluator::new(vec![passwords])?;
//!
//! let password = SecretString::new("Tr0ub4dour&3".to_string().into());
//! let estimate = evaluator.evaluate(&password, &[]);
//!
//! println!("Score: {}", estimate.score.value());
//! println!("Guesses: 10^{:.1}", estimate.guesses_log10);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Internal modules
mod adjacency;
mod dictionary;
mod estimate;
mod evaluator;
mod feedback;
mod matchers;
mod scoring;
mod types;

// Public API
pub use adjacency::AdjacencyGraph;
pub use dictionary::{
    load_default_dictionaries, wordlist_dir, DictionaryError, RankedDictionary,
    DEFAULT_DICTIONARY_NAMES, USER_INPUTS_DICTIONARY,
};
pub use estimate::{
    bruteforce_guesses, char_class_size, DIGIT_SPACE, LOWERCASE_SPACE, MIN_GUESSES,
    MIN_YEAR_SPACE, REFERENCE_YEAR, SYMBOL_SPACE, UNICODE_SPACE, UPPERCASE_SPACE,
};
pub use evaluator::{evaluate_password_strength, Evaluator, MAX_REPEAT_DEPTH};
pub use matchers::{
    default_matchers, user_input_matchers, DateMatcher, DictionaryMatcher, L33tMatcher, Matcher,
    PatternError, RegexMatcher, RepeatMatcher, ReverseDictionaryMatcher, SequenceMatcher,
    SpatialMatcher, MAX_L33T_VARIANTS,
};
pub use scoring::{
    crack_times, score_from_guesses, OFFLINE_FAST_HASH_PER_SECOND, OFFLINE_SLOW_HASH_PER_SECOND,
    ONLINE_THROTTLED_PER_SECOND, ONLINE_UNTHROTTLED_PER_SECOND, SCORE_THRESHOLD_FAIR,
    SCORE_THRESHOLD_STRONG, SCORE_THRESHOLD_VERY_STRONG, SCORE_THRESHOLD_WEAK,
};
pub use types::{CrackTimes, Feedback, Match, MatchKind, Score, StrengthEstimate};

#[cfg(feature = "async")]
pub use evaluator::EvaluationCancelled;
