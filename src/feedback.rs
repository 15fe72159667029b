//! Feedback generation - warnings and suggestions from the winning
//! decomposition.

use crate::types::{Feedback, Match, MatchKind, Score};

const DEFAULT_SUGGESTIONS: [&str; 2] = [
    "Use a few words, avoid common phrases.",
    "No need for symbols, digits, or uppercase letters.",
];

const EXTRA_SUGGESTION: &str = "Add another word or two. Uncommon words are better.";

/// Tokens shorter than this get no reversed-word suggestion, matching the
/// estimator's reversal-tax threshold.
const MIN_REVERSED_FEEDBACK_LEN: usize = 4;

/// Builds feedback for a finished evaluation. Scores above 2 get no
/// advice; weaker passwords are critiqued via their longest match.
pub(crate) fn feedback_for(score: Score, sequence: &[Match]) -> Feedback {
    if sequence.is_empty() {
        return Feedback {
            warning: None,
            suggestions: DEFAULT_SUGGESTIONS.to_vec(),
        };
    }
    if score > Score::Fair {
        return Feedback::default();
    }

    let Some(longest) = sequence.iter().max_by_key(|m| m.token_len()) else {
        return Feedback::default();
    };
    let mut feedback = match_feedback(longest, sequence.len() == 1);
    feedback.suggestions.insert(0, EXTRA_SUGGESTION);
    feedback
}

fn match_feedback(m: &Match, is_sole_match: bool) -> Feedback {
    match &m.kind {
        MatchKind::Dictionary {
            dictionary,
            rank,
            reversed,
            l33t,
            ..
        } => dictionary_feedback(m, dictionary, *rank, *reversed, *l33t, is_sole_match),
        MatchKind::Spatial { turns, .. } => Feedback {
            warning: Some(if *turns == 0 {
                "Straight rows of keys are easy to guess."
            } else {
                "Short keyboard patterns are easy to guess."
            }),
            suggestions: vec!["Use a longer keyboard pattern with more turns."],
        },
        MatchKind::Repeat { base_token, .. } => Feedback {
            warning: Some(if base_token.chars().count() == 1 {
                "Repeats like 'aaa' are easy to guess."
            } else {
                "Repeats like 'abcabcabc' are only slightly harder to guess than 'abc'."
            }),
            suggestions: vec!["Avoid repeated words and characters."],
        },
        MatchKind::Regex { name } => {
            if *name == "recent_year" {
                Feedback {
                    warning: Some("Recent years are easy to guess."),
                    suggestions: vec![
                        "Avoid recent years.",
                        "Avoid years that are associated with you.",
                    ],
                }
            } else {
                Feedback::default()
            }
        }
        MatchKind::Date { .. } => Feedback {
            warning: Some("Dates are often easy to guess."),
            suggestions: vec!["Avoid dates and years that are associated with you."],
        },
        MatchKind::Sequence { .. } | MatchKind::Bruteforce => Feedback::default(),
    }
}

fn dictionary_feedback(
    m: &Match,
    dictionary: &str,
    rank: usize,
    reversed: bool,
    l33t: bool,
    is_sole_match: bool,
) -> Feedback {
    let warning = if dictionary == "passwords" {
        if is_sole_match && !l33t && !reversed {
            if rank <= 10 {
                Some("This is a top-10 common password.")
            } else if rank <= 100 {
                Some("This is a top-100 common password.")
            } else {
                Some("This is a very common password.")
            }
        } else {
            Some("This is similar to a commonly used password.")
        }
    } else if dictionary == "english" {
        is_sole_match.then_some("A word by itself is easy to guess.")
    } else if matches!(dictionary, "surnames" | "male_names" | "female_names") {
        Some(if is_sole_match {
            "Names and surnames by themselves are easy to guess."
        } else {
            "Common names and surnames are easy to guess."
        })
    } else {
        None
    };

    let mut suggestions = Vec::new();
    let first_upper = m.token.chars().next().is_some_and(|c| c.is_uppercase());
    let any_lower = m.token.chars().any(|c| c.is_lowercase());
    if first_upper {
        suggestions.push("Capitalization doesn't help very much.");
    } else if !any_lower && m.token.chars().any(|c| c.is_uppercase()) {
        suggestions.push("All-uppercase is almost as easy to guess as all-lowercase.");
    }
    if reversed && m.token_len() >= MIN_REVERSED_FEEDBACK_LEN {
        suggestions.push("Reversed words aren't much harder to guess.");
    }
    if l33t {
        suggestions.push("Predictable substitutions like '@' instead of 'a' don't help very much.");
    }

    Feedback {
        warning,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary_match(token: &str, dictionary: &str, rank: usize) -> Match {
        Match {
            start: 0,
            end: token.chars().count() - 1,
            token: token.to_string(),
            kind: MatchKind::Dictionary {
                dictionary: dictionary.to_string(),
                rank,
                reversed: false,
                l33t: false,
                substitutions: Vec::new(),
            },
            guesses: 2.0,
        }
    }

    #[test]
    fn test_empty_sequence_gets_default_suggestions() {
        let feedback = feedback_for(Score::Trivial, &[]);
        assert!(feedback.warning.is_none());
        assert_eq!(feedback.suggestions.len(), 2);
    }

    #[test]
    fn test_strong_passwords_get_no_feedback() {
        let m = dictionary_match("password", "passwords", 1);
        let feedback = feedback_for(Score::Strong, &[m]);
        assert!(feedback.warning.is_none());
        assert!(feedback.suggestions.is_empty());
    }

    #[test]
    fn test_top_10_password_warning() {
        let m = dictionary_match("password", "passwords", 2);
        let feedback = feedback_for(Score::Trivial, &[m]);
        assert_eq!(feedback.warning, Some("This is a top-10 common password."));
        assert_eq!(feedback.suggestions[0], EXTRA_SUGGESTION);
    }

    #[test]
    fn test_capitalization_suggestion() {
        let m = dictionary_match("Password", "passwords", 2);
        let feedback = feedback_for(Score::Trivial, &[m]);
        assert!(feedback
            .suggestions
            .contains(&"Capitalization doesn't help very much."));
    }

    #[test]
    fn test_sole_english_word_warning() {
        let m = dictionary_match("rosebud", "english", 320);
        let feedback = feedback_for(Score::Trivial, &[m]);
        assert_eq!(feedback.warning, Some("A word by itself is easy to guess."));
    }

    #[test]
    fn test_spatial_feedback_distinguishes_turns() {
        let spatial = |turns| Match {
            start: 0,
            end: 5,
            token: "qwerty".to_string(),
            kind: MatchKind::Spatial {
                layout: "qwerty",
                turns,
                shifted_count: 0,
                starting_positions: 94,
                average_degree: 4.6,
            },
            guesses: 500.0,
        };
        let straight = feedback_for(Score::Trivial, &[spatial(0)]);
        assert_eq!(
            straight.warning,
            Some("Straight rows of keys are easy to guess.")
        );
        let turned = feedback_for(Score::Trivial, &[spatial(3)]);
        assert_eq!(
            turned.warning,
            Some("Short keyboard patterns are easy to guess.")
        );
    }

    #[test]
    fn test_feedback_keys_off_longest_match() {
        let short = dictionary_match("no", "english", 50);
        let long = Match {
            start: 2,
            end: 9,
            token: "11111111".to_string(),
            kind: MatchKind::Repeat {
                base_token: "1".to_string(),
                base_guesses: 10.0,
                repeat_count: 8,
            },
            guesses: 80.0,
        };
        let feedback = feedback_for(Score::Trivial, &[short, long]);
        assert_eq!(feedback.warning, Some("Repeats like 'aaa' are easy to guess."));
    }
}
