//! Password strength evaluator - main evaluation logic.

use crate::dictionary::RankedDictionary;
use crate::estimate;
use crate::feedback::feedback_for;
use crate::matchers::{self, Matcher, PatternError};
use crate::scoring;
use crate::types::{Match, MatchKind, StrengthEstimate};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

/// Depth cap for re-scoring repeat base tokens through the full pipeline.
/// Nested repeats beyond this fall back to the bruteforce model.
pub const MAX_REPEAT_DEPTH: usize = 3;

/// Interactive callers debounce this long before evaluating, so a fast
/// typist does not pay for every keystroke.
#[cfg(feature = "async")]
const EVALUATION_DEBOUNCE: std::time::Duration = std::time::Duration::from_millis(300);

/// Evaluation was aborted through its cancellation token.
#[cfg(feature = "async")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("password evaluation cancelled")]
pub struct EvaluationCancelled;

/// Holds the compiled matcher set and shared reference data. Building one
/// is comparatively expensive (adjacency graphs, compiled patterns);
/// evaluating with one is cheap and safe from concurrent threads.
pub struct Evaluator {
    matchers: Vec<Box<dyn Matcher>>,
}

impl Evaluator {
    /// Builds the matcher set over the given ranked word lists.
    ///
    /// # Errors
    ///
    /// Returns `PatternError` if a built-in pattern fails to compile.
    pub fn new(dictionaries: Vec<RankedDictionary>) -> Result<Self, PatternError> {
        let dictionaries: Vec<Arc<RankedDictionary>> =
            dictionaries.into_iter().map(Arc::new).collect();
        Ok(Evaluator {
            matchers: matchers::default_matchers(&dictionaries)?,
        })
    }

    /// Evaluates a password and returns the full strength estimate.
    ///
    /// `user_inputs` are identifying terms for this caller (name, email,
    /// site name); they are matched like a word list with rank equal to
    /// their position.
    pub fn evaluate(&self, password: &SecretString, user_inputs: &[String]) -> StrengthEstimate {
        let extra = matchers::user_input_matchers(user_inputs);
        let pwd = password.expose_secret();
        let matches = self
            .collect_matches(pwd, &extra, &|| false)
            .unwrap_or_default();
        self.finish(pwd, matches, &extra)
    }

    /// Like [`evaluate`](Self::evaluate), but checks the token between
    /// matcher passes and stops early when it fires.
    #[cfg(feature = "async")]
    pub fn evaluate_cancellable(
        &self,
        password: &SecretString,
        user_inputs: &[String],
        token: &CancellationToken,
    ) -> Result<StrengthEstimate, EvaluationCancelled> {
        let extra = matchers::user_input_matchers(user_inputs);
        let pwd = password.expose_secret();
        let matches = self
            .collect_matches(pwd, &extra, &|| token.is_cancelled())
            .ok_or(EvaluationCancelled)?;
        Ok(self.finish(pwd, matches, &extra))
    }

    /// Async variant that debounces, evaluates, and sends the estimate
    /// over a channel.
    #[cfg(feature = "async")]
    pub async fn evaluate_tx(
        &self,
        password: &SecretString,
        user_inputs: &[String],
        token: CancellationToken,
        tx: mpsc::Sender<StrengthEstimate>,
    ) {
        #[cfg(feature = "tracing")]
        tracing::info!("evaluation is about to start...");

        tokio::time::sleep(EVALUATION_DEBOUNCE).await;
        match self.evaluate_cancellable(password, user_inputs, &token) {
            Ok(estimate) => {
                if tx.send(estimate).await.is_err() {
                    #[cfg(feature = "tracing")]
                    tracing::error!("Failed to send strength estimate: receiver dropped");
                }
            }
            Err(EvaluationCancelled) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("evaluation cancelled before completion");
            }
        }
    }

    fn collect_matches(
        &self,
        password: &str,
        extra: &[Box<dyn Matcher>],
        cancelled: &dyn Fn() -> bool,
    ) -> Option<Vec<Match>> {
        let mut matches = Vec::new();
        for matcher in self.matchers.iter().chain(extra.iter()) {
            if cancelled() {
                return None;
            }
            matches.extend(matcher.matches(password));
        }
        Some(matches)
    }

    fn finish(
        &self,
        password: &str,
        mut matches: Vec<Match>,
        extra: &[Box<dyn Matcher>],
    ) -> StrengthEstimate {
        for m in &mut matches {
            self.fill_guesses(m, extra, 0);
        }
        let (sequence, guesses) = scoring::most_guessable_decomposition(password, matches);
        let score = scoring::score_from_guesses(guesses);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "evaluated: {} matches in sequence, guesses 10^{:.1}, score {}",
            sequence.len(),
            guesses.log10(),
            score.value()
        );

        StrengthEstimate {
            guesses,
            guesses_log10: guesses.log10(),
            score,
            crack_times: scoring::crack_times(guesses),
            feedback: feedback_for(score, &sequence),
            sequence,
        }
    }

    fn fill_guesses(&self, m: &mut Match, extra: &[Box<dyn Matcher>], depth: usize) {
        if let MatchKind::Repeat {
            base_token,
            base_guesses,
            ..
        } = &mut m.kind
        {
            *base_guesses = if depth >= MAX_REPEAT_DEPTH {
                estimate::bruteforce_guesses(base_token)
            } else {
                self.rescore_base(base_token, extra, depth + 1)
            };
        }
        m.guesses = estimate::estimate_guesses(m);
    }

    /// Re-runs the whole match-and-combine pipeline on a repeat's base
    /// token to price one occurrence of it.
    fn rescore_base(&self, base: &str, extra: &[Box<dyn Matcher>], depth: usize) -> f64 {
        let mut matches: Vec<Match> = self
            .matchers
            .iter()
            .chain(extra.iter())
            .flat_map(|matcher| matcher.matches(base))
            .collect();
        for m in &mut matches {
            self.fill_guesses(m, extra, depth);
        }
        let (_, guesses) = scoring::most_guessable_decomposition(base, matches);
        guesses
    }
}

/// Evaluates a password with no custom word lists: structural patterns and
/// the supplied user inputs are the only sources of matches.
///
/// # Errors
///
/// Returns `PatternError` if a built-in pattern fails to compile.
pub fn evaluate_password_strength(
    password: &SecretString,
    user_inputs: &[String],
) -> Result<StrengthEstimate, PatternError> {
    Ok(Evaluator::new(Vec::new())?.evaluate(password, user_inputs))
}
