//! Normalized string similarity for judging free-text answers.
//!
//! # Pipeline
//!
//! ```text
//! (text1, text2) → normalize → identity / empty short-circuits
//!                            → bounded Levenshtein → 1 - d / max(|a|, |b|)
//! ```
//!
//! Every call is independent: the only state is the immutable
//! [`ScorerConfig`], so a [`Scorer`] can be shared across threads freely.
//! No rounding is applied; thresholding is the caller's decision, with
//! [`ScorerConfig::match_threshold`] as the default verdict line.

pub mod levenshtein;
pub mod normalize;

use serde::Serialize;
use tracing::debug;

use crate::error::{ScoreError, ScoreResult};
use levenshtein::DEFAULT_MAX_INPUT_CHARS;

/// Default score at or above which an answer counts as a match.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.8;

/// Limits and defaults for a [`Scorer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorerConfig {
    /// Longest canonical input (in chars) the distance table is built for.
    pub max_input_chars: usize,
    /// Default threshold for [`Comparison::is_match`] verdicts.
    pub match_threshold: f64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }
}

impl ScorerConfig {
    /// Check that the limits are usable.
    pub fn validate(&self) -> ScoreResult<()> {
        if self.max_input_chars == 0 {
            return Err(ScoreError::InvalidConfig(
                "max_input_chars must be at least 1".to_owned(),
            ));
        }
        validate_threshold(self.match_threshold)
    }
}

/// Reject thresholds outside `[0, 1]` (including NaN).
pub fn validate_threshold(threshold: f64) -> ScoreResult<()> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(ScoreError::InvalidConfig(format!(
            "threshold must be within [0, 1], got {threshold}"
        )))
    }
}

/// Result of comparing two texts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    /// Similarity in `[0, 1]`; exactly `1.0` for identical canonical forms.
    pub score: f64,
    /// Edit distance between the canonical forms.
    pub distance: usize,
    /// Canonical length of the first text, in chars.
    pub len_a: usize,
    /// Canonical length of the second text, in chars.
    pub len_b: usize,
}

impl Comparison {
    /// Whether the score reaches `threshold`.
    #[must_use]
    pub fn is_match(&self, threshold: f64) -> bool {
        self.score >= threshold
    }
}

/// Best-scoring accepted answer from [`Scorer::best_match`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BestMatch {
    /// Index into the accepted-answer slice.
    pub index: usize,
    #[serde(flatten)]
    pub comparison: Comparison,
}

/// Stateless similarity scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    config: ScorerConfig,
}

impl Scorer {
    /// Create a scorer, validating `config`.
    pub fn new(config: ScorerConfig) -> ScoreResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Similarity score of two raw texts in `[0, 1]`.
    ///
    /// Fails only with [`ScoreError::InputTooLarge`], and only when the
    /// distance table would have to be built for an oversized input.
    pub fn score(&self, text1: &str, text2: &str) -> ScoreResult<f64> {
        self.compare(text1, text2).map(|c| c.score)
    }

    /// Score two raw texts and return the full [`Comparison`].
    pub fn compare(&self, text1: &str, text2: &str) -> ScoreResult<Comparison> {
        let a = normalize::normalize(text1);
        let b = normalize::normalize(text2);
        self.compare_canonical(&a, &b)
    }

    /// Whether two raw texts match at the configured threshold.
    pub fn is_match(&self, text1: &str, text2: &str) -> ScoreResult<bool> {
        Ok(self
            .compare(text1, text2)?
            .is_match(self.config.match_threshold))
    }

    /// Compare `answer` against each accepted answer and return the best.
    ///
    /// Ties go to the earliest entry. Returns `Ok(None)` when `accepted` is
    /// empty. An oversized accepted answer fails the whole call.
    pub fn best_match<S: AsRef<str>>(
        &self,
        answer: &str,
        accepted: &[S],
    ) -> ScoreResult<Option<BestMatch>> {
        let canonical_answer = normalize::normalize(answer);
        let mut best: Option<BestMatch> = None;

        for (index, candidate) in accepted.iter().enumerate() {
            let canonical = normalize::normalize(candidate.as_ref());
            let comparison = self.compare_canonical(&canonical_answer, &canonical)?;
            if best.is_none_or(|b| comparison.score > b.comparison.score) {
                best = Some(BestMatch { index, comparison });
            }
            if comparison.score >= 1.0 {
                break;
            }
        }

        Ok(best)
    }

    /// Score two canonical forms. Callers must have normalized both.
    fn compare_canonical(&self, a: &str, b: &str) -> ScoreResult<Comparison> {
        if a == b {
            let len = a.chars().count();
            return Ok(Comparison {
                score: 1.0,
                distance: 0,
                len_a: len,
                len_b: len,
            });
        }

        let len_a = a.chars().count();
        let len_b = b.chars().count();
        let max_len = len_a.max(len_b);

        if len_a == 0 || len_b == 0 {
            return Ok(Comparison {
                score: 0.0,
                distance: max_len,
                len_a,
                len_b,
            });
        }

        levenshtein::check_len(len_a, self.config.max_input_chars)?;
        levenshtein::check_len(len_b, self.config.max_input_chars)?;

        let a_chars: Vec<char> = a.chars().collect();
        let b_chars: Vec<char> = b.chars().collect();
        let distance = levenshtein::distance_chars(&a_chars, &b_chars);
        let score = 1.0 - (distance as f64 / max_len as f64);

        debug!(len_a, len_b, distance, score, "scored");

        Ok(Comparison {
            score,
            distance,
            len_a,
            len_b,
        })
    }
}

/// Similarity of two free-text answers with the default [`ScorerConfig`].
///
/// Both texts are trimmed and lowercased before comparison. Returns `1.0`
/// for identical canonical forms (including both empty), `0.0` when exactly
/// one is empty, else `1 - distance / max_len`.
pub fn calculate_similarity(text1: &str, text2: &str) -> ScoreResult<f64> {
    Scorer::default().score(text1, text2)
}
