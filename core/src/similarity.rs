//! Whole-stroke similarity matching.
//!
//! A finished candidate stroke is compared against a template stroke by
//! resampling both to a fixed number of equally spaced points, normalizing
//! each for translation and scale, and averaging the index-aligned point
//! distances. Lower scores mean closer shapes; a stroke is accepted when its
//! score is strictly below the difficulty threshold.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::Point;
use crate::resample::{mean_distance, normalize, resample, NORMALIZE_EPSILON, RESAMPLE_POINTS};

/// Candidates with fewer samples than this are rejected outright.
pub const MIN_CANDIDATE_POINTS: usize = 8;

/// Score reported for candidates that cannot be judged.
pub const REJECT_SCORE: f64 = 1.0;

/// Acceptance strictness for whole-stroke matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[serde(alias = "easy")]
    Lenient,
    #[default]
    #[serde(rename = "default", alias = "normal")]
    Normal,
    #[serde(alias = "hard")]
    Strict,
}

impl Difficulty {
    /// Maximum (exclusive) score accepted at this difficulty.
    pub fn threshold(self) -> f64 {
        match self {
            Difficulty::Lenient => 0.14,
            Difficulty::Normal => 0.12,
            Difficulty::Strict => 0.09,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Lenient => "lenient",
            Difficulty::Normal => "default",
            Difficulty::Strict => "strict",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" | "easy" => Ok(Difficulty::Lenient),
            "default" | "normal" => Ok(Difficulty::Normal),
            "strict" | "hard" => Ok(Difficulty::Strict),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

/// Result of judging one candidate stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeVerdict {
    pub accepted: bool,
    pub score: f64,
}

impl StrokeVerdict {
    /// Similarity shown to learners, `1 - score`.
    pub fn similarity(&self) -> f64 {
        1.0 - self.score
    }
}

/// Tunable parameters of the whole-stroke matcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityMatcher {
    /// Points each path is resampled to.
    pub resample_points: usize,
    /// Minimum candidate samples before a verdict is attempted.
    pub min_candidate_points: usize,
    /// Scale substitute for zero-extent bounding boxes.
    pub epsilon: f64,
}

impl Default for SimilarityMatcher {
    fn default() -> Self {
        Self {
            resample_points: RESAMPLE_POINTS,
            min_candidate_points: MIN_CANDIDATE_POINTS,
            epsilon: NORMALIZE_EPSILON,
        }
    }
}

impl SimilarityMatcher {
    /// Shape distance between `candidate` and `template` (0 = identical shape).
    ///
    /// Returns [`REJECT_SCORE`] when the candidate is too short to judge or
    /// the template is empty.
    pub fn score(&self, candidate: &[Point], template: &[Point]) -> f64 {
        if candidate.len() < self.min_candidate_points || template.is_empty() {
            return REJECT_SCORE;
        }
        let c = normalize(&resample(candidate, self.resample_points), self.epsilon);
        let t = normalize(&resample(template, self.resample_points), self.epsilon);
        mean_distance(&c, &t).unwrap_or(REJECT_SCORE)
    }

    /// Judge `candidate` against `template` with an explicit threshold.
    pub fn evaluate(&self, candidate: &[Point], template: &[Point], threshold: f64) -> StrokeVerdict {
        if candidate.len() < self.min_candidate_points {
            debug!(
                samples = candidate.len(),
                "candidate stroke too short to evaluate"
            );
            return StrokeVerdict {
                accepted: false,
                score: REJECT_SCORE,
            };
        }
        let score = self.score(candidate, template);
        let accepted = score < threshold;
        debug!(score, threshold, accepted, "evaluated stroke");
        StrokeVerdict { accepted, score }
    }
}

/// Judge `candidate` against `template` with the default matcher parameters.
pub fn evaluate_stroke(candidate: &[Point], template: &[Point], threshold: f64) -> StrokeVerdict {
    SimilarityMatcher::default().evaluate(candidate, template, threshold)
}
