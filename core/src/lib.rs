//! libstroke-core
//!
//! Script-agnostic stroke geometry, matching and practice-session state
//! shared by handwriting guide crates (libhangul).
//!
//! Public API:
//! - `Point`, `Stroke`, `Glyph`, `Rect`, `Viewport` - normalized stroke geometry
//! - `CharGuide` - ordered stroke template for one character
//! - `SimilarityMatcher` / `evaluate_stroke` - whole-stroke accept/reject
//! - `LiveTracker` / `track_frame` - per-frame projection and progress
//! - `PracticeSession` - stroke index, accepted strokes and pointer state
//! - `Config` - tolerances, difficulty and matcher parameters
use serde::{Deserialize, Serialize};

pub mod geometry;
pub use geometry::{Glyph, Point, Rect, Stroke, StrokeKind, Viewport};

pub mod resample;
pub use resample::{mean_distance, normalize, resample};

pub mod similarity;
pub use similarity::{evaluate_stroke, Difficulty, SimilarityMatcher, StrokeVerdict};

pub mod tracking;
pub use tracking::{project_to_polyline, track_frame, LiveTracker, PointerInput, Projection, TrackFrame, TrackState};

pub mod guide;
pub use guide::{CharGuide, GuidePack, Unit, UnitStroke, DONE_THRESHOLD, SNAP_TOLERANCE};

pub mod session;
pub use session::{EvaluationMode, FrameTicket, PracticeSession, StrokeOutcome};

/// Generic configuration for stroke matching.
///
/// This config contains only script-agnostic fields. Layout options for a
/// particular writing system belong in that crate's config (for example
/// `HangulConfig`), which flattens this struct.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Live tracking: max pixel distance from the template that snaps
    pub snap_tolerance: f64,
    /// Live tracking: fraction of a stroke to trace before it completes
    pub done_threshold: f64,
    /// Live tracking: weight of the new target when smoothing drawn points
    pub smoothing: f64,

    /// Whole-stroke matching strictness
    pub difficulty: Difficulty,
    /// Points both paths are resampled to before comparison
    pub resample_points: usize,
    /// Candidates with fewer samples are rejected without scoring
    pub min_candidate_points: usize,
    /// Scale substitute for zero-extent bounding boxes
    pub normalize_epsilon: f64,

    /// Render surface used to convert guides to pixels
    pub viewport: Viewport,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snap_tolerance: SNAP_TOLERANCE,
            done_threshold: DONE_THRESHOLD,
            smoothing: tracking::SMOOTHING,
            difficulty: Difficulty::default(),
            resample_points: resample::RESAMPLE_POINTS,
            min_candidate_points: similarity::MIN_CANDIDATE_POINTS,
            normalize_epsilon: resample::NORMALIZE_EPSILON,
            viewport: Viewport::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Acceptance threshold for the configured difficulty.
    pub fn threshold(&self) -> f64 {
        self.difficulty.threshold()
    }

    /// Whole-stroke matcher with the configured parameters.
    pub fn matcher(&self) -> SimilarityMatcher {
        SimilarityMatcher {
            resample_points: self.resample_points,
            min_candidate_points: self.min_candidate_points,
            epsilon: self.normalize_epsilon,
        }
    }

    /// Live tracker with the configured parameters.
    pub fn tracker(&self) -> LiveTracker {
        LiveTracker {
            viewport: self.viewport,
            snap_tolerance: self.snap_tolerance,
            done_threshold: self.done_threshold,
            smoothing: self.smoothing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_match_guide_constants() {
        let cfg = Config::default();
        assert_eq!(cfg.snap_tolerance, 16.0);
        assert_eq!(cfg.done_threshold, 0.86);
        assert_eq!(cfg.smoothing, 0.35);
        assert_eq!(cfg.resample_points, 64);
        assert_eq!(cfg.min_candidate_points, 8);
        assert_eq!(cfg.threshold(), 0.12);
    }

    #[test]
    fn config_toml_round_trip() {
        let mut cfg = Config::default();
        cfg.difficulty = Difficulty::Strict;
        cfg.viewport = Viewport::new(640.0, 480.0);
        let text = cfg.to_toml_string().unwrap();
        assert!(text.contains("difficulty = \"strict\""));
        let back = Config::from_toml_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stroke.toml");
        let mut cfg = Config::default();
        cfg.difficulty = Difficulty::Lenient;
        cfg.smoothing = 0.5;
        cfg.save_toml(&path).unwrap();
        assert_eq!(Config::load_toml(&path).unwrap(), cfg);
        assert!(Config::load_toml(dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = Config::from_toml_str("difficulty = \"easy\"\nsnap_tolerance = 24.0\n").unwrap();
        assert_eq!(cfg.difficulty, Difficulty::Lenient);
        assert_eq!(cfg.snap_tolerance, 24.0);
        assert_eq!(cfg.done_threshold, DONE_THRESHOLD);
    }
}
