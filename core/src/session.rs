//! Practice session management.
//!
//! The `PracticeSession` struct holds all the state of tracing one character
//! guide: which stroke is due, the strokes accepted so far, the pointer and
//! the sample buffer of the stroke being drawn. Pointer events and frame
//! ticks are fed in by the host in arrival order; the session decides when
//! to advance to the next stroke.
//!
//! Two evaluation strategies share this state:
//! - [`EvaluationMode::Discrete`] buffers a whole pointer drag and judges it on
//!   release with the similarity matcher.
//! - [`EvaluationMode::Live`] projects the pointer onto the template every
//!   frame and completes the stroke once enough of it has been traced.

use tracing::debug;

use crate::geometry::{Point, Stroke, Viewport};
use crate::guide::CharGuide;
use crate::similarity::{Difficulty, SimilarityMatcher};
use crate::tracking::{LiveTracker, PointerInput, TrackFrame, TrackState};
use crate::Config;

/// How strokes are judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationMode {
    /// Whole-stroke similarity, judged on pointer release.
    Discrete(Difficulty),
    /// Per-frame projection with progress tracking.
    Live,
}

impl Default for EvaluationMode {
    fn default() -> Self {
        Self::Discrete(Difficulty::default())
    }
}

/// Result of releasing the pointer in discrete mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeOutcome {
    /// Stroke `index` matched; the session moved on to the next stroke.
    Accepted { index: usize, score: f64 },
    /// Stroke `index` did not match and must be drawn again.
    Rejected { index: usize, score: f64 },
    /// The final stroke matched; the guide is finished.
    GuideComplete { score: f64 },
}

impl StrokeOutcome {
    pub fn score(&self) -> f64 {
        match *self {
            StrokeOutcome::Accepted { score, .. }
            | StrokeOutcome::Rejected { score, .. }
            | StrokeOutcome::GuideComplete { score } => score,
        }
    }

    /// `1 - score`, the figure shown to the learner.
    pub fn similarity(&self) -> f64 {
        1.0 - self.score()
    }

    pub fn is_accepted(&self) -> bool {
        !matches!(self, StrokeOutcome::Rejected { .. })
    }
}

/// Token tying a scheduled frame callback to the guide it was scheduled for.
///
/// Any reset or guide change invalidates outstanding tickets, so a late
/// callback for an old guide cannot touch the new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTicket(u64);

/// State of tracing one character guide.
#[derive(Debug, Clone)]
pub struct PracticeSession {
    guide: CharGuide,
    mode: EvaluationMode,
    viewport: Viewport,
    matcher: SimilarityMatcher,
    smoothing: f64,

    /// Index of the stroke to draw next; equals the stroke count when done
    stroke_index: usize,
    /// Raw samples of accepted strokes, in normalized space
    accepted: Vec<Vec<Point>>,
    /// Samples of the stroke being drawn (discrete mode), normalized
    user_stroke: Vec<Point>,
    /// Pointer state in pixels
    pointer: PointerInput,
    /// Live-mode drawing accumulator
    track: TrackState,
    progress: f64,
    epoch: u64,
}

impl PracticeSession {
    /// Create a session for `guide` with default parameters.
    pub fn new(guide: CharGuide, mode: EvaluationMode) -> Self {
        Self::with_config(guide, mode, &Config::default())
    }

    /// Create a session for `guide` using viewport and matcher settings from `config`.
    pub fn with_config(guide: CharGuide, mode: EvaluationMode, config: &Config) -> Self {
        Self {
            guide,
            mode,
            viewport: config.viewport,
            matcher: config.matcher(),
            smoothing: config.smoothing,
            stroke_index: 0,
            accepted: Vec::new(),
            user_stroke: Vec::new(),
            pointer: PointerInput::released(0.0, 0.0),
            track: TrackState::new(),
            progress: 0.0,
            epoch: 0,
        }
    }

    pub fn guide(&self) -> &CharGuide {
        &self.guide
    }

    pub fn mode(&self) -> EvaluationMode {
        self.mode
    }

    /// Switch strategy. In-progress drawing is discarded.
    pub fn set_mode(&mut self, mode: EvaluationMode) {
        self.mode = mode;
        self.discard_attempt();
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn stroke_index(&self) -> usize {
        self.stroke_index
    }

    /// The template stroke due next, or `None` when the guide is finished.
    pub fn current_stroke(&self) -> Option<&Stroke> {
        self.guide.stroke(self.stroke_index)
    }

    pub fn is_complete(&self) -> bool {
        self.stroke_index >= self.guide.len()
    }

    pub fn accepted_strokes(&self) -> &[Vec<Point>] {
        &self.accepted
    }

    pub fn user_stroke(&self) -> &[Point] {
        &self.user_stroke
    }

    /// Live drawing accumulated for the current stroke, in pixels.
    pub fn drawn_path(&self) -> &[Point] {
        &self.track.path
    }

    /// Progress of the current live stroke in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer.down
    }

    /// Ticket for scheduling the next frame callback.
    pub fn ticket(&self) -> FrameTicket {
        FrameTicket(self.epoch)
    }

    /// Restart the current guide from its first stroke.
    pub fn reset(&mut self) {
        debug!(strokes = self.guide.len(), "resetting practice session");
        self.stroke_index = 0;
        self.accepted.clear();
        self.discard_attempt();
        self.pointer.down = false;
        self.epoch += 1;
    }

    /// Replace the guide being practiced and restart from its first stroke.
    pub fn set_guide(&mut self, guide: CharGuide) {
        self.guide = guide;
        self.reset();
    }

    fn discard_attempt(&mut self) {
        self.user_stroke.clear();
        self.track.clear();
        self.progress = 0.0;
    }

    /// Pointer pressed at `position` (pixels).
    pub fn pointer_down(&mut self, position: Point) {
        self.pointer = PointerInput {
            position,
            down: true,
        };
        if let EvaluationMode::Discrete(_) = self.mode {
            self.user_stroke.clear();
            self.user_stroke.push(self.viewport.to_normalized(position));
        }
    }

    /// Pointer moved to `position` (pixels).
    pub fn pointer_move(&mut self, position: Point) {
        self.pointer.position = position;
        if self.pointer.down {
            if let EvaluationMode::Discrete(_) = self.mode {
                self.user_stroke.push(self.viewport.to_normalized(position));
            }
        }
    }

    /// Pointer released.
    ///
    /// In discrete mode the buffered stroke is judged against the current
    /// template. Returns `None` if the pointer was not pressed, the guide is
    /// already complete, or the session is in live mode (live strokes complete
    /// from [`PracticeSession::frame`]).
    pub fn pointer_up(&mut self) -> Option<StrokeOutcome> {
        if !self.pointer.down {
            return None;
        }
        self.pointer.down = false;

        let EvaluationMode::Discrete(difficulty) = self.mode else {
            return None;
        };
        let index = self.stroke_index;
        let Some(template) = self.guide.stroke(index) else {
            self.user_stroke.clear();
            return None;
        };

        let candidate = std::mem::take(&mut self.user_stroke);
        let verdict = self
            .matcher
            .evaluate(&candidate, &template.points, difficulty.threshold());
        if !verdict.accepted {
            debug!(index, score = verdict.score, "stroke rejected");
            return Some(StrokeOutcome::Rejected {
                index,
                score: verdict.score,
            });
        }

        self.accepted.push(candidate);
        self.stroke_index += 1;
        if self.is_complete() {
            debug!(strokes = self.guide.len(), "guide complete");
            Some(StrokeOutcome::GuideComplete {
                score: verdict.score,
            })
        } else {
            Some(StrokeOutcome::Accepted {
                index,
                score: verdict.score,
            })
        }
    }

    /// Run one live-tracking frame against the current stroke.
    ///
    /// Returns `None` when the ticket is stale, the session is not in live
    /// mode, or every stroke has been completed. The running state stays in
    /// the session, so the returned frame's `state` is empty; use
    /// [`PracticeSession::drawn_path`] to read it.
    pub fn frame(&mut self, ticket: FrameTicket) -> Option<TrackFrame> {
        if ticket != self.ticket() {
            debug!("ignoring frame scheduled for a previous guide");
            return None;
        }
        if self.mode != EvaluationMode::Live {
            return None;
        }
        let template = self.guide.stroke(self.stroke_index)?;

        let mut tracker = LiveTracker::new(
            self.viewport,
            self.guide.snap_tolerance,
            self.guide.done_threshold,
        );
        tracker.smoothing = self.smoothing;

        let state = std::mem::take(&mut self.track);
        let mut frame = tracker.track(self.pointer, &template.points, state);
        self.track = std::mem::take(&mut frame.state);
        self.progress = frame.progress;

        if frame.stroke_complete {
            let viewport = self.viewport;
            self.accepted.push(
                frame
                    .completed_path
                    .iter()
                    .map(|&p| viewport.to_normalized(p))
                    .collect(),
            );
            self.stroke_index = (self.stroke_index + 1).min(self.guide.len());
            self.progress = 0.0;
            debug!(index = self.stroke_index, "advanced to next stroke");
        }
        Some(frame)
    }
}
