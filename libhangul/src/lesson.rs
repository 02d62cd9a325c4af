//! Staged practice lessons.
//!
//! A lesson is an ordered list of stages, each a short text whose syllables
//! are traced one after another. The lesson owns the [`PracticeSession`] for
//! the syllable being traced and moves it to the next syllable once every
//! stroke has been accepted.

use std::path::Path;

use anyhow::Result;
use libstroke_core::{
    CharGuide, EvaluationMode, FrameTicket, PracticeSession, Point, StrokeOutcome, TrackFrame,
    Unit,
};
use tracing::{debug, info};

use crate::builder::GuideBuilder;
use crate::config::HangulConfig;

/// Stages practiced when no lesson text is given.
pub const DEFAULT_STAGES: [&str; 4] = ["가", "강", "강아", "강아지"];

/// One stage: a label and the guides traced in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    pub label: String,
    pub guides: Vec<(String, CharGuide)>,
}

impl Stage {
    /// Build a stage from text. Characters without strokes (spaces,
    /// punctuation, Latin letters) are skipped.
    pub fn from_text(builder: &mut GuideBuilder, text: &str) -> Self {
        let guides = builder
            .guides_in_order(text)
            .into_iter()
            .filter(|(_, guide)| !guide.is_empty())
            .map(|(ch, guide)| (ch.to_string(), guide))
            .collect();
        Self {
            label: text.to_string(),
            guides,
        }
    }

    /// A single-guide stage from a unit data file.
    pub fn from_unit(unit: &Unit) -> Self {
        Self {
            label: unit.label.clone(),
            guides: vec![(unit.label.clone(), unit.to_guide())],
        }
    }

    pub fn len(&self) -> usize {
        self.guides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guides.is_empty()
    }
}

/// A sequence of stages with a live practice session.
#[derive(Debug)]
pub struct Lesson {
    stages: Vec<Stage>,
    stage_index: usize,
    guide_index: usize,
    session: PracticeSession,
}

impl Lesson {
    /// Lesson over the default stages with default configuration.
    pub fn with_default_stages(mode: EvaluationMode) -> Self {
        Self::from_texts(&HangulConfig::default(), DEFAULT_STAGES, mode)
    }

    /// Lesson with one stage per text.
    pub fn from_texts<I, S>(config: &HangulConfig, texts: I, mode: EvaluationMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GuideBuilder::new(config.clone());
        let stages = texts
            .into_iter()
            .map(|t| Stage::from_text(&mut builder, t.as_ref()))
            .collect();
        Self::new(config, stages, mode)
    }

    /// Lesson with one stage per unit data file.
    pub fn from_units(config: &HangulConfig, units: &[Unit], mode: EvaluationMode) -> Self {
        Self::new(config, units.iter().map(Stage::from_unit).collect(), mode)
    }

    /// Lesson with one stage per unit JSON file, in the order given.
    pub fn load_units<P: AsRef<Path>>(
        config: &HangulConfig,
        paths: &[P],
        mode: EvaluationMode,
    ) -> Result<Self> {
        let units = paths
            .iter()
            .map(|p| Unit::load_json(p))
            .collect::<Result<Vec<_>>>()?;
        info!(units = units.len(), "loaded lesson units");
        Ok(Self::from_units(config, &units, mode))
    }

    pub fn new(config: &HangulConfig, mut stages: Vec<Stage>, mode: EvaluationMode) -> Self {
        if stages.is_empty() {
            stages.push(Stage {
                label: String::new(),
                guides: Vec::new(),
            });
        }
        let guide = first_guide(&stages[0]);
        Self {
            stages,
            stage_index: 0,
            guide_index: 0,
            session: PracticeSession::with_config(guide, mode, config.base()),
        }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn stage_index(&self) -> usize {
        self.stage_index
    }

    pub fn stage(&self) -> &Stage {
        &self.stages[self.stage_index]
    }

    /// Index of the guide being traced within the current stage.
    pub fn guide_index(&self) -> usize {
        self.guide_index
    }

    /// Text of the guide being traced, if the stage has any.
    pub fn current_text(&self) -> Option<&str> {
        self.stage()
            .guides
            .get(self.guide_index)
            .map(|(text, _)| text.as_str())
    }

    pub fn session(&self) -> &PracticeSession {
        &self.session
    }

    pub fn set_mode(&mut self, mode: EvaluationMode) {
        self.session.set_mode(mode);
    }

    /// Whether the last stroke of the last guide in this stage is done.
    pub fn is_stage_complete(&self) -> bool {
        self.guide_index + 1 >= self.stage().len() && self.session.is_complete()
    }

    /// Move to the next stage. Stays on the last stage (restarting it) when
    /// already there. Returns whether the stage changed.
    pub fn next_stage(&mut self) -> bool {
        let target = (self.stage_index + 1).min(self.stages.len() - 1);
        self.go_to(target)
    }

    /// Move to the previous stage, clamped at the first one.
    pub fn prev_stage(&mut self) -> bool {
        let target = self.stage_index.saturating_sub(1);
        self.go_to(target)
    }

    /// Restart the current stage from its first guide.
    pub fn reset_stage(&mut self) {
        self.guide_index = 0;
        let guide = first_guide(self.stage());
        self.session.set_guide(guide);
    }

    fn go_to(&mut self, index: usize) -> bool {
        let changed = index != self.stage_index;
        self.stage_index = index;
        self.reset_stage();
        info!(stage = index, label = %self.stage().label, "entered stage");
        changed
    }

    pub fn pointer_down(&mut self, position: Point) {
        self.session.pointer_down(position);
    }

    pub fn pointer_move(&mut self, position: Point) {
        self.session.pointer_move(position);
    }

    /// Release the pointer; moves on to the next guide when the current one
    /// is finished.
    pub fn pointer_up(&mut self) -> Option<StrokeOutcome> {
        let outcome = self.session.pointer_up();
        self.advance_guide();
        outcome
    }

    pub fn ticket(&self) -> FrameTicket {
        self.session.ticket()
    }

    /// Run one live-tracking frame.
    pub fn frame(&mut self, ticket: FrameTicket) -> Option<TrackFrame> {
        let frame = self.session.frame(ticket)?;
        if frame.stroke_complete {
            self.advance_guide();
        }
        Some(frame)
    }

    fn advance_guide(&mut self) {
        if !self.session.is_complete() || self.guide_index + 1 >= self.stage().len() {
            return;
        }
        self.guide_index += 1;
        let guide = self.stage().guides[self.guide_index].1.clone();
        debug!(guide = self.guide_index, "next guide in stage");
        self.session.set_guide(guide);
    }
}

fn first_guide(stage: &Stage) -> CharGuide {
    stage
        .guides
        .first()
        .map(|(_, guide)| guide.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stages_are_built_in_order() {
        let lesson = Lesson::with_default_stages(EvaluationMode::Live);
        let labels: Vec<&str> = lesson.stages().iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, DEFAULT_STAGES);
        assert_eq!(lesson.stages()[3].len(), 3);
        assert_eq!(lesson.current_text(), Some("가"));
    }

    #[test]
    fn stage_navigation_clamps() {
        let mut lesson = Lesson::with_default_stages(EvaluationMode::default());
        assert!(!lesson.prev_stage());
        assert_eq!(lesson.stage_index(), 0);
        for _ in 0..3 {
            assert!(lesson.next_stage());
        }
        assert_eq!(lesson.stage().label, "강아지");
        assert!(!lesson.next_stage());
        assert_eq!(lesson.stage_index(), 3);
        assert!(lesson.prev_stage());
        assert_eq!(lesson.stage().label, "강아");
    }

    #[test]
    fn stages_skip_characters_without_strokes() {
        let lesson = Lesson::from_texts(
            &HangulConfig::default(),
            ["강 아!"],
            EvaluationMode::default(),
        );
        assert_eq!(lesson.stage().len(), 2);
    }

    #[test]
    fn empty_lesson_has_one_empty_stage() {
        let lesson = Lesson::new(&HangulConfig::default(), Vec::new(), EvaluationMode::Live);
        assert_eq!(lesson.stages().len(), 1);
        assert!(lesson.is_stage_complete());
        assert_eq!(lesson.current_text(), None);
    }

    #[test]
    fn units_load_from_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let ga = dir.path().join("ga.json");
        let na = dir.path().join("na.json");
        std::fs::write(&ga, r#"{"label":"가","strokes":[{"path":[[0.2,0.3],[0.5,0.3]]}]}"#).unwrap();
        std::fs::write(
            &na,
            r#"{"label":"나","strokes":[{"path":[[0.2,0.2],[0.2,0.7]]},{"path":[[0.6,0.2],[0.6,0.8]]}]}"#,
        )
        .unwrap();

        let mut lesson =
            Lesson::load_units(&HangulConfig::default(), &[&ga, &na], EvaluationMode::Live).unwrap();
        assert_eq!(lesson.stages().len(), 2);
        assert_eq!(lesson.current_text(), Some("가"));
        lesson.next_stage();
        assert_eq!(lesson.current_text(), Some("나"));
        assert_eq!(lesson.session().guide().len(), 2);

        let missing = dir.path().join("missing.json");
        assert!(Lesson::load_units(&HangulConfig::default(), &[&ga, &missing], EvaluationMode::Live).is_err());
    }

    #[test]
    fn unit_stage_uses_unit_label() {
        let unit = Unit::from_json_str(
            r#"{"label":"가","strokes":[{"path":[[0.2,0.3],[0.5,0.3]]}]}"#,
        )
        .unwrap();
        let lesson = Lesson::from_units(&HangulConfig::default(), &[unit], EvaluationMode::Live);
        assert_eq!(lesson.current_text(), Some("가"));
        assert_eq!(lesson.session().guide().len(), 1);
    }
}
