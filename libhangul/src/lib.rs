//! # libhangul
//!
//! Hangul handwriting guides built on libstroke-core: syllable decomposition,
//! the jamo glyph library, block layout and staged practice lessons.

pub mod jamo;
pub mod glyphs;
pub mod composite;
pub mod layout;
pub mod config;
pub mod builder;
pub mod lesson;

// Re-export matching and session types from core
pub use libstroke_core::{
    evaluate_stroke, project_to_polyline, track_frame, CharGuide, Difficulty, EvaluationMode,
    GuidePack, PracticeSession, StrokeOutcome, TrackFrame, Unit,
};

pub use config::HangulConfig;
pub use jamo::{compose, decompose, letter, Decomposition, Final, Initial, JamoLetter, Medial};
pub use composite::{Recipe, Resolver, Slot};
pub use layout::{boxes_for_class, layout_boxes, SlotBoxes, VowelClass};
pub use builder::{build_guide_for_syllable, build_guides_for_text, GuideBuilder};
pub use lesson::{Lesson, Stage, DEFAULT_STAGES};
