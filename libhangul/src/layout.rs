//! Slot boxes of the syllable block.
//!
//! Where the initial, medial and final jamo go depends on the shape of the
//! medial vowel: vertical vowels put the consonant on the left, horizontal
//! vowels stack it above or below, and compound vowels mix the two. All boxes
//! are inset by a fixed margin from the `[0,1]²` block.

use libstroke_core::{Glyph, Rect, Stroke};
use serde::{Deserialize, Serialize};

use crate::composite::Slot;
use crate::jamo::Medial;

/// Inset from every edge of the syllable block.
pub const MARGIN: f64 = 0.08;

/// Layout family of a medial vowel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VowelClass {
    /// ㅏ ㅑ ㅓ ㅕ ㅣ ㅐ ㅔ ㅒ ㅖ
    Vertical,
    /// ㅗ ㅛ
    HorizontalTop,
    /// ㅜ ㅠ
    HorizontalBottom,
    /// ㅡ
    Flat,
    /// ㅘ ㅙ ㅚ
    CompoundO,
    /// ㅝ ㅞ ㅟ
    CompoundU,
    /// ㅢ
    CompoundEu,
}

impl VowelClass {
    pub const ALL: [VowelClass; 7] = [
        VowelClass::Vertical,
        VowelClass::HorizontalTop,
        VowelClass::HorizontalBottom,
        VowelClass::Flat,
        VowelClass::CompoundO,
        VowelClass::CompoundU,
        VowelClass::CompoundEu,
    ];

    pub fn of(medial: Medial) -> Self {
        use Medial::*;
        match medial {
            A | Ya | Eo | Yeo | I | Ae | E | Yae | Ye => VowelClass::Vertical,
            O | Yo => VowelClass::HorizontalTop,
            U | Yu => VowelClass::HorizontalBottom,
            Eu => VowelClass::Flat,
            Wa | Wae | Oe => VowelClass::CompoundO,
            Wo | We | Wi => VowelClass::CompoundU,
            Ui => VowelClass::CompoundEu,
        }
    }
}

/// Boxes for the three slots of one syllable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotBoxes {
    pub initial: Rect,
    pub medial: Rect,
    pub final_: Rect,
}

impl SlotBoxes {
    pub fn get(&self, slot: Slot) -> Rect {
        match slot {
            Slot::Initial => self.initial,
            Slot::Medial => self.medial,
            Slot::Final => self.final_,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, Rect)> {
        [
            (Slot::Initial, self.initial),
            (Slot::Medial, self.medial),
            (Slot::Final, self.final_),
        ]
        .into_iter()
    }
}

/// Slot boxes for `class` with the given outer margin.
pub fn boxes_for_class(class: VowelClass, margin: f64) -> SlotBoxes {
    let m = margin;
    let w = 1.0 - 2.0 * m;
    let h = 1.0 - 2.0 * m;
    let b = Rect::new;
    match class {
        VowelClass::Vertical => SlotBoxes {
            initial: b(m, m, w * 0.52, h),
            medial: b(m + w * 0.45, m, w * 0.45, h),
            final_: b(m, m + h * 0.58, w, h * 0.42),
        },
        VowelClass::HorizontalTop => SlotBoxes {
            initial: b(m, m + h * 0.25, w, h * 0.45),
            medial: b(m, m, w, h * 0.40),
            final_: b(m, m + h * 0.65, w, h * 0.35),
        },
        VowelClass::HorizontalBottom => SlotBoxes {
            initial: b(m, m, w, h * 0.45),
            medial: b(m, m + h * 0.55, w, h * 0.40),
            final_: b(m, m + h * 0.85, w, h * 0.15),
        },
        VowelClass::Flat => SlotBoxes {
            initial: b(m, m, w, h * 0.60),
            medial: b(m, m + h * 0.50, w, h * 0.20),
            final_: b(m, m + h * 0.70, w, h * 0.30),
        },
        VowelClass::CompoundO => SlotBoxes {
            initial: b(m, m + h * 0.25, w * 0.60, h * 0.45),
            medial: b(m + w * 0.50, m, w * 0.42, h),
            final_: b(m, m + h * 0.65, w, h * 0.35),
        },
        VowelClass::CompoundU => SlotBoxes {
            initial: b(m, m, w * 0.60, h * 0.45),
            medial: b(m + w * 0.45, m, w * 0.50, h),
            final_: b(m, m + h * 0.85, w, h * 0.15),
        },
        VowelClass::CompoundEu => SlotBoxes {
            initial: b(m, m, w, h * 0.50),
            medial: b(m, m + h * 0.45, w, h * 0.50),
            final_: b(m, m + h * 0.85, w, h * 0.15),
        },
    }
}

/// Slot boxes for a syllable whose medial is `medial`; a missing medial uses
/// the vertical layout.
pub fn layout_boxes(medial: Option<Medial>, margin: f64) -> SlotBoxes {
    let class = medial.map_or(VowelClass::Vertical, VowelClass::of);
    boxes_for_class(class, margin)
}

/// Map a glyph's local strokes into `rect`.
pub fn place(glyph: &Glyph, rect: &Rect) -> Vec<Stroke> {
    glyph.place(rect)
}
