//! Glyph resolution for jamo without a direct library entry.
//!
//! Every jamo is described by a [`Recipe`] (a simple letter, a doubled
//! letter, a final cluster or a compound vowel) and resolved for a [`Slot`]
//! by one recursive function. Recursion is bounded: components of a recipe
//! are always simple letters, and anything deeper than [`MAX_DEPTH`] falls
//! back to a default glyph.

use std::collections::HashMap;

use libstroke_core::Glyph;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::glyphs;
use crate::jamo::{Consonant, Final, FinalShape, Initial, Medial};

/// Horizontal offset of each copy of a doubled initial consonant.
pub const INITIAL_DOUBLE_SHIFT: f64 = 0.12;
/// Horizontal offset of each copy of a doubled final consonant.
pub const FINAL_DOUBLE_SHIFT: f64 = 0.20;
/// Spacing between the components of a final cluster.
pub const CLUSTER_SPREAD: f64 = 0.18;
/// Deepest nesting of recipes that is resolved before falling back.
pub const MAX_DEPTH: usize = 2;

/// Position of a jamo inside the syllable block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Initial,
    Medial,
    Final,
}

/// How a jamo's glyph is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipe {
    Consonant(Consonant),
    Doubled(Consonant),
    CompoundFinal([Consonant; 2]),
    Vowel(Medial),
    CompoundVowel([Medial; 2]),
}

/// Compound vowels and the two vowels they are drawn as.
///
/// Some entries are visual approximations rather than the true components
/// (ㅙ as ㅗ+ㅑ, ㅞ as ㅜ+ㅕ, and ㅐ ㅔ ㅒ ㅖ drawn with a separate ㅣ).
static COMPOUND_VOWELS: Lazy<HashMap<Medial, [Medial; 2]>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(Medial::Wa, [Medial::O, Medial::A]);
    m.insert(Medial::Wae, [Medial::O, Medial::Ya]);
    m.insert(Medial::Oe, [Medial::O, Medial::I]);
    m.insert(Medial::Wo, [Medial::U, Medial::Eo]);
    m.insert(Medial::We, [Medial::U, Medial::Yeo]);
    m.insert(Medial::Wi, [Medial::U, Medial::I]);
    m.insert(Medial::Ui, [Medial::Eu, Medial::I]);
    m.insert(Medial::Ae, [Medial::A, Medial::I]);
    m.insert(Medial::E, [Medial::Eo, Medial::I]);
    m.insert(Medial::Yae, [Medial::Ya, Medial::I]);
    m.insert(Medial::Ye, [Medial::Yeo, Medial::I]);
    m
});

/// Offsets applied while assembling composite glyphs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolver {
    pub initial_double_shift: f64,
    pub final_double_shift: f64,
    pub cluster_spread: f64,
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            initial_double_shift: INITIAL_DOUBLE_SHIFT,
            final_double_shift: FINAL_DOUBLE_SHIFT,
            cluster_spread: CLUSTER_SPREAD,
        }
    }
}

impl Recipe {
    pub fn for_initial(initial: Initial) -> Self {
        match initial.shape() {
            (c, true) => Recipe::Doubled(c),
            (c, false) => Recipe::Consonant(c),
        }
    }

    pub fn for_medial(medial: Medial) -> Self {
        match COMPOUND_VOWELS.get(&medial) {
            Some(&parts) => Recipe::CompoundVowel(parts),
            None => Recipe::Vowel(medial),
        }
    }

    pub fn for_final(final_: Final) -> Self {
        match final_.shape() {
            FinalShape::Single(c) => Recipe::Consonant(c),
            FinalShape::Doubled(c) => Recipe::Doubled(c),
            FinalShape::Cluster(parts) => Recipe::CompoundFinal(parts),
        }
    }
}

/// Glyph used when a consonant cannot be resolved (ㄱ).
pub fn fallback_consonant() -> Glyph {
    glyphs::consonant(Consonant::Giyeok).clone()
}

/// Glyph used when a vowel cannot be resolved (ㅣ).
pub fn fallback_vowel() -> Glyph {
    glyphs::vowel(Medial::I).cloned().unwrap_or_default()
}

impl Resolver {
    /// Resolve `recipe` for `slot`.
    pub fn resolve(&self, recipe: Recipe, slot: Slot) -> Glyph {
        self.resolve_at(recipe, slot, 0)
    }

    fn resolve_at(&self, recipe: Recipe, slot: Slot, depth: usize) -> Glyph {
        if depth > MAX_DEPTH {
            warn!(?recipe, depth, "glyph recipe nested too deeply");
            return match recipe {
                Recipe::Vowel(_) | Recipe::CompoundVowel(_) => fallback_vowel(),
                _ => fallback_consonant(),
            };
        }

        match recipe {
            Recipe::Consonant(c) => match slot {
                Slot::Final => glyphs::final_consonant(c).clone(),
                _ => glyphs::consonant(c).clone(),
            },
            Recipe::Doubled(c) => {
                let shift = match slot {
                    Slot::Final => self.final_double_shift,
                    _ => self.initial_double_shift,
                };
                // Both copies use the initial-position shape.
                let base = glyphs::consonant(c);
                let mut glyph = base.translated(-shift, 0.0);
                glyph.extend(base.translated(shift, 0.0));
                glyph
            }
            Recipe::CompoundFinal(parts) => {
                if slot != Slot::Final {
                    return fallback_consonant();
                }
                let k = parts.len() as f64;
                let mut glyph = Glyph::default();
                for (i, &part) in parts.iter().enumerate() {
                    let dx = (i as f64 - (k - 1.0) / 2.0) * self.cluster_spread;
                    let component = self.resolve_at(Recipe::Consonant(part), Slot::Final, depth + 1);
                    glyph.extend(component.translated(dx, 0.0));
                }
                glyph
            }
            Recipe::Vowel(v) => match glyphs::vowel(v) {
                Some(g) => g.clone(),
                None => match COMPOUND_VOWELS.get(&v) {
                    Some(&parts) => self.resolve_at(Recipe::CompoundVowel(parts), slot, depth + 1),
                    None => fallback_vowel(),
                },
            },
            Recipe::CompoundVowel(parts) => {
                let mut glyph = Glyph::default();
                for &part in parts.iter() {
                    glyph.extend(self.resolve_at(Recipe::Vowel(part), slot, depth + 1));
                }
                glyph
            }
        }
    }

    pub fn initial(&self, initial: Initial) -> Glyph {
        self.resolve(Recipe::for_initial(initial), Slot::Initial)
    }

    pub fn medial(&self, medial: Medial) -> Glyph {
        self.resolve(Recipe::for_medial(medial), Slot::Medial)
    }

    pub fn final_(&self, final_: Final) -> Glyph {
        self.resolve(Recipe::for_final(final_), Slot::Final)
    }
}
