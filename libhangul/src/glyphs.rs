// libhangul/src/glyphs.rs
//
// Stroke library for the basic Hangul letters.
//
// Each letter is a list of strokes in local [0,1]² space (x to the right,
// y downwards), listed in writing order. Only the fourteen basic consonants
// and ten basic vowels are defined here; doubled consonants, final clusters
// and compound vowels are assembled from these by `composite`.
//
// Consonants keep their x range inside [0.2, 0.8] so that the widest doubled
// offset (0.20) still lands inside the slot box.
//
// These shapes are a teaching approximation of handwritten jamo, not font
// outlines.

use std::collections::HashMap;

use libstroke_core::{Glyph, Point, Stroke, StrokeKind};
use once_cell::sync::Lazy;

use crate::jamo::{Consonant, Medial};

struct StrokeDef {
    kind: StrokeKind,
    points: &'static [[f64; 2]],
}

const fn line(points: &'static [[f64; 2]]) -> StrokeDef {
    StrokeDef {
        kind: StrokeKind::Line,
        points,
    }
}

const fn curve(points: &'static [[f64; 2]]) -> StrokeDef {
    StrokeDef {
        kind: StrokeKind::Curve,
        points,
    }
}

fn build(defs: &[StrokeDef]) -> Glyph {
    Glyph::new(
        defs.iter()
            .map(|d| Stroke::new(d.kind, d.points.iter().map(|&p| Point::from(p)).collect()))
            .collect(),
    )
}

const IEUNG_RING: [[f64; 2]; 13] = [
    [0.500, 0.200], [0.350, 0.240], [0.240, 0.350], [0.200, 0.500], [0.240, 0.650],
    [0.350, 0.760], [0.500, 0.800], [0.650, 0.760], [0.760, 0.650], [0.800, 0.500],
    [0.760, 0.350], [0.650, 0.240], [0.500, 0.200],
];

const HIEUT_RING: [[f64; 2]; 13] = [
    [0.500, 0.420], [0.400, 0.447], [0.327, 0.520], [0.300, 0.620], [0.327, 0.720],
    [0.400, 0.793], [0.500, 0.820], [0.600, 0.793], [0.673, 0.720], [0.700, 0.620],
    [0.673, 0.520], [0.600, 0.447], [0.500, 0.420],
];

const FINAL_HIEUT_RING: [[f64; 2]; 13] = [
    [0.500, 0.380], [0.390, 0.409], [0.309, 0.490], [0.280, 0.600], [0.309, 0.710],
    [0.390, 0.791], [0.500, 0.820], [0.610, 0.791], [0.691, 0.710], [0.720, 0.600],
    [0.691, 0.490], [0.610, 0.409], [0.500, 0.380],
];

const GIYEOK: &[StrokeDef] = &[line(&[[0.22, 0.2], [0.75, 0.2], [0.7, 0.82]])];
const NIEUN: &[StrokeDef] = &[line(&[[0.25, 0.15], [0.25, 0.8], [0.78, 0.8]])];
const DIGEUT: &[StrokeDef] = &[
    line(&[[0.25, 0.2], [0.75, 0.2]]),
    line(&[[0.25, 0.2], [0.25, 0.8], [0.78, 0.8]]),
];
const RIEUL: &[StrokeDef] = &[
    line(&[[0.25, 0.15], [0.75, 0.15], [0.75, 0.48]]),
    line(&[[0.25, 0.48], [0.75, 0.48]]),
    line(&[[0.25, 0.48], [0.25, 0.85], [0.78, 0.85]]),
];
const MIEUM: &[StrokeDef] = &[
    line(&[[0.25, 0.2], [0.25, 0.8]]),
    line(&[[0.25, 0.2], [0.75, 0.2], [0.75, 0.8]]),
    line(&[[0.25, 0.8], [0.75, 0.8]]),
];
const BIEUP: &[StrokeDef] = &[
    line(&[[0.25, 0.15], [0.25, 0.85]]),
    line(&[[0.75, 0.15], [0.75, 0.85]]),
    line(&[[0.25, 0.5], [0.75, 0.5]]),
    line(&[[0.25, 0.85], [0.75, 0.85]]),
];
const SIOT: &[StrokeDef] = &[
    curve(&[[0.5, 0.15], [0.38, 0.5], [0.2, 0.85]]),
    curve(&[[0.47, 0.45], [0.62, 0.65], [0.8, 0.85]]),
];
const IEUNG: &[StrokeDef] = &[curve(&IEUNG_RING)];
const JIEUT: &[StrokeDef] = &[
    line(&[[0.22, 0.2], [0.72, 0.2], [0.22, 0.85]]),
    line(&[[0.48, 0.5], [0.8, 0.85]]),
];
const CHIEUT: &[StrokeDef] = &[
    line(&[[0.5, 0.08], [0.5, 0.2]]),
    line(&[[0.22, 0.3], [0.72, 0.3], [0.22, 0.88]]),
    line(&[[0.48, 0.58], [0.8, 0.88]]),
];
const KIEUK: &[StrokeDef] = &[
    line(&[[0.22, 0.2], [0.75, 0.2], [0.7, 0.82]]),
    line(&[[0.25, 0.5], [0.73, 0.5]]),
];
const TIEUT: &[StrokeDef] = &[
    line(&[[0.25, 0.2], [0.75, 0.2]]),
    line(&[[0.25, 0.5], [0.75, 0.5]]),
    line(&[[0.25, 0.2], [0.25, 0.8], [0.78, 0.8]]),
];
const PIEUP: &[StrokeDef] = &[
    line(&[[0.2, 0.2], [0.8, 0.2]]),
    line(&[[0.38, 0.2], [0.38, 0.8]]),
    line(&[[0.62, 0.2], [0.62, 0.8]]),
    line(&[[0.2, 0.8], [0.8, 0.8]]),
];
const HIEUT: &[StrokeDef] = &[
    line(&[[0.5, 0.1], [0.5, 0.22]]),
    line(&[[0.25, 0.3], [0.75, 0.3]]),
    curve(&HIEUT_RING),
];

const FINAL_GIYEOK: &[StrokeDef] = &[line(&[[0.2, 0.3], [0.8, 0.3], [0.78, 0.75]])];
const FINAL_SIOT: &[StrokeDef] = &[
    curve(&[[0.5, 0.2], [0.36, 0.5], [0.2, 0.8]]),
    curve(&[[0.46, 0.42], [0.64, 0.62], [0.8, 0.8]]),
];
const FINAL_CHIEUT: &[StrokeDef] = &[
    line(&[[0.22, 0.25], [0.72, 0.25], [0.22, 0.85]]),
    line(&[[0.48, 0.55], [0.8, 0.85]]),
];
const FINAL_HIEUT: &[StrokeDef] = &[line(&[[0.25, 0.25], [0.75, 0.25]]), curve(&FINAL_HIEUT_RING)];

const VOWEL_A: &[StrokeDef] = &[
    line(&[[0.35, 0.08], [0.35, 0.92]]),
    line(&[[0.35, 0.48], [0.62, 0.48]]),
];
const VOWEL_YA: &[StrokeDef] = &[
    line(&[[0.35, 0.08], [0.35, 0.92]]),
    line(&[[0.35, 0.36], [0.62, 0.36]]),
    line(&[[0.35, 0.6], [0.62, 0.6]]),
];
const VOWEL_EO: &[StrokeDef] = &[
    line(&[[0.1, 0.48], [0.42, 0.48]]),
    line(&[[0.42, 0.08], [0.42, 0.92]]),
];
const VOWEL_YEO: &[StrokeDef] = &[
    line(&[[0.1, 0.36], [0.42, 0.36]]),
    line(&[[0.1, 0.6], [0.42, 0.6]]),
    line(&[[0.42, 0.08], [0.42, 0.92]]),
];
const VOWEL_O: &[StrokeDef] = &[
    line(&[[0.5, 0.3], [0.5, 0.65]]),
    line(&[[0.1, 0.65], [0.9, 0.65]]),
];
const VOWEL_YO: &[StrokeDef] = &[
    line(&[[0.38, 0.3], [0.38, 0.65]]),
    line(&[[0.62, 0.3], [0.62, 0.65]]),
    line(&[[0.1, 0.65], [0.9, 0.65]]),
];
const VOWEL_U: &[StrokeDef] = &[
    line(&[[0.1, 0.35], [0.9, 0.35]]),
    line(&[[0.5, 0.35], [0.5, 0.75]]),
];
const VOWEL_YU: &[StrokeDef] = &[
    line(&[[0.1, 0.35], [0.9, 0.35]]),
    line(&[[0.38, 0.35], [0.38, 0.75]]),
    line(&[[0.62, 0.35], [0.62, 0.75]]),
];
const VOWEL_EU: &[StrokeDef] = &[line(&[[0.1, 0.5], [0.9, 0.5]])];
const VOWEL_I: &[StrokeDef] = &[line(&[[0.8, 0.08], [0.8, 0.92]])];

fn consonant_defs(c: Consonant) -> &'static [StrokeDef] {
    match c {
        Consonant::Giyeok => GIYEOK,
        Consonant::Nieun => NIEUN,
        Consonant::Digeut => DIGEUT,
        Consonant::Rieul => RIEUL,
        Consonant::Mieum => MIEUM,
        Consonant::Bieup => BIEUP,
        Consonant::Siot => SIOT,
        Consonant::Ieung => IEUNG,
        Consonant::Jieut => JIEUT,
        Consonant::Chieut => CHIEUT,
        Consonant::Kieuk => KIEUK,
        Consonant::Tieut => TIEUT,
        Consonant::Pieup => PIEUP,
        Consonant::Hieut => HIEUT,
    }
}

/// Simplified shapes some consonants take when closing a syllable.
fn final_defs(c: Consonant) -> Option<&'static [StrokeDef]> {
    match c {
        Consonant::Giyeok => Some(FINAL_GIYEOK),
        Consonant::Siot => Some(FINAL_SIOT),
        Consonant::Chieut => Some(FINAL_CHIEUT),
        Consonant::Hieut => Some(FINAL_HIEUT),
        _ => None,
    }
}

fn vowel_defs(v: Medial) -> Option<&'static [StrokeDef]> {
    match v {
        Medial::A => Some(VOWEL_A),
        Medial::Ya => Some(VOWEL_YA),
        Medial::Eo => Some(VOWEL_EO),
        Medial::Yeo => Some(VOWEL_YEO),
        Medial::O => Some(VOWEL_O),
        Medial::Yo => Some(VOWEL_YO),
        Medial::U => Some(VOWEL_U),
        Medial::Yu => Some(VOWEL_YU),
        Medial::Eu => Some(VOWEL_EU),
        Medial::I => Some(VOWEL_I),
        _ => None,
    }
}

struct GlyphLibrary {
    consonants: HashMap<Consonant, Glyph>,
    finals: HashMap<Consonant, Glyph>,
    vowels: HashMap<Medial, Glyph>,
}

static LIBRARY: Lazy<GlyphLibrary> = Lazy::new(|| {
    let consonants = Consonant::ALL
        .iter()
        .map(|&c| (c, build(consonant_defs(c))))
        .collect();
    let finals = Consonant::ALL
        .iter()
        .filter_map(|&c| final_defs(c).map(|d| (c, build(d))))
        .collect();
    let vowels = Medial::ALL
        .iter()
        .filter_map(|&v| vowel_defs(v).map(|d| (v, build(d))))
        .collect();
    GlyphLibrary {
        consonants,
        finals,
        vowels,
    }
});

/// Initial-position glyph of a basic consonant.
pub fn consonant(c: Consonant) -> &'static Glyph {
    &LIBRARY.consonants[&c]
}

/// Final-position override of a basic consonant, if it has one.
pub fn final_override(c: Consonant) -> Option<&'static Glyph> {
    LIBRARY.finals.get(&c)
}

/// Glyph of a consonant in final position: the override when present,
/// otherwise the initial-position shape.
pub fn final_consonant(c: Consonant) -> &'static Glyph {
    final_override(c).unwrap_or_else(|| consonant(c))
}

/// Glyph of a basic vowel; `None` for vowels that are composed from others.
pub fn vowel(v: Medial) -> Option<&'static Glyph> {
    LIBRARY.vowels.get(&v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_unit_square(g: &Glyph) -> bool {
        g.strokes
            .iter()
            .flat_map(|s| s.points.iter())
            .all(|p| (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y))
    }

    #[test]
    fn every_consonant_has_a_glyph() {
        for c in Consonant::ALL {
            let g = consonant(c);
            assert!(g.stroke_count() >= 1, "{:?}", c);
            assert!(in_unit_square(g), "{:?}", c);
            assert!(g
                .strokes
                .iter()
                .flat_map(|s| s.points.iter())
                .all(|p| p.x >= 0.2 && p.x <= 0.8), "{:?} leaves the doubling margin", c);
        }
    }

    #[test]
    fn final_lookup_prefers_override() {
        assert_eq!(final_consonant(Consonant::Hieut).stroke_count(), 2);
        assert_eq!(consonant(Consonant::Hieut).stroke_count(), 3);
        assert!(final_override(Consonant::Nieun).is_none());
        assert_eq!(final_consonant(Consonant::Nieun), consonant(Consonant::Nieun));
    }

    #[test]
    fn basic_vowels_only() {
        let basic = [
            Medial::A,
            Medial::Ya,
            Medial::Eo,
            Medial::Yeo,
            Medial::O,
            Medial::Yo,
            Medial::U,
            Medial::Yu,
            Medial::Eu,
            Medial::I,
        ];
        for v in Medial::ALL {
            assert_eq!(vowel(v).is_some(), basic.contains(&v), "{:?}", v);
            if let Some(g) = vowel(v) {
                assert!(in_unit_square(g));
            }
        }
    }
}
