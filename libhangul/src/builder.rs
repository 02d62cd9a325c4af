//! Guide construction for Hangul syllables.
//!
//! A guide is built by decomposing the syllable, resolving a glyph for each
//! jamo, and placing the glyphs into the slot boxes chosen by the medial
//! vowel. Strokes are emitted initial → medial → final, which is the order
//! they must be drawn in.

use std::collections::HashMap;
use std::num::NonZeroUsize;

use libstroke_core::{CharGuide, GuidePack, Stroke};
use lru::LruCache;
use tracing::{debug, trace};
use unicode_normalization::UnicodeNormalization;

use crate::composite::Resolver;
use crate::config::HangulConfig;
use crate::jamo::decompose;
use crate::layout::{layout_boxes, place};

/// Builds (and caches) guides with a fixed configuration.
#[derive(Debug)]
pub struct GuideBuilder {
    config: HangulConfig,
    resolver: Resolver,
    cache: LruCache<char, CharGuide>,
}

impl Default for GuideBuilder {
    fn default() -> Self {
        Self::new(HangulConfig::default())
    }
}

impl GuideBuilder {
    pub fn new(config: HangulConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            resolver: config.resolver(),
            config,
            cache: LruCache::new(capacity),
        }
    }

    pub fn config(&self) -> &HangulConfig {
        &self.config
    }

    /// Build the guide for one character without touching the cache.
    ///
    /// Characters outside the Hangul syllable block produce an empty guide.
    pub fn build(&self, ch: char) -> CharGuide {
        let jamo = decompose(ch);
        let boxes = layout_boxes(jamo.medial, self.config.margin);

        let mut strokes: Vec<Stroke> = Vec::new();
        if let Some(initial) = jamo.initial {
            strokes.extend(place(&self.resolver.initial(initial), &boxes.initial));
        }
        if let Some(medial) = jamo.medial {
            strokes.extend(place(&self.resolver.medial(medial), &boxes.medial));
        }
        if let Some(final_) = jamo.final_ {
            strokes.extend(place(&self.resolver.final_(final_), &boxes.final_));
        }

        debug!(%ch, %jamo, strokes = strokes.len(), "built guide");
        CharGuide::new(strokes)
            .with_tolerances(self.config.base.snap_tolerance, self.config.base.done_threshold)
    }

    /// Guide for one character, served from the cache when possible.
    pub fn guide(&mut self, ch: char) -> CharGuide {
        if let Some(guide) = self.cache.get(&ch) {
            trace!(%ch, "guide cache hit");
            return guide.clone();
        }
        let guide = self.build(ch);
        self.cache.put(ch, guide.clone());
        guide
    }

    /// Guides for each character of `text` (NFC-normalized), in order and
    /// including repeats.
    pub fn guides_in_order(&mut self, text: &str) -> Vec<(char, CharGuide)> {
        text.nfc().map(|ch| (ch, self.guide(ch))).collect()
    }

    /// Guide for every distinct character of `text` (NFC-normalized).
    pub fn guides_for_text(&mut self, text: &str) -> HashMap<char, CharGuide> {
        let mut map = HashMap::new();
        for ch in text.nfc() {
            if !map.contains_key(&ch) {
                map.insert(ch, self.guide(ch));
            }
        }
        map
    }

    /// Bundle the guides of `text` into a labelled pack.
    pub fn pack(&mut self, label: &str, text: &str) -> GuidePack {
        let mut pack = GuidePack::new(label);
        for (ch, guide) in self.guides_in_order(text) {
            let text = ch.to_string();
            if pack.get(&text).is_none() {
                pack.push(text, guide);
            }
        }
        pack
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

/// Build the guide for one syllable with the default configuration.
pub fn build_guide_for_syllable(ch: char) -> CharGuide {
    GuideBuilder::default().build(ch)
}

/// Build a guide for every distinct character of `text` with the default
/// configuration.
pub fn build_guides_for_text(text: &str) -> HashMap<char, CharGuide> {
    let builder = GuideBuilder::default();
    let mut map = HashMap::new();
    for ch in text.nfc() {
        map.entry(ch).or_insert_with(|| builder.build(ch));
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composite::Resolver;
    use crate::jamo::{Final, Initial, Medial};
    use crate::layout::{boxes_for_class, VowelClass, MARGIN};

    #[test]
    fn ga_is_initial_then_medial() {
        let guide = build_guide_for_syllable('가');
        let r = Resolver::default();
        let g = r.initial(Initial::G).stroke_count();
        let a = r.medial(Medial::A).stroke_count();
        assert_eq!(guide.len(), g + a);
        assert_eq!(guide.snap_tolerance, 16.0);
        assert_eq!(guide.done_threshold, 0.86);

        let boxes = boxes_for_class(VowelClass::Vertical, MARGIN);
        let first = guide.strokes[0].points[0];
        assert!(boxes.initial.contains_rect(&libstroke_core::Rect::new(first.x, first.y, 0.0, 0.0), 1e-12));
        let vowel_start = guide.strokes[g].points[0];
        assert!(boxes.medial.contains_rect(&libstroke_core::Rect::new(vowel_start.x, vowel_start.y, 0.0, 0.0), 1e-12));
    }

    #[test]
    fn final_strokes_come_last() {
        let guide = build_guide_for_syllable('강');
        let r = Resolver::default();
        let n = r.initial(Initial::G).stroke_count() + r.medial(Medial::A).stroke_count();
        let ng = r.final_(Final::Ng).stroke_count();
        assert_eq!(guide.len(), n + ng);
        let boxes = boxes_for_class(VowelClass::Vertical, MARGIN);
        for s in &guide.strokes[n..] {
            for p in &s.points {
                assert!(p.y >= boxes.final_.y - 1e-12 && p.y <= boxes.final_.bottom() + 1e-12);
            }
        }
    }

    #[test]
    fn non_hangul_yields_empty_guide() {
        assert!(build_guide_for_syllable('x').is_empty());
        assert!(build_guide_for_syllable('ㄱ').is_empty());
        assert!(build_guide_for_syllable(' ').is_empty());
    }

    #[test]
    fn cache_serves_identical_guides() {
        let mut builder = GuideBuilder::default();
        let a = builder.guide('닭');
        assert_eq!(builder.cached_len(), 1);
        let b = builder.guide('닭');
        assert_eq!(a, b);
        assert_eq!(builder.cached_len(), 1);
        builder.clear_cache();
        assert_eq!(builder.cached_len(), 0);
    }

    #[test]
    fn cache_is_bounded() {
        let mut cfg = HangulConfig::default();
        cfg.max_cache_size = 2;
        let mut builder = GuideBuilder::new(cfg);
        for ch in "가나다라".chars() {
            builder.guide(ch);
        }
        assert_eq!(builder.cached_len(), 2);
    }

    #[test]
    fn text_guides_are_per_distinct_char() {
        let map = build_guides_for_text("강아지 강아지");
        assert_eq!(map.len(), 4);
        assert!(map[&' '].is_empty());
        assert_eq!(map[&'강'], build_guide_for_syllable('강'));
    }

    #[test]
    fn conjoining_jamo_are_composed_first() {
        // U+1100 U+1161 is 가 written with conjoining jamo.
        let map = build_guides_for_text("\u{1100}\u{1161}");
        assert_eq!(map.len(), 1);
        assert_eq!(map[&'가'], build_guide_for_syllable('가'));
    }

    #[test]
    fn pack_keeps_first_occurrence_order() {
        let mut builder = GuideBuilder::default();
        let pack = builder.pack("강아지", "강아지아");
        let keys: Vec<&str> = pack.entries.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(keys, vec!["강", "아", "지"]);
    }
}
