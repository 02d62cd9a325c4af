/*!
Hangul jamo identifiers and syllable decomposition - `libhangul/src/jamo.rs`

Purpose
-------
- Name the 19 initial consonants, 21 medial vowels and 27 final consonants
  of the modern Hangul syllable block (0xAC00..=0xD7A3) as closed enums.
- Split a precomposed syllable into its jamo by arithmetic, and compose it
  back.
- Map compatibility jamo letters (the ones people type: ㄱ, ㅘ, ㄳ ...) to
  those ids.

The enum discriminants are the Unicode composition indices, so
`Initial::ALL[i]`, `Medial::ALL[i]` and `Final::ALL[i - 1]` round-trip with
the decomposition formula.
*/

use std::fmt;

use serde::{Deserialize, Serialize};

/// First precomposed syllable (가).
pub const SYLLABLE_BASE: u32 = 0xAC00;
/// Last precomposed syllable (힣).
pub const SYLLABLE_LAST: u32 = 0xD7A3;
pub const MEDIAL_COUNT: u32 = 21;
/// Final slots including the empty final at index 0.
pub const FINAL_COUNT: u32 = 28;

/// The fourteen basic consonant letters. Every consonant jamo is drawn from
/// one of these, on its own, doubled or as a two-letter cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Consonant {
    Giyeok,
    Nieun,
    Digeut,
    Rieul,
    Mieum,
    Bieup,
    Siot,
    Ieung,
    Jieut,
    Chieut,
    Kieuk,
    Tieut,
    Pieup,
    Hieut,
}

impl Consonant {
    pub const ALL: [Consonant; 14] = [
        Consonant::Giyeok,
        Consonant::Nieun,
        Consonant::Digeut,
        Consonant::Rieul,
        Consonant::Mieum,
        Consonant::Bieup,
        Consonant::Siot,
        Consonant::Ieung,
        Consonant::Jieut,
        Consonant::Chieut,
        Consonant::Kieuk,
        Consonant::Tieut,
        Consonant::Pieup,
        Consonant::Hieut,
    ];

    /// Compatibility jamo letter.
    pub fn as_char(self) -> char {
        match self {
            Consonant::Giyeok => 'ㄱ',
            Consonant::Nieun => 'ㄴ',
            Consonant::Digeut => 'ㄷ',
            Consonant::Rieul => 'ㄹ',
            Consonant::Mieum => 'ㅁ',
            Consonant::Bieup => 'ㅂ',
            Consonant::Siot => 'ㅅ',
            Consonant::Ieung => 'ㅇ',
            Consonant::Jieut => 'ㅈ',
            Consonant::Chieut => 'ㅊ',
            Consonant::Kieuk => 'ㅋ',
            Consonant::Tieut => 'ㅌ',
            Consonant::Pieup => 'ㅍ',
            Consonant::Hieut => 'ㅎ',
        }
    }
}

/// Initial consonant (choseong), in composition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Initial {
    G,
    GG,
    N,
    D,
    DD,
    R,
    M,
    B,
    BB,
    S,
    SS,
    Ng,
    J,
    JJ,
    Ch,
    K,
    T,
    P,
    H,
}

impl Initial {
    pub const ALL: [Initial; 19] = [
        Initial::G,
        Initial::GG,
        Initial::N,
        Initial::D,
        Initial::DD,
        Initial::R,
        Initial::M,
        Initial::B,
        Initial::BB,
        Initial::S,
        Initial::SS,
        Initial::Ng,
        Initial::J,
        Initial::JJ,
        Initial::Ch,
        Initial::K,
        Initial::T,
        Initial::P,
        Initial::H,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    /// Basic letter this initial is built from and whether it is doubled.
    pub fn shape(self) -> (Consonant, bool) {
        use Consonant::*;
        match self {
            Initial::G => (Giyeok, false),
            Initial::GG => (Giyeok, true),
            Initial::N => (Nieun, false),
            Initial::D => (Digeut, false),
            Initial::DD => (Digeut, true),
            Initial::R => (Rieul, false),
            Initial::M => (Mieum, false),
            Initial::B => (Bieup, false),
            Initial::BB => (Bieup, true),
            Initial::S => (Siot, false),
            Initial::SS => (Siot, true),
            Initial::Ng => (Ieung, false),
            Initial::J => (Jieut, false),
            Initial::JJ => (Jieut, true),
            Initial::Ch => (Chieut, false),
            Initial::K => (Kieuk, false),
            Initial::T => (Tieut, false),
            Initial::P => (Pieup, false),
            Initial::H => (Hieut, false),
        }
    }

    pub fn as_char(self) -> char {
        const LETTERS: [char; 19] = [
            'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ', 'ㅌ',
            'ㅍ', 'ㅎ',
        ];
        LETTERS[self.index()]
    }
}

/// Medial vowel (jungseong), in composition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Medial {
    A,
    Ae,
    Ya,
    Yae,
    Eo,
    E,
    Yeo,
    Ye,
    O,
    Wa,
    Wae,
    Oe,
    Yo,
    U,
    Wo,
    We,
    Wi,
    Yu,
    Eu,
    Ui,
    I,
}

impl Medial {
    pub const ALL: [Medial; 21] = [
        Medial::A,
        Medial::Ae,
        Medial::Ya,
        Medial::Yae,
        Medial::Eo,
        Medial::E,
        Medial::Yeo,
        Medial::Ye,
        Medial::O,
        Medial::Wa,
        Medial::Wae,
        Medial::Oe,
        Medial::Yo,
        Medial::U,
        Medial::Wo,
        Medial::We,
        Medial::Wi,
        Medial::Yu,
        Medial::Eu,
        Medial::Ui,
        Medial::I,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    pub fn as_char(self) -> char {
        const LETTERS: [char; 21] = [
            'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ', 'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ', 'ㅞ', 'ㅟ',
            'ㅠ', 'ㅡ', 'ㅢ', 'ㅣ',
        ];
        LETTERS[self.index()]
    }
}

/// Final consonant (jongseong). The empty final is `None` at the call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Final {
    G = 1,
    GG,
    GS,
    N,
    NJ,
    NH,
    D,
    L,
    LG,
    LM,
    LB,
    LS,
    LT,
    LP,
    LH,
    M,
    B,
    BS,
    S,
    SS,
    Ng,
    J,
    Ch,
    K,
    T,
    P,
    H,
}

/// How a final consonant is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalShape {
    Single(Consonant),
    Doubled(Consonant),
    Cluster([Consonant; 2]),
}

impl Final {
    pub const ALL: [Final; 27] = [
        Final::G,
        Final::GG,
        Final::GS,
        Final::N,
        Final::NJ,
        Final::NH,
        Final::D,
        Final::L,
        Final::LG,
        Final::LM,
        Final::LB,
        Final::LS,
        Final::LT,
        Final::LP,
        Final::LH,
        Final::M,
        Final::B,
        Final::BS,
        Final::S,
        Final::SS,
        Final::Ng,
        Final::J,
        Final::Ch,
        Final::K,
        Final::T,
        Final::P,
        Final::H,
    ];

    /// Composition index, 1..=27 (0 is the empty final).
    pub fn index(self) -> usize {
        self as usize
    }

    /// `None` for index 0 and for out-of-range indices.
    pub fn from_index(i: usize) -> Option<Self> {
        i.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn shape(self) -> FinalShape {
        use Consonant::*;
        use FinalShape::*;
        match self {
            Final::G => Single(Giyeok),
            Final::GG => Doubled(Giyeok),
            Final::GS => Cluster([Giyeok, Siot]),
            Final::N => Single(Nieun),
            Final::NJ => Cluster([Nieun, Jieut]),
            Final::NH => Cluster([Nieun, Hieut]),
            Final::D => Single(Digeut),
            Final::L => Single(Rieul),
            Final::LG => Cluster([Rieul, Giyeok]),
            Final::LM => Cluster([Rieul, Mieum]),
            Final::LB => Cluster([Rieul, Bieup]),
            Final::LS => Cluster([Rieul, Siot]),
            Final::LT => Cluster([Rieul, Tieut]),
            Final::LP => Cluster([Rieul, Pieup]),
            Final::LH => Cluster([Rieul, Hieut]),
            Final::M => Single(Mieum),
            Final::B => Single(Bieup),
            Final::BS => Cluster([Bieup, Siot]),
            Final::S => Single(Siot),
            Final::SS => Doubled(Siot),
            Final::Ng => Single(Ieung),
            Final::J => Single(Jieut),
            Final::Ch => Single(Chieut),
            Final::K => Single(Kieuk),
            Final::T => Single(Tieut),
            Final::P => Single(Pieup),
            Final::H => Single(Hieut),
        }
    }

    pub fn as_char(self) -> char {
        const LETTERS: [char; 27] = [
            'ㄱ', 'ㄲ', 'ㄳ', 'ㄴ', 'ㄵ', 'ㄶ', 'ㄷ', 'ㄹ', 'ㄺ', 'ㄻ', 'ㄼ', 'ㄽ', 'ㄾ', 'ㄿ', 'ㅀ', 'ㅁ', 'ㅂ',
            'ㅄ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
        ];
        LETTERS[self.index() - 1]
    }
}

/// Jamo of one syllable. All fields are `None` for non-Hangul input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Decomposition {
    pub initial: Option<Initial>,
    pub medial: Option<Medial>,
    pub final_: Option<Final>,
}

impl Decomposition {
    /// Whether the input was not a precomposed syllable.
    pub fn is_empty(&self) -> bool {
        self.initial.is_none() && self.medial.is_none() && self.final_.is_none()
    }

    /// Composition indices `(initial, medial, final)`; final 0 means none.
    pub fn indices(&self) -> Option<(usize, usize, usize)> {
        Some((
            self.initial?.index(),
            self.medial?.index(),
            self.final_.map_or(0, Final::index),
        ))
    }
}

impl fmt::Display for Decomposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        let letter = |c: Option<char>| c.map_or(String::new(), String::from);
        write!(
            f,
            "{}{}{}",
            letter(self.initial.map(Initial::as_char)),
            letter(self.medial.map(Medial::as_char)),
            letter(self.final_.map(Final::as_char)),
        )
    }
}

/// Split a precomposed Hangul syllable into its jamo.
///
/// Characters outside `U+AC00..=U+D7A3` yield an empty decomposition.
pub fn decompose(ch: char) -> Decomposition {
    let code = ch as u32;
    if !(SYLLABLE_BASE..=SYLLABLE_LAST).contains(&code) {
        return Decomposition::default();
    }
    let i = code - SYLLABLE_BASE;
    let initial = (i / (MEDIAL_COUNT * FINAL_COUNT)) as usize;
    let medial = ((i % (MEDIAL_COUNT * FINAL_COUNT)) / FINAL_COUNT) as usize;
    let final_ = (i % FINAL_COUNT) as usize;
    Decomposition {
        initial: Initial::from_index(initial),
        medial: Medial::from_index(medial),
        final_: Final::from_index(final_),
    }
}

/// Build the precomposed syllable for the given jamo.
pub fn compose(initial: Initial, medial: Medial, final_: Option<Final>) -> char {
    let code = SYLLABLE_BASE
        + (initial.index() as u32 * MEDIAL_COUNT + medial.index() as u32) * FINAL_COUNT
        + final_.map_or(0, |f| f.index() as u32);
    // Every index combination lands inside the syllable block.
    char::from_u32(code).unwrap_or('\u{FFFD}')
}

/// A compatibility jamo letter resolved to the slots it can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JamoLetter {
    /// A consonant; `initial` is `None` for clusters that only occur as finals
    /// and `final_` is `None` for ㄸ ㅃ ㅉ which never close a syllable.
    Consonant {
        initial: Option<Initial>,
        final_: Option<Final>,
    },
    Vowel(Medial),
}

static CONSONANT_LETTERS: phf::Map<char, (Option<Initial>, Option<Final>)> = phf::phf_map! {
    'ㄱ' => (Some(Initial::G), Some(Final::G)),
    'ㄲ' => (Some(Initial::GG), Some(Final::GG)),
    'ㄳ' => (None, Some(Final::GS)),
    'ㄴ' => (Some(Initial::N), Some(Final::N)),
    'ㄵ' => (None, Some(Final::NJ)),
    'ㄶ' => (None, Some(Final::NH)),
    'ㄷ' => (Some(Initial::D), Some(Final::D)),
    'ㄸ' => (Some(Initial::DD), None),
    'ㄹ' => (Some(Initial::R), Some(Final::L)),
    'ㄺ' => (None, Some(Final::LG)),
    'ㄻ' => (None, Some(Final::LM)),
    'ㄼ' => (None, Some(Final::LB)),
    'ㄽ' => (None, Some(Final::LS)),
    'ㄾ' => (None, Some(Final::LT)),
    'ㄿ' => (None, Some(Final::LP)),
    'ㅀ' => (None, Some(Final::LH)),
    'ㅁ' => (Some(Initial::M), Some(Final::M)),
    'ㅂ' => (Some(Initial::B), Some(Final::B)),
    'ㅃ' => (Some(Initial::BB), None),
    'ㅄ' => (None, Some(Final::BS)),
    'ㅅ' => (Some(Initial::S), Some(Final::S)),
    'ㅆ' => (Some(Initial::SS), Some(Final::SS)),
    'ㅇ' => (Some(Initial::Ng), Some(Final::Ng)),
    'ㅈ' => (Some(Initial::J), Some(Final::J)),
    'ㅉ' => (Some(Initial::JJ), None),
    'ㅊ' => (Some(Initial::Ch), Some(Final::Ch)),
    'ㅋ' => (Some(Initial::K), Some(Final::K)),
    'ㅌ' => (Some(Initial::T), Some(Final::T)),
    'ㅍ' => (Some(Initial::P), Some(Final::P)),
    'ㅎ' => (Some(Initial::H), Some(Final::H)),
};

static VOWEL_LETTERS: phf::Map<char, Medial> = phf::phf_map! {
    'ㅏ' => Medial::A,
    'ㅐ' => Medial::Ae,
    'ㅑ' => Medial::Ya,
    'ㅒ' => Medial::Yae,
    'ㅓ' => Medial::Eo,
    'ㅔ' => Medial::E,
    'ㅕ' => Medial::Yeo,
    'ㅖ' => Medial::Ye,
    'ㅗ' => Medial::O,
    'ㅘ' => Medial::Wa,
    'ㅙ' => Medial::Wae,
    'ㅚ' => Medial::Oe,
    'ㅛ' => Medial::Yo,
    'ㅜ' => Medial::U,
    'ㅝ' => Medial::Wo,
    'ㅞ' => Medial::We,
    'ㅟ' => Medial::Wi,
    'ㅠ' => Medial::Yu,
    'ㅡ' => Medial::Eu,
    'ㅢ' => Medial::Ui,
    'ㅣ' => Medial::I,
};

/// Look up a compatibility jamo letter (U+3131..U+3163).
pub fn letter(ch: char) -> Option<JamoLetter> {
    if let Some(&(initial, final_)) = CONSONANT_LETTERS.get(&ch) {
        return Some(JamoLetter::Consonant { initial, final_ });
    }
    VOWEL_LETTERS.get(&ch).map(|&m| JamoLetter::Vowel(m))
}
