//! Chord recognition, spelling normalization and transposition.
//!
//! Two surface notations are accepted: American letters (`C`, `F#m7`, `Bb/D`)
//! and Latin solmization (`Do`, `Fa#m`, `Sib/Re`). Transposition always pivots
//! through the twelve-step pitch-class index and re-renders the result in
//! Latin notation with sharp spellings, with one override: pitch class 10
//! renders as `Sib`.
//!
//! Every conversion is total. Tokens that do not parse as chords pass through
//! untouched.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// American chord grammar: root, accidental, quality, extension, bass.
#[allow(clippy::expect_used)]
static RE_AMERICAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-G][#b]?(m|maj|min|dim|aug|sus|add)?\d*(/[A-G][#b]?)?$")
        .expect("valid regex: RE_AMERICAN")
});

/// Latin chords are recognized by prefix only.
#[allow(clippy::expect_used)]
static RE_LATIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(reb|mib|lab|sib|do#|re#|fa#|sol#|la#|do|re|mi|fa|sol|la|si)")
        .expect("valid regex: RE_LATIN")
});

/// American spellings indexed by pitch class.
const AMERICAN_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

/// Latin spellings indexed by pitch class.
const LATIN_NAMES: [&str; 12] = [
    "Do", "Do#", "Re", "Re#", "Mi", "Fa", "Fa#", "Sol", "Sol#", "La", "La#", "Si",
];

/// Latin root names and the pitch class of their natural form.
const LATIN_ROOTS: [(&str, u8); 7] = [
    ("sol", 7),
    ("do", 0),
    ("re", 2),
    ("mi", 4),
    ("fa", 5),
    ("la", 9),
    ("si", 11),
];

/// Flat spellings rewritten by [`normalize`], with their sharp equivalents.
const FLAT_SPELLINGS: [(&str, &str); 6] = [
    ("reb", "Do#"),
    ("mib", "Re#"),
    ("lab", "Sol#"),
    ("sib", "La#"),
    ("bb", "A#"),
    ("gb", "F#"),
];

/// Pitch class of A#/Bb, the one class with an irregular Latin spelling.
const A_SHARP: u8 = 10;

/// Surface notation of a chord root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// Letters A–G.
    American,
    /// Solmization names Do–Si.
    Latin,
}

/// Letter case of a root as written, carried over to rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterCase {
    /// `SOL`, `RE#`.
    Upper,
    /// `sol`, `c`.
    Lower,
    /// `Sol`, `C`.
    Capitalized,
}

impl LetterCase {
    /// Classify the letters of a root name (accidentals ignored).
    pub fn of(name: &str) -> Self {
        let letters: Vec<char> = name.chars().filter(char::is_ascii_alphabetic).collect();
        if letters.iter().all(char::is_ascii_lowercase) {
            Self::Lower
        } else if letters.len() > 1 && letters.iter().all(char::is_ascii_uppercase) {
            Self::Upper
        } else {
            Self::Capitalized
        }
    }

    /// Re-case a canonical (capitalized) spelling.
    pub fn apply(self, name: &str) -> String {
        match self {
            Self::Upper => name.to_uppercase(),
            Self::Lower => name.to_lowercase(),
            Self::Capitalized => name.to_string(),
        }
    }
}

/// A root or bass note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pitch {
    /// Pitch class, 0 = C/Do through 11 = B/Si.
    pub class: u8,
    /// Notation the pitch was written in.
    pub notation: Notation,
    /// Letter case the pitch was written in.
    pub case: LetterCase,
}

impl Pitch {
    /// Parse a root at the start of `text`, returning it with the unparsed tail.
    ///
    /// With `notation` set to [`Notation::American`] only the leading letter is
    /// read, so `Fadd9` keeps `add9` instead of splitting as `Fa` + `dd9`.
    fn parse_prefix(text: &str, notation: Notation) -> Option<(Self, &str)> {
        let latin = match notation {
            Notation::Latin => LATIN_ROOTS.iter().find(|(name, _)| {
                text.get(..name.len()).is_some_and(|head| head.eq_ignore_ascii_case(name))
            }),
            Notation::American => None,
        };
        let (natural, notation, name_len) = latin
            .map(|&(name, class)| (class, Notation::Latin, name.len()))
            .or_else(|| {
                let letter = text.chars().next()?.to_ascii_uppercase();
                american_natural(letter).map(|class| (class, Notation::American, 1))
            })?;

        let case = LetterCase::of(&text[..name_len]);
        let rest = &text[name_len..];
        let (shift, rest) = match rest.chars().next() {
            Some('#') => (1, &rest[1..]),
            Some('b' | 'B') => (-1, &rest[1..]),
            _ => (0, rest),
        };

        let pitch = Self { class: natural, notation, case }.shifted(shift);
        Some((pitch, rest))
    }

    /// Move by `semitones`, wrapping around the octave.
    #[must_use]
    pub fn shifted(self, semitones: i32) -> Self {
        let class = (i32::from(self.class) + semitones).rem_euclid(12);
        Self {
            class: u8::try_from(class).unwrap_or_default(),
            ..self
        }
    }

    /// Render in Latin notation, keeping the written letter case.
    pub fn latin(self) -> String {
        self.case.apply(latin_name(self.class))
    }

    /// Render in American notation with sharp spellings, keeping the letter case.
    pub fn american(self) -> String {
        self.case.apply(AMERICAN_NAMES[usize::from(self.class % 12)])
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.notation {
            Notation::Latin => f.write_str(&self.latin()),
            Notation::American => f.write_str(&self.american()),
        }
    }
}

/// Latin name of a pitch class.
///
/// A# is the only class spelled flat: it always renders as `Sib`, never
/// `La#`. Every other class keeps its sharp spelling.
pub fn latin_name(class: u8) -> &'static str {
    if class == A_SHARP {
        "Sib"
    } else {
        LATIN_NAMES[usize::from(class % 12)]
    }
}

fn american_natural(letter: char) -> Option<u8> {
    match letter {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

/// A parsed chord: root, verbatim quality suffix, optional bass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    /// Root note.
    pub root: Pitch,
    /// Quality and extensions exactly as written (`m7`, `sus4`, `maj7`).
    pub suffix: String,
    /// Bass note of a slash chord.
    pub bass: Option<Pitch>,
}

impl Chord {
    /// Parse a token recognized by [`classify`].
    ///
    /// Returns `None` when the token is not a chord or when its root or bass
    /// cannot be located (e.g. a Latin prefix match with a malformed bass).
    pub fn parse(token: &str) -> Option<Self> {
        if !classify(token) {
            return None;
        }

        let (head, bass) = match token.split_once('/') {
            Some((head, bass)) => (head, Some(bass)),
            None => (token, None),
        };

        // The American grammar is exact, so a full match settles the notation.
        let notation = if RE_AMERICAN.is_match(token) {
            Notation::American
        } else {
            Notation::Latin
        };

        let (root, suffix) = Pitch::parse_prefix(head, notation)?;
        let bass = match bass {
            Some(text) => {
                let (pitch, rest) = Pitch::parse_prefix(text, notation)?;
                if !rest.is_empty() {
                    return None;
                }
                Some(pitch)
            }
            None => None,
        };

        Some(Self {
            root,
            suffix: suffix.to_string(),
            bass,
        })
    }

    /// Shift root and bass by `semitones`; the result renders in Latin notation.
    #[must_use]
    pub fn transposed(&self, semitones: i32) -> Self {
        let to_latin = |pitch: Pitch| Pitch {
            notation: Notation::Latin,
            ..pitch.shifted(semitones)
        };
        Self {
            root: to_latin(self.root),
            suffix: self.suffix.clone(),
            bass: self.bass.map(to_latin),
        }
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.suffix)?;
        if let Some(bass) = self.bass {
            write!(f, "/{bass}")?;
        }
        Ok(())
    }
}

/// Is `token` a chord in either notation?
pub fn classify(token: &str) -> bool {
    if token.is_empty() || token.matches('/').count() > 1 {
        return false;
    }
    RE_AMERICAN.is_match(token) || RE_LATIN.is_match(token)
}

/// Rewrite flat spellings as sharps: `Bb`→`A#`, `Gb`→`F#`, `Reb`→`Do#`,
/// `Mib`→`Re#`, `Lab`→`Sol#`, `Sib`→`La#`.
///
/// Suffixes and letter case are kept. Slash chords are normalized part by
/// part. Anything else is returned unchanged.
pub fn normalize(chord: &str) -> String {
    if let Some((head, tail)) = chord.split_once('/') {
        return format!("{}/{}", normalize(head), normalize(tail));
    }
    if !classify(chord) {
        return chord.to_string();
    }

    for (flat, sharp) in FLAT_SPELLINGS {
        let Some(head) = chord.get(..flat.len()) else {
            continue;
        };
        if head.eq_ignore_ascii_case(flat) {
            let case = LetterCase::of(&head[..head.len() - 1]);
            return format!("{}{}", case.apply(sharp), &chord[flat.len()..]);
        }
    }

    chord.to_string()
}

/// Transpose `chord` by `semitones` and render it in Latin notation.
///
/// Unparseable input passes through unchanged.
pub fn transpose(chord: &str, semitones: i32) -> String {
    Chord::parse(chord).map_or_else(
        || chord.to_string(),
        |parsed| parsed.transposed(semitones).to_string(),
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    /// Latin chords spelled with sharps and away from pitch class 10.
    const LATIN_SHARP_CHORDS: &[&str] = &[
        "Do", "Do#m", "Re7", "Re#", "Mi", "Fa#m", "Sol", "Sol#dim", "La", "Si/Fa#", "do", "RE", "solsus4",
    ];

    #[test]
    fn test_classify_american() {
        for token in ["C", "Am", "F#m7", "Bb", "Gsus4", "Cmaj7", "Dadd9", "C/E", "Ebdim", "g", "am7"] {
            assert!(classify(token), "{token} should be a chord");
        }
        for token in ["H", "Cx", "C/H", "Amazing", "", "C/E/G"] {
            assert!(!classify(token), "{token} should not be a chord");
        }
    }

    #[test]
    fn test_classify_latin_prefix() {
        for token in ["Do", "re", "MI", "Fa#", "Sol7", "Lam", "Sib", "Reb", "sol#m", "Do/Mi"] {
            assert!(classify(token), "{token} should be a chord");
        }
        assert!(!classify("Gloria"));
        assert!(!classify("Do/Mi/Sol"));
    }

    #[test]
    fn test_parse_components() {
        let chord = Chord::parse("F#m7/C#").unwrap();
        assert_eq!(chord.root.class, 6);
        assert_eq!(chord.root.notation, Notation::American);
        assert_eq!(chord.suffix, "m7");
        assert_eq!(chord.bass.map(|b| b.class), Some(1));

        let chord = Chord::parse("Sibm").unwrap();
        assert_eq!(chord.root.class, 10);
        assert_eq!(chord.root.notation, Notation::Latin);
        assert_eq!(chord.suffix, "m");
    }

    #[test]
    fn test_normalize_flats() {
        assert_eq!(normalize("Bb"), "A#");
        assert_eq!(normalize("bbm"), "a#m");
        assert_eq!(normalize("Gb7"), "F#7");
        assert_eq!(normalize("Reb"), "Do#");
        assert_eq!(normalize("Mibm"), "Re#m");
        assert_eq!(normalize("LAB"), "SOL#");
        assert_eq!(normalize("sib"), "la#");
        assert_eq!(normalize("Eb"), "Eb");
        assert_eq!(normalize("Am"), "Am");
    }

    #[test]
    fn test_normalize_slash_parts_independently() {
        assert_eq!(normalize("Bb/Gb"), "A#/F#");
        assert_eq!(normalize("Sib/Re"), "La#/Re");
        assert_eq!(normalize("A/B/Bb"), "A/B/A#");
    }

    #[test]
    fn test_normalize_passthrough() {
        assert_eq!(normalize("hello"), "hello");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_transpose_american_to_latin() {
        assert_eq!(transpose("C", 2), "Re");
        assert_eq!(transpose("Am7", 3), "Dom7");
        assert_eq!(transpose("G/B", 2), "La/Do#");
        assert_eq!(transpose("Bb", 2), "Do");
        assert_eq!(transpose("E", -5), "Si");
    }

    #[test]
    fn test_american_f_with_a_suffix() {
        assert_eq!(transpose("Fadd9", 2), "Soladd9");
        assert_eq!(transpose("Faug", 1), "Fa#aug");
        assert_eq!(transpose("fadd9", 2), "soladd9");
        assert_eq!(transpose("Fadd9/A", 2), "Soladd9/Si");

        let chord = Chord::parse("Faug").unwrap();
        assert_eq!(chord.root.notation, Notation::American);
        assert_eq!(chord.suffix, "aug");

        // Latin roots are still read whole.
        let chord = Chord::parse("Fam").unwrap();
        assert_eq!(chord.root.notation, Notation::Latin);
        assert_eq!(chord.suffix, "m");
    }

    #[test]
    fn test_transpose_latin() {
        assert_eq!(transpose("Do", 4), "Mi");
        assert_eq!(transpose("Lam", -2), "Solm");
        assert_eq!(transpose("Mi", 1), "Fa");
        assert_eq!(transpose("Si", 1), "Do");
    }

    #[test]
    fn test_transpose_preserves_case() {
        assert_eq!(transpose("c", 2), "re");
        assert_eq!(transpose("SOL", 2), "LA");
        assert_eq!(transpose("sol", 0), "sol");
        assert_eq!(transpose("D", 0), "Re");
    }

    #[test]
    fn test_a_sharp_renders_as_sib() {
        assert_eq!(latin_name(10), "Sib");
        assert_eq!(transpose("Sol#", 2), "Sib");
        assert_eq!(transpose("Do", -2), "Sib");
        assert_eq!(transpose("A#", 0), "Sib");
        assert_eq!(transpose("G", 3), "Sib");
        assert_eq!(transpose("sol", 3), "sib");
        assert_eq!(transpose("SOL", 3), "SIB");
        assert_eq!(transpose("Re/Sol", 3), "Fa/Sib");
    }

    #[test]
    fn test_sib_override_is_singular() {
        // Other black keys keep their sharp spellings.
        assert_eq!(transpose("Do", 1), "Do#");
        assert_eq!(transpose("Do", 3), "Re#");
        assert_eq!(transpose("Do", 6), "Fa#");
        assert_eq!(transpose("Do", 8), "Sol#");
        assert_eq!(latin_name(1), "Do#");
    }

    #[test]
    fn test_transpose_passthrough() {
        assert_eq!(transpose("Gloria", 3), "Gloria");
        assert_eq!(transpose("A/B/C", 2), "A/B/C");
        assert_eq!(transpose("Re/xyz", 2), "Re/xyz");
    }

    #[test]
    fn test_round_trip_equals_normalized() {
        for chord in LATIN_SHARP_CHORDS {
            for n in -11..=11 {
                assert_eq!(
                    transpose(&transpose(chord, n), -n),
                    normalize(chord),
                    "round trip of {chord} by {n}"
                );
            }
        }
    }

    #[test]
    fn test_round_trip_equals_canonical_rendering() {
        for chord in ["C", "Bb7", "F#m/C#", "La#", "sib", "Ebmaj7", "Gsus4", "Fadd9", "Faug", "fadd9"] {
            for n in -11..=11 {
                assert_eq!(transpose(&transpose(chord, n), -n), transpose(chord, 0));
            }
        }
    }

    #[test]
    fn test_octave_periodicity() {
        for chord in LATIN_SHARP_CHORDS {
            assert_eq!(transpose(chord, 12), normalize(chord));
            assert_eq!(transpose(chord, -12), normalize(chord));
        }
        assert_eq!(transpose("Bb", 12), transpose("Bb", 0));
    }
}
