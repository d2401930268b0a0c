//! Non-fatal diagnostics collected while parsing.
//!
//! Warnings describe input that rendered in a degraded way. They never change
//! the rendered output.

use std::fmt;

use serde::Serialize;

use super::block::BlockKind;

/// What went wrong on a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarningKind {
    /// Lyric text with no open block; the line was skipped.
    LyricOutsideBlock,
    /// A block closed without any rows and was dropped.
    EmptyBlock {
        /// Kind of the dropped block.
        block: BlockKind,
    },
    /// Chords on a chord row that no placeholder consumed.
    UnusedChords {
        /// Number of dropped chords.
        count: usize,
    },
    /// Placeholders left literal because the chord row ran out.
    MissingChord {
        /// Number of unfilled placeholders.
        count: usize,
    },
    /// An indexed word that cleans down to an empty key.
    EmptyIndexKey {
        /// The word as written.
        word: String,
    },
    /// A transposition suffix that is not a usable integer.
    InvalidTranspose {
        /// The suffix as written.
        value: String,
    },
    /// A scripture directive without its closing parenthesis.
    UnclosedScripture,
    /// A repeat count too large to use; the default count was rendered.
    InvalidRepeatCount {
        /// The count as written.
        value: String,
    },
}

/// A warning tied to a 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    /// 1-based line number.
    pub line: usize,
    /// What was detected.
    #[serde(flatten)]
    pub kind: WarningKind,
}

impl Warning {
    /// Create a warning for `line`.
    pub const fn new(line: usize, kind: WarningKind) -> Self {
        Self { line, kind }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LyricOutsideBlock => f.write_str("lyric line outside any block was skipped"),
            Self::EmptyBlock { block } => write!(f, "empty {} block dropped", block.name()),
            Self::UnusedChords { count } => write!(f, "{count} chord(s) left without a placeholder"),
            Self::MissingChord { count } => write!(f, "{count} placeholder(s) without a chord"),
            Self::EmptyIndexKey { word } => write!(f, "indexed word {word:?} has an empty key"),
            Self::InvalidTranspose { value } => write!(f, "transposition {value:?} is not a valid offset"),
            Self::UnclosedScripture => f.write_str("scripture reference is missing ')'"),
            Self::InvalidRepeatCount { value } => write!(f, "repeat count {value:?} is not a valid count"),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}
