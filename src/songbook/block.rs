//! Blocks: the verse, chorus, melody and freeform units of a song.

use serde::Serialize;

use crate::latex;

/// The structural kind of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Numbered verse (`V`).
    Verse,
    /// Chorus (`C`).
    Chorus,
    /// Melody line, an unnumbered verse (`M`).
    Melody,
    /// Free text rendered line by line (`N`).
    Freeform,
}

impl BlockKind {
    /// Parse a single-letter block directive.
    pub fn from_directive(token: &str) -> Option<Self> {
        match token {
            "V" => Some(Self::Verse),
            "C" => Some(Self::Chorus),
            "M" => Some(Self::Melody),
            "N" => Some(Self::Freeform),
            _ => None,
        }
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Verse => "verse",
            Self::Chorus => "chorus",
            Self::Melody => "melody",
            Self::Freeform => "freeform",
        }
    }

    /// Grid variant letter; freeform blocks have no grid.
    pub const fn variant(self) -> Option<char> {
        match self {
            Self::Verse => Some('A'),
            Self::Chorus => Some('B'),
            Self::Melody => Some('C'),
            Self::Freeform => None,
        }
    }

    /// Environment delimiters around the grid.
    const fn environment(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Verse => Some(("\\beginverse", "\\endverse")),
            Self::Chorus => Some(("\\beginchorus", "\\endchorus")),
            Self::Melody => Some(("\\beginverse*", "\\endverse")),
            Self::Freeform => None,
        }
    }
}

/// An open or finished block and its rendered rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Block kind.
    pub kind: BlockKind,
    /// 1-based line the block opened on.
    pub line: usize,
    rows: Vec<String>,
}

impl Block {
    /// Open an empty block.
    pub const fn new(kind: BlockKind, line: usize) -> Self {
        Self { kind, line, rows: Vec::new() }
    }

    /// Append a rendered row.
    pub fn push(&mut self, row: impl Into<String>) {
        self.rows.push(row.into());
    }

    /// True when nothing was appended.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the block as one structural unit.
    pub fn render(&self) -> String {
        match (self.kind.variant(), self.kind.environment()) {
            (Some(variant), Some((begin, end))) => {
                format!("{begin}\n{}\n{end}", latex::grid(variant, &self.rows))
            }
            _ => self
                .rows
                .iter()
                .map(|row| format!("{row}{}", latex::PARAGRAPH_END))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}
