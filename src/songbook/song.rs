//! Songs and their trailing scripture references.

use super::block::Block;
use crate::latex;

/// Scripture passage printed after its song.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scripture {
    /// Citation inside `ref=( … )`.
    pub citation: String,
    /// Optional passage text after the closing parenthesis.
    pub text: String,
}

impl Scripture {
    /// Parse the remainder of a `ref=(` directive.
    ///
    /// Returns the reference and whether the closing parenthesis was found.
    pub fn parse(rest: &str) -> (Self, bool) {
        match rest.split_once(')') {
            Some((citation, text)) => (
                Self {
                    citation: citation.trim().to_string(),
                    text: text.trim().to_string(),
                },
                true,
            ),
            None => (
                Self {
                    citation: rest.trim().to_string(),
                    text: String::new(),
                },
                false,
            ),
        }
    }
}

/// An open song.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    /// Title-cased title.
    pub title: String,
    /// Cross-reference label.
    pub label: String,
    /// Transposition in semitones applied to every chord row.
    pub offset: i32,
    /// Closed, non-empty blocks in order.
    pub blocks: Vec<Block>,
    /// Reference emitted right after the song closes.
    pub scripture: Option<Scripture>,
}

impl Song {
    /// Open a song with no blocks.
    pub fn new(title: impl Into<String>, label: impl Into<String>, offset: i32) -> Self {
        Self {
            title: title.into(),
            label: label.into(),
            offset,
            blocks: Vec::new(),
            scripture: None,
        }
    }

    /// Render the song, its blocks, and any pending scripture reference.
    pub fn render(&self) -> String {
        let mut parts = vec![latex::begin_song(&self.title, &self.label)];
        parts.extend(self.blocks.iter().map(Block::render));
        parts.push(latex::END_SONG.to_string());
        if let Some(scripture) = &self.scripture {
            parts.push(latex::scripture(&scripture.citation, &scripture.text));
        }
        parts.join("\n")
    }
}
