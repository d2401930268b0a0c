//! Songbook conversion: SongPro markup in, LaTeX fragment out.
//!
//! Every call to [`convert`] owns a fresh [`ConversionContext`], so the
//! topical index and song labels of one document never leak into another.

pub mod block;
pub mod parser;
pub mod song;
pub mod warning;

use serde::Serialize;
use tracing::info;

use crate::constants::index::DEFAULT_HEADING;
use crate::index::TopicalIndex;

pub use block::{Block, BlockKind};
pub use parser::{ConversionContext, Parser};
pub use song::{Scripture, Song};
pub use warning::{Warning, WarningKind};

/// Rendering options supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Heading of the topical index section.
    pub index_heading: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            index_heading: DEFAULT_HEADING.to_string(),
        }
    }
}

/// Output of one conversion run.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    /// LaTeX fragment for substitution into a template.
    pub fragment: String,
    /// Number of songs opened, untitled ones included.
    pub songs: usize,
    /// Keyword table built from indexed words.
    pub index: TopicalIndex,
    /// Non-fatal diagnostics in source order.
    pub warnings: Vec<Warning>,
}

/// Convert SongPro markup to a LaTeX fragment.
///
/// Never fails: unrecognized input degrades to passthrough or is skipped,
/// and every degradation is reported in [`Conversion::warnings`].
pub fn convert(source: &str, options: &Options) -> Conversion {
    let conversion = Parser::new(source).run(options);
    info!(
        songs = conversion.songs,
        keywords = conversion.index.len(),
        warnings = conversion.warnings.len(),
        "Converted songbook"
    );
    conversion
}
