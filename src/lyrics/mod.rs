//! Lyric line processing.
//!
//! - `classifier`: whole-line chord detection
//! - `repeat`: repeat-bracket markers at the edges of a line
//! - `words`: inline chord placement and topical-index markers

pub mod classifier;
pub mod repeat;
pub mod words;

pub use classifier::{chord_tokens, is_chord_line};
pub use repeat::{split_repeats, RepeatMarks};
pub use words::{has_markers, render_lyric, RenderedLyric};
