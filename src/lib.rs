//! `Songpress` - SongPro songbook markup to LaTeX.
//!
//! This crate converts a plain-text songbook (songs, sections, chord rows over
//! lyric lines, repeat markers, scripture references and indexed keywords) into
//! a LaTeX fragment for the `songs` package, with chord transposition and a
//! topical index.

// Re-export public modules for use in integration tests and as a library
pub mod chord;
pub mod config;
pub mod constants;
pub mod error;
pub mod index;
pub mod latex;
pub mod lyrics;
pub mod services;
pub mod songbook;
pub mod template;
pub mod utils;

pub use songbook::{convert, Conversion, Options};
