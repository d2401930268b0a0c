//! Title normalization shared by song labels and index sorting.
//!
//! Labels must be stable across runs: the same title always folds to the same
//! key, whatever its accents or capitalization.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::constants::song::UNTITLED_LABEL;

/// Trailing transposition suffix such as `=+2`, `=-3` or `=5`.
#[allow(clippy::expect_used)]
static RE_TRANSPOSE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*=([+-]?\d+)\s*$").expect("valid regex: RE_TRANSPOSE_SUFFIX")
});

/// Strip diacritics and case-fold, for locale-insensitive comparison.
pub fn fold_key(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Derive a cross-reference label: folded, hyphen-separated, ASCII-safe.
///
/// `"Él Es El Señor"` becomes `"el-es-el-senor"`.
pub fn song_label(title: &str) -> String {
    let folded = fold_key(title);
    let label = folded
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if label.is_empty() {
        UNTITLED_LABEL.to_string()
    } else {
        label
    }
}

/// Capitalize the first letter of every word and lowercase the rest.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a trailing transposition suffix off a title.
///
/// Returns the bare title and the raw offset text (sign included), if any.
pub fn strip_transpose_suffix(title: &str) -> (&str, Option<&str>) {
    RE_TRANSPOSE_SUFFIX.captures(title).map_or((title.trim(), None), |caps| {
        let start = caps.get(0).map_or(title.len(), |m| m.start());
        let offset = caps.get(1).map(|m| m.as_str());
        (title[..start].trim(), offset)
    })
}

/// Labels handed out during one conversion run.
///
/// Colliding titles get `-2`, `-3`, … suffixes; lookups by title resolve to
/// the first song registered under it.
#[derive(Debug, Default, Clone)]
pub struct LabelRegistry {
    by_title: HashMap<String, String>,
    taken: HashSet<String>,
}

impl LabelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a unique label for a newly opened song.
    pub fn register(&mut self, title: &str) -> String {
        let base = song_label(title);
        let mut label = base.clone();
        let mut n = 2;
        while self.taken.contains(&label) {
            label = format!("{base}-{n}");
            n += 1;
        }
        self.taken.insert(label.clone());
        self.by_title
            .entry(title.to_string())
            .or_insert_with(|| label.clone());
        label
    }

    /// Label of the first song registered under `title`.
    pub fn label_for(&self, title: &str) -> String {
        self.by_title
            .get(title)
            .cloned()
            .unwrap_or_else(|| song_label(title))
    }
}
