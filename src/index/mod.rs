//! Topical index: keyword → song titles, built while lyrics are rendered.
//!
//! One table lives per conversion run. Entries only ever grow (set union), and
//! rendering sorts by accent- and case-insensitive keys, so the output does
//! not depend on the order songs were parsed in.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use serde::Serialize;

use crate::latex;
use crate::utils::label::fold_key;

/// One keyword with the songs it appears in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    /// Index keyword.
    pub keyword: String,
    /// Song titles, sorted by folded key.
    pub titles: Vec<String>,
}

/// Request-scoped keyword table.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TopicalIndex {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl TopicalIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `keyword` occurs in the song titled `title`.
    pub fn insert(&mut self, keyword: impl Into<String>, title: impl Into<String>) {
        self.entries
            .entry(keyword.into())
            .or_default()
            .insert(title.into());
    }

    /// True when no keyword has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct keywords.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in display order.
    pub fn entries(&self) -> Vec<IndexEntry> {
        let mut entries: Vec<IndexEntry> = self
            .entries
            .iter()
            .map(|(keyword, titles)| {
                let mut titles: Vec<String> = titles.iter().cloned().collect();
                titles.sort_by_cached_key(|t| (fold_key(t), t.clone()));
                IndexEntry {
                    keyword: keyword.clone(),
                    titles,
                }
            })
            .collect();
        entries.sort_by_cached_key(|e| (fold_key(&e.keyword), e.keyword.clone()));
        entries
    }

    /// Render the index section, linking each title through `label_for`.
    pub fn render(&self, heading: &str, label_for: impl Fn(&str) -> String) -> String {
        let mut out = format!("\\section*{{{heading}}}\n\\begin{{itemize}}\n");
        for entry in self.entries() {
            let links = entry
                .titles
                .iter()
                .map(|title| latex::song_link(&label_for(title), title))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(out, "\\item \\textbf{{{}}}: {links}", entry.keyword);
        }
        out.push_str("\\end{itemize}\n");
        out
    }
}

impl Serialize for TopicalIndex {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries().serialize(serializer)
    }
}
