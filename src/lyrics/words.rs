//! Word-level lyric rendering: chord placeholders and index markers.
//!
//! Each `_` (standalone or inside a word) takes the next unused chord, left to
//! right. A word led by `#` is highlighted and recorded in the topical index,
//! either under itself or under the alias after `=` (`#word=alias`).

use crate::constants::markup::{INDEX_ALIAS, INDEX_SIGIL, PLACEHOLDER};
use crate::constants::song::UNTITLED;
use crate::index::TopicalIndex;
use crate::latex;
use crate::utils::label::strip_transpose_suffix;

/// Accented letters kept in index keys besides ASCII letters and digits.
const KEPT_ACCENTED: &str = "áéíóúÁÉÍÓÚñÑ";

/// Result of rendering one lyric line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedLyric {
    /// LaTeX text of the line.
    pub text: String,
    /// Chords consumed by placeholders.
    pub chords_used: usize,
    /// Placeholders left literal because the chords ran out.
    pub missing_chords: usize,
    /// Indexed words whose key cleaned down to nothing.
    pub empty_keys: Vec<String>,
}

/// True when the line carries chord-placement or index markers.
pub fn has_markers(line: &str) -> bool {
    line.contains(PLACEHOLDER) || line.contains(INDEX_SIGIL)
}

/// Keep only what may appear in an index key.
fn clean_key(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || KEPT_ACCENTED.contains(*c))
        .collect()
}

/// Hands out chords to placeholders in order.
struct ChordFeed<'a> {
    chords: &'a [String],
    next: usize,
    missing: usize,
}

impl<'a> ChordFeed<'a> {
    const fn new(chords: &'a [String]) -> Self {
        Self { chords, next: 0, missing: 0 }
    }

    fn take(&mut self) -> Option<&'a str> {
        let chord = self.chords.get(self.next);
        match chord {
            Some(_) => self.next += 1,
            None => self.missing += 1,
        }
        chord.map(String::as_str)
    }
}

/// Render one lyric line against the chords scoped to it.
///
/// Indexed words are registered in `index` under the song title with any
/// transposition suffix removed, so transposed copies of a song share one
/// index entry.
pub fn render_lyric(
    line: &str,
    chords: &[String],
    song_title: &str,
    index: &mut TopicalIndex,
) -> RenderedLyric {
    let (base_title, _) = strip_transpose_suffix(song_title);
    let base_title = if base_title.is_empty() { UNTITLED } else { base_title };

    let mut feed = ChordFeed::new(chords);
    let mut empty_keys = Vec::new();
    let mut words = Vec::new();

    for word in line.split_whitespace() {
        let indexed = word.starts_with(INDEX_SIGIL);
        let (base, alias) = if indexed {
            let rest = &word[INDEX_SIGIL.len_utf8()..];
            match rest.split_once(INDEX_ALIAS) {
                Some((base, alias)) => (base, Some(alias)),
                None => (rest, None),
            }
        } else {
            (word, None)
        };

        if base.len() == 1 && base.starts_with(PLACEHOLDER) {
            words.push(feed.take().map_or_else(|| PLACEHOLDER.to_string(), latex::raised_chord));
            continue;
        }

        let (display, plain) = if base.contains(PLACEHOLDER) {
            let mut display = String::new();
            for (i, part) in base.split(PLACEHOLDER).enumerate() {
                if i > 0 {
                    match feed.take() {
                        Some(chord) => display.push_str(&latex::inline_chord(chord)),
                        None => display.push(PLACEHOLDER),
                    }
                }
                display.push_str(part);
            }
            (display, base.replace(PLACEHOLDER, ""))
        } else {
            (base.to_string(), base.to_string())
        };

        if !indexed {
            words.push(display);
            continue;
        }

        let key = clean_key(alias.unwrap_or(&plain));
        if key.is_empty() {
            empty_keys.push(word.to_string());
            words.push(display);
        } else {
            words.push(latex::keyword(&display, &key));
            index.insert(key, base_title);
        }
    }

    RenderedLyric {
        text: words.join(" "),
        chords_used: feed.next,
        missing_chords: feed.missing,
        empty_keys,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn chords(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_standalone_placeholder_consumes_in_order() {
        let mut index = TopicalIndex::new();
        let out = render_lyric("_ Santo _ Santo", &chords(&["Do", "Sol"]), "Santo", &mut index);
        assert_eq!(
            out.text,
            "\\raisebox{1.7ex}{\\[Do]} Santo \\raisebox{1.7ex}{\\[Sol]} Santo"
        );
        assert_eq!(out.chords_used, 2);
        assert_eq!(out.missing_chords, 0);
    }

    #[test]
    fn test_embedded_placeholder() {
        let mut index = TopicalIndex::new();
        let out = render_lyric("A_ma_zing grace", &chords(&["C", "G"]), "X", &mut index);
        assert_eq!(out.text, "A\\[C]ma\\[G]zing grace");
    }

    #[test]
    fn test_exhausted_placeholders_stay_literal() {
        let mut index = TopicalIndex::new();
        let out = render_lyric("_ la_la _", &chords(&["Re"]), "X", &mut index);
        assert_eq!(out.text, "\\raisebox{1.7ex}{\\[Re]} la_la _");
        assert_eq!(out.missing_chords, 2);
    }

    #[test]
    fn test_excess_chords_dropped() {
        let mut index = TopicalIndex::new();
        let out = render_lyric("#Joy _ abounds", &chords(&["C", "G"]), "Amazing Grace", &mut index);
        assert_eq!(out.chords_used, 1);
        assert!(out.text.contains("\\raisebox{1.7ex}{\\[C]}"));
        assert!(!out.text.contains("[G]"));
    }

    #[test]
    fn test_index_marker() {
        let mut index = TopicalIndex::new();
        let out = render_lyric("Cantad con #gozo!", &[], "Alabanza", &mut index);
        assert_eq!(
            out.text,
            "Cantad con \\textcolor{blue!50!black}{\\textbf{gozo!}}\\protect\\index[tema]{gozo}"
        );
        let entries = index.entries();
        assert_eq!(entries[0].keyword, "gozo");
        assert_eq!(entries[0].titles, vec!["Alabanza"]);
    }

    #[test]
    fn test_index_alias_displays_word() {
        let mut index = TopicalIndex::new();
        let out = render_lyric("#foo=bar", &[], "Song", &mut index);
        assert_eq!(
            out.text,
            "\\textcolor{blue!50!black}{\\textbf{foo}}\\protect\\index[tema]{bar}"
        );
        assert_eq!(index.entries()[0].keyword, "bar");
    }

    #[test]
    fn test_indexed_word_with_embedded_chord() {
        let mut index = TopicalIndex::new();
        let out = render_lyric("#Co_razón", &chords(&["Mi"]), "Song", &mut index);
        assert_eq!(
            out.text,
            "\\textcolor{blue!50!black}{\\textbf{Co\\[Mi]razón}}\\protect\\index[tema]{Corazón}"
        );
    }

    #[test]
    fn test_index_title_strips_transposition() {
        let mut index = TopicalIndex::new();
        render_lyric("#paz", &[], "Gloria =+2", &mut index);
        render_lyric("#paz", &[], "Gloria", &mut index);
        assert_eq!(index.entries()[0].titles, vec!["Gloria"]);
    }

    #[test]
    fn test_empty_key_not_indexed() {
        let mut index = TopicalIndex::new();
        let out = render_lyric("#!!", &[], "Song", &mut index);
        assert_eq!(out.text, "!!");
        assert_eq!(out.empty_keys, vec!["#!!"]);
        assert!(index.is_empty());
    }

    #[test]
    fn test_markers_detection() {
        assert!(has_markers("A_men"));
        assert!(has_markers("#paz"));
        assert!(!has_markers("Amen"));
    }
}
