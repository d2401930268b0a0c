//! LaTeX constructs emitted for the `songs` macro package.
//!
//! Every string produced here is consumed verbatim by the downstream macro
//! package, so spacing and brace placement are part of the contract.

use crate::constants::index::{KEYWORD_COLOR, LATEX_INDEX_NAME};

/// Row separator inside a block grid.
pub const ROW_SEPARATOR: &str = "\\\\\n";

/// Closes a song.
pub const END_SONG: &str = "\\endsong";

/// Opens the song list of a chapter.
pub const BEGIN_SONGS: &str = "\\begin{songs}{}";

/// Closes the song list of a chapter.
pub const END_SONGS: &str = "\\end{songs}";

/// Opens a repeat bracket.
pub const REPEAT_OPEN: &str = "\\lrep ";

/// Ends a freeform line.
pub const PARAGRAPH_END: &str = "\\par";

/// Song header with its cross-reference label.
pub fn begin_song(title: &str, label: &str) -> String {
    format!("\\beginsong{{{title}}}\\label{{{label}}}")
}

/// Chapter heading for a section.
pub fn chapter(title: &str) -> String {
    format!("\\songchapter{{{title}}}")
}

/// Chord placed over the following syllable.
pub fn inline_chord(chord: &str) -> String {
    format!("\\[{chord}]")
}

/// Chord raised above the baseline with no syllable under it.
pub fn raised_chord(chord: &str) -> String {
    format!("\\raisebox{{1.7ex}}{{{}}}", inline_chord(chord))
}

/// A row of raised chords, used for instrumental callouts.
pub fn raised_chords(chords: &[String]) -> String {
    chords.iter().map(|c| raised_chord(c)).collect::<Vec<_>>().join(" ")
}

/// A chord-only row placed above a verbatim lyric row.
pub fn chord_row(chords: &[String]) -> String {
    chords.iter().map(|c| inline_chord(c)).collect::<Vec<_>>().join("\\quad ")
}

/// Closing repeat bracket with its count.
pub fn repeat_close(count: u32) -> String {
    format!(" \\rrep \\rep{{{count}}}")
}

/// Highlighted keyword, written to the topical LaTeX index under `key`.
pub fn keyword(display: &str, key: &str) -> String {
    format!(
        "\\textcolor{{{KEYWORD_COLOR}}}{{\\textbf{{{display}}}}}\\protect\\index[{LATEX_INDEX_NAME}]{{{key}}}"
    )
}

/// Grid holding the rows of one block, tagged with its variant letter.
pub fn grid(variant: char, rows: &[String]) -> String {
    format!("\\songgrid{{{variant}}}{{{}}}", rows.join(ROW_SEPARATOR))
}

/// Scripture passage printed after a song.
pub fn scripture(citation: &str, text: &str) -> String {
    if text.is_empty() {
        format!("\\beginscripture{{[{citation}]}}\n\\endscripture")
    } else {
        format!("\\beginscripture{{[{citation}]}}\n{text}\n\\endscripture")
    }
}

/// Cross-reference link to a song label.
pub fn song_link(label: &str, title: &str) -> String {
    format!("\\hyperref[{label}]{{{title}}}")
}
