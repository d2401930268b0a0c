//! Line-by-line songbook parser.
//!
//! The parser walks an indexable list of lines with a cursor. Lookahead is
//! limited to the following line, which decides both the `C` directive
//! (chorus only when a chord line follows) and chord/lyric pairing.
//!
//! Rules are tried in order on each line; the first match wins:
//!
//! 1. `ref=(<citation>) [text]`: scripture reference for the open song
//! 2. blank line: nothing
//! 3. `S <title>`: new section (chapter)
//! 4. `O [<title>] [=<±N>]`: new song, optionally transposed
//! 5. bare all-uppercase line: new song titled by it
//! 6. any other content opens an untitled song if none is open
//! 7. `V` / `M` / `N`: new verse / melody / freeform block
//! 8. `C` followed by a chord line: new chorus block
//! 9. chord line followed by any line: chord/lyric pair
//! 10. lyric line inside a block
//! 11. anything else is skipped

use tracing::debug;

use super::block::{Block, BlockKind};
use super::song::{Scripture, Song};
use super::warning::{Warning, WarningKind};
use super::{Conversion, Options};
use crate::chord;
use crate::constants::markup::{PLACEHOLDER, RESERVED_TOKENS, SCRIPTURE_PREFIX};
use crate::constants::song::UNTITLED;
use crate::index::TopicalIndex;
use crate::latex;
use crate::lyrics::{chord_tokens, has_markers, is_chord_line, render_lyric, split_repeats, RepeatMarks};
use crate::utils::label::{strip_transpose_suffix, title_case, LabelRegistry};

/// State that lives exactly as long as one conversion run.
#[derive(Debug, Default)]
pub struct ConversionContext {
    /// Keyword table filled by indexed words.
    pub index: TopicalIndex,
    /// Song labels handed out so far.
    pub labels: LabelRegistry,
    /// Diagnostics in source order.
    pub warnings: Vec<Warning>,
}

impl ConversionContext {
    /// Fresh context for a new run.
    pub fn new() -> Self {
        Self::default()
    }

    fn warn(&mut self, line: usize, kind: WarningKind) {
        let warning = Warning::new(line, kind);
        debug!("{warning}");
        self.warnings.push(warning);
    }
}

/// The songbook state machine.
pub struct Parser<'a> {
    lines: Vec<&'a str>,
    cursor: usize,
    section_open: bool,
    song: Option<Song>,
    block: Option<Block>,
    songs: usize,
    out: Vec<String>,
    ctx: ConversionContext,
}

impl<'a> Parser<'a> {
    /// Prepare a parser over `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines().collect(),
            cursor: 0,
            section_open: false,
            song: None,
            block: None,
            songs: 0,
            out: Vec::new(),
            ctx: ConversionContext::new(),
        }
    }

    /// Consume every line and render the document.
    pub fn run(mut self, options: &Options) -> Conversion {
        while self.cursor < self.lines.len() {
            self.step();
        }
        self.finish(options)
    }

    /// 1-based number of the current line.
    const fn line_no(&self) -> usize {
        self.cursor + 1
    }

    fn next_line(&self) -> Option<&'a str> {
        self.lines.get(self.cursor + 1).copied()
    }

    /// Apply the first matching rule to the current line and advance.
    fn step(&mut self) {
        let line: &'a str = self.lines[self.cursor];
        let line = line.trim();

        if let Some(rest) = line.strip_prefix(SCRIPTURE_PREFIX) {
            self.record_scripture(rest);
        } else if line.is_empty() {
            // blank lines carry no structure
        } else if let Some(title) = directive_argument(line, "S") {
            self.open_section(title);
        } else if let Some(title) = directive_argument(line, "O") {
            self.open_song(title);
        } else if is_implicit_title(line) {
            self.open_song(line);
        } else {
            self.ensure_song();
            match line {
                "V" | "M" | "N" => {
                    if let Some(kind) = BlockKind::from_directive(line) {
                        self.open_block(kind);
                    }
                }
                "C" if self.next_line().is_some_and(is_chord_line) => {
                    self.open_block(BlockKind::Chorus);
                }
                _ => {
                    if let Some(lyric) = self.next_line().filter(|_| is_chord_line(line)) {
                        self.pair(line, lyric.trim());
                        self.cursor += 2;
                        return;
                    }
                    self.plain_lyric(line);
                }
            }
        }

        self.cursor += 1;
    }

    fn record_scripture(&mut self, rest: &str) {
        let line = self.line_no();
        let (scripture, closed) = Scripture::parse(rest);
        if !closed {
            self.ctx.warn(line, WarningKind::UnclosedScripture);
        }
        self.ensure_song();
        if let Some(song) = self.song.as_mut() {
            song.scripture = Some(scripture);
        }
    }

    fn open_section(&mut self, title: &str) {
        self.close_song();
        self.close_section();
        self.out.push(latex::chapter(&title_case(title)));
        self.out.push(latex::BEGIN_SONGS.to_string());
        self.section_open = true;
    }

    fn close_section(&mut self) {
        if self.section_open {
            self.out.push(latex::END_SONGS.to_string());
            self.section_open = false;
        }
    }

    fn open_song(&mut self, heading: &str) {
        self.close_song();

        let line = self.line_no();
        let (title, suffix) = strip_transpose_suffix(heading);
        let offset = match suffix.map(|value| (value, value.parse::<i32>())) {
            None => 0,
            Some((_, Ok(offset))) => offset,
            Some((value, Err(_))) => {
                self.ctx.warn(line, WarningKind::InvalidTranspose { value: value.to_string() });
                0
            }
        };

        let title = title_case(title);
        let title = if title.is_empty() { UNTITLED.to_string() } else { title };
        let label = self.ctx.labels.register(&title);
        debug!(line, %title, %label, offset, "Opened song");

        self.song = Some(Song::new(title, label, offset));
        self.songs += 1;
    }

    fn ensure_song(&mut self) {
        if self.song.is_none() {
            self.open_song("");
        }
    }

    fn close_song(&mut self) {
        self.close_block();
        if let Some(song) = self.song.take() {
            self.out.push(song.render());
        }
    }

    fn open_block(&mut self, kind: BlockKind) {
        self.close_block();
        self.block = Some(Block::new(kind, self.line_no()));
    }

    fn close_block(&mut self) {
        let Some(block) = self.block.take() else {
            return;
        };
        if block.is_empty() {
            self.ctx.warn(block.line, WarningKind::EmptyBlock { block: block.kind });
        } else if let Some(song) = self.song.as_mut() {
            song.blocks.push(block);
        }
    }

    fn push_row(&mut self, row: String) {
        if let Some(block) = self.block.as_mut() {
            block.push(row);
        }
    }

    /// Title and offset of the open song.
    fn song_context(&self) -> (String, i32) {
        self.song
            .as_ref()
            .map_or_else(|| (UNTITLED.to_string(), 0), |s| (s.title.clone(), s.offset))
    }

    /// Chord row on the current line, lyric on the next.
    fn pair(&mut self, chord_line: &str, lyric: &str) {
        let (title, offset) = self.song_context();
        let chords: Vec<String> = chord_tokens(chord_line)
            .into_iter()
            .map(|c| if offset == 0 { c.to_string() } else { chord::transpose(c, offset) })
            .collect();

        if self.block.is_none() {
            self.block = Some(Block::new(BlockKind::Verse, self.line_no()));
        }

        if lyric.len() == 1 && lyric.starts_with(PLACEHOLDER) {
            self.push_row(latex::raised_chords(&chords));
            self.close_block();
            return;
        }

        let marks = split_repeats(lyric);
        self.check_repeat_count(&marks);
        if has_markers(marks.body) {
            let row = self.render_words(marks.body, &chords, &title);
            self.push_row(marks.wrap(&row));
        } else {
            self.push_row(latex::chord_row(&chords));
            self.push_row(marks.wrap(marks.body));
        }
    }

    /// Lyric line without a chord row of its own.
    fn plain_lyric(&mut self, line: &str) {
        if self.block.is_none() {
            self.ctx.warn(self.line_no(), WarningKind::LyricOutsideBlock);
            return;
        }

        let marks = split_repeats(line);
        self.check_repeat_count(&marks);
        let row = if has_markers(marks.body) {
            let (title, _) = self.song_context();
            self.render_words(marks.body, &[], &title)
        } else {
            marks.body.to_string()
        };
        self.push_row(marks.wrap(&row));
    }

    fn check_repeat_count(&mut self, marks: &RepeatMarks<'_>) {
        if let Some(value) = marks.invalid_count {
            let line = self.line_no();
            self.ctx.warn(line, WarningKind::InvalidRepeatCount { value: value.to_string() });
        }
    }

    /// Run the word processor and report what it could not place.
    fn render_words(&mut self, body: &str, chords: &[String], title: &str) -> String {
        let line = self.line_no();
        let rendered = render_lyric(body, chords, title, &mut self.ctx.index);

        let unused = chords.len().saturating_sub(rendered.chords_used);
        if unused > 0 {
            self.ctx.warn(line, WarningKind::UnusedChords { count: unused });
        }
        if rendered.missing_chords > 0 && !chords.is_empty() {
            self.ctx.warn(line, WarningKind::MissingChord { count: rendered.missing_chords });
        }
        for word in rendered.empty_keys {
            self.ctx.warn(line, WarningKind::EmptyIndexKey { word });
        }

        rendered.text
    }

    fn finish(mut self, options: &Options) -> Conversion {
        self.close_song();
        self.close_section();

        let ctx = self.ctx;
        if !ctx.index.is_empty() {
            self.out.push(
                ctx.index
                    .render(&options.index_heading, |title| ctx.labels.label_for(title)),
            );
        }

        let mut fragment = self.out.join("\n");
        if !fragment.is_empty() && !fragment.ends_with('\n') {
            fragment.push('\n');
        }

        Conversion {
            fragment,
            songs: self.songs,
            index: ctx.index,
            warnings: ctx.warnings,
        }
    }
}

/// Argument of a single-letter directive: `S`, `S Title`, `O`, `O Title =+2`.
fn directive_argument<'l>(line: &'l str, tag: &str) -> Option<&'l str> {
    let rest = line.strip_prefix(tag)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

/// A bare all-uppercase line that names a new song.
fn is_implicit_title(line: &str) -> bool {
    let first = line.split_whitespace().next().unwrap_or_default();
    line.chars().count() > 1
        && line.chars().any(char::is_alphabetic)
        && line == line.to_uppercase()
        && !RESERVED_TOKENS.contains(&first)
        && !has_markers(line)
        && !split_repeats(line).any()
        && !is_chord_line(line)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn convert(source: &str) -> Conversion {
        Parser::new(source).run(&Options::default())
    }

    #[test]
    fn test_directive_argument() {
        assert_eq!(directive_argument("S Adviento", "S"), Some("Adviento"));
        assert_eq!(directive_argument("O", "O"), Some(""));
        assert_eq!(directive_argument("Sol Re", "S"), None);
        assert_eq!(directive_argument("Oh Señor", "O"), None);
    }

    #[test]
    fn test_implicit_title_detection() {
        assert!(is_implicit_title("SOMOS LA IGLESIA"));
        assert!(is_implicit_title("¡ALELUYA!"));
        assert!(!is_implicit_title("C G AM"));
        assert!(!is_implicit_title("V"));
        assert!(!is_implicit_title("B GLORIA B"));
        assert!(!is_implicit_title("#GOZO"));
        assert!(!is_implicit_title("123"));
        assert!(!is_implicit_title("Somos la iglesia"));
    }

    #[test]
    fn test_untitled_song_opens_for_content() {
        let out = convert("V\nAmen");
        assert!(out.fragment.starts_with("\\beginsong{Untitled}\\label{untitled}\n"));
        assert_eq!(out.songs, 1);
    }

    #[test]
    fn test_transposed_song() {
        let out = convert("O gloria =+2\nV\nC G\nGloria a Dios");
        assert!(out.fragment.contains("\\beginsong{Gloria}\\label{gloria}"));
        assert!(out.fragment.contains("\\[Re]\\quad \\[La]"));
    }

    #[test]
    fn test_offset_zero_keeps_chord_text() {
        let out = convert("O Gloria\nV\nC G\nGloria a Dios");
        assert!(out.fragment.contains("\\[C]\\quad \\[G]"));
    }

    #[test]
    fn test_chorus_requires_chord_line() {
        let out = convert("O Coro\nC\nDo Sol\nAleluya");
        assert!(out.fragment.contains("\\beginchorus\n\\songgrid{B}{\\[Do]\\quad \\[Sol]\\\\\nAleluya}\n\\endchorus"));

        // `C` before a lyric is a chord row, not a chorus.
        let out = convert("O Coro\nC\nAleluya");
        assert!(!out.fragment.contains("\\beginchorus"));
        assert!(out.fragment.contains("\\songgrid{A}{\\[C]\\\\\nAleluya}"));
    }

    #[test]
    fn test_consecutive_chorus_markers() {
        // The first `C` sees a chord line next and opens a chorus; the second
        // sees a lyric and pairs with it.
        let out = convert("O Coro\nC\nC\nAleluya");
        assert!(out.fragment.contains("\\beginchorus\n\\songgrid{B}{\\[C]\\\\\nAleluya}\n\\endchorus"));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_instrumental_callout_closes_block() {
        let out = convert("O Intro\nV\nDo Sol\n_\nletra suelta");
        assert!(out.fragment.contains(
            "\\songgrid{A}{\\raisebox{1.7ex}{\\[Do]} \\raisebox{1.7ex}{\\[Sol]}}"
        ));
        assert!(!out.fragment.contains("letra suelta"));
        assert_eq!(out.warnings, vec![Warning::new(5, WarningKind::LyricOutsideBlock)]);
    }

    #[test]
    fn test_freeform_block() {
        let out = convert("O Oracion\nN\nPadre nuestro\nque estas en el cielo");
        assert!(out.fragment.contains("Padre nuestro\\par\nque estas en el cielo\\par\n\\endsong"));
    }

    #[test]
    fn test_scripture_follows_song() {
        let out = convert("O Gloria\nref=(Lc 2:14) Gloria a Dios en las alturas\nV\nGloria\nO Otra");
        let fragment = &out.fragment;
        let end = fragment.find("\\endsong").unwrap();
        let scripture = fragment.find("\\beginscripture{[Lc 2:14]}").unwrap();
        let next = fragment.find("\\beginsong{Otra}").unwrap();
        assert!(end < scripture && scripture < next);
    }

    #[test]
    fn test_section_wraps_songs() {
        let out = convert("S adviento\nO Ven Señor\nS navidad\nO Noche De Paz");
        assert_eq!(
            out.fragment,
            "\\songchapter{Adviento}\n\\begin{songs}{}\n\\beginsong{Ven Señor}\\label{ven-senor}\n\\endsong\n\\end{songs}\n\\songchapter{Navidad}\n\\begin{songs}{}\n\\beginsong{Noche De Paz}\\label{noche-de-paz}\n\\endsong\n\\end{songs}\n"
        );
    }

    #[test]
    fn test_empty_block_warns() {
        let out = convert("O Vacio\nV\nM\nDo\nla la");
        assert!(out.warnings.contains(&Warning::new(2, WarningKind::EmptyBlock { block: BlockKind::Verse })));
        assert!(!out.fragment.contains("\\beginverse\n"));
        assert!(out.fragment.contains("\\beginverse*"));
    }

    #[test]
    fn test_invalid_transpose_warns() {
        let out = convert("O Gloria =99999999999\nV\nC\nAmen");
        assert!(out.warnings.iter().any(|w| matches!(w.kind, WarningKind::InvalidTranspose { .. })));
        assert!(out.fragment.contains("\\[C]"));
    }

    #[test]
    fn test_oversized_repeat_count_warns() {
        let out = convert("O Gloria\nV\nGloria B=99999999999");
        assert!(out.fragment.contains("Gloria \\rrep \\rep{2}"));
        assert_eq!(
            out.warnings,
            vec![Warning::new(3, WarningKind::InvalidRepeatCount { value: "99999999999".to_string() })]
        );
    }

    #[test]
    fn test_american_f_chord_keeps_suffix() {
        let out = convert("O X =+2\nV\nC Fadd9\nLa luz");
        assert!(out.fragment.contains("\\[Re]\\quad \\[Soladd9]"));
    }

    #[test]
    fn test_trailing_chord_line_is_lyric() {
        let out = convert("O Final\nV\nDo Sol");
        assert!(out.fragment.contains("\\songgrid{A}{Do Sol}"));
    }
}
