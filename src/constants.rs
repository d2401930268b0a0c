//! Application constants.
//!
//! Centralizes the LaTeX vocabulary and markup sentinels so the emitted
//! constructs stay in step with the downstream `songs` macro package.

/// Markup tokens recognized in SongPro source text.
pub mod markup {
    /// Chord-placement placeholder.
    pub const PLACEHOLDER: char = '_';

    /// Leading sentinel marking a word for the topical index.
    pub const INDEX_SIGIL: char = '#';

    /// Separator between a displayed indexed word and its index alias.
    pub const INDEX_ALIAS: char = '=';

    /// Repeat-bracket marker token.
    pub const REPEAT: &str = "B";

    /// Repeat count used when a closing marker carries none.
    pub const DEFAULT_REPEAT_COUNT: u32 = 2;

    /// Prefix of a scripture reference directive.
    pub const SCRIPTURE_PREFIX: &str = "ref=(";

    /// Single-token directives that can never be implicit song titles.
    pub const RESERVED_TOKENS: &[&str] = &["S", "O", "V", "M", "N", "C", "B"];
}

/// Song title defaults.
pub mod song {
    /// Title used when a song has none.
    pub const UNTITLED: &str = "Untitled";

    /// Label used when a title folds to nothing.
    pub const UNTITLED_LABEL: &str = "untitled";
}

/// Topical index rendering.
pub mod index {
    /// Default heading of the topical index section.
    pub const DEFAULT_HEADING: &str = "Topical Index";

    /// Name of the LaTeX index the keywords are written to.
    pub const LATEX_INDEX_NAME: &str = "tema";

    /// Highlight color of indexed keywords.
    pub const KEYWORD_COLOR: &str = "blue!50!black";
}

/// Template substitution sentinels.
pub mod template {
    /// Marker preceding the generated fragment.
    pub const BEGIN_MARKER: &str = "%%SONGPRESS-BEGIN%%";

    /// Marker following the generated fragment.
    pub const END_MARKER: &str = "%%SONGPRESS-END%%";
}

/// Batch conversion defaults.
pub mod batch {
    /// Source file extensions picked up when none are configured.
    pub const DEFAULT_EXTENSIONS: &[&str] = &["txt", "sng", "songpro"];

    /// Extension of generated fragment files.
    pub const OUTPUT_EXTENSION: &str = "tex";
}
