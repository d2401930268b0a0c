//! Chord-line detection.

use crate::chord;

/// True when every whitespace-separated token on the line is a chord.
///
/// A single non-chord token disqualifies the line; a blank line is never a
/// chord line.
pub fn is_chord_line(line: &str) -> bool {
    let mut tokens = line.split_whitespace().peekable();
    tokens.peek().is_some() && tokens.all(chord::classify)
}

/// The chord tokens of a chord line, in order.
pub fn chord_tokens(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_american_line() {
        assert!(is_chord_line("C        G"));
        assert!(is_chord_line("  Am  F  C/E  G7 "));
        assert!(is_chord_line("am f c g"));
    }

    #[test]
    fn test_latin_line_case_insensitive() {
        assert!(is_chord_line("Do Sol Lam Fa"));
        assert!(is_chord_line("DO SOL LAM FA"));
        assert!(is_chord_line("do sol lam fa"));
    }

    #[test]
    fn test_one_word_rejects_line() {
        assert!(!is_chord_line("C G Amazing F"));
        assert!(!is_chord_line("Do Sol grace"));
    }

    #[test]
    fn test_blank_line() {
        assert!(!is_chord_line(""));
        assert!(!is_chord_line("   "));
    }

    #[test]
    fn test_chord_tokens() {
        assert_eq!(chord_tokens(" C   G/B Am "), vec!["C", "G/B", "Am"]);
    }
}
