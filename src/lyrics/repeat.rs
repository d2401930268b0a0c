//! Repeat-bracket markers.
//!
//! A lyric line may start with `B ` (open a repeat) and may end with ` B` or
//! ` B=<N>` (close it, repeating N times). The two ends are independent.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::markup::{DEFAULT_REPEAT_COUNT, REPEAT};
use crate::latex;

#[allow(clippy::expect_used)]
static RE_REPEAT_CLOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+B(?:=(\d+))?$").expect("valid regex: RE_REPEAT_CLOSE")
});

/// A lyric line with its repeat markers split off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatMarks<'a> {
    /// Text between the markers.
    pub body: &'a str,
    /// Line starts a repeat.
    pub opens: bool,
    /// Line ends a repeat, with its count.
    pub closes: Option<u32>,
    /// Count as written when it did not fit; the default count is used instead.
    pub invalid_count: Option<&'a str>,
}

impl RepeatMarks<'_> {
    /// True when either marker is present.
    pub const fn any(&self) -> bool {
        self.opens || self.closes.is_some()
    }

    /// Surround already-rendered body text with the repeat brackets.
    pub fn wrap(&self, rendered: &str) -> String {
        let mut out = String::new();
        if self.opens {
            out.push_str(latex::REPEAT_OPEN);
        }
        out.push_str(rendered);
        if let Some(count) = self.closes {
            out.push_str(&latex::repeat_close(count));
        }
        out
    }
}

/// Split the repeat markers off a lyric line.
pub fn split_repeats(line: &str) -> RepeatMarks<'_> {
    let mut body = line.trim();

    let opens = match body.strip_prefix(REPEAT) {
        Some(rest) if rest.starts_with(char::is_whitespace) => {
            body = rest.trim_start();
            true
        }
        _ => false,
    };

    let mut invalid_count = None;
    let closes = RE_REPEAT_CLOSE.captures(body).map(|caps| {
        let count = match caps.get(1).map(|m| m.as_str()) {
            None => DEFAULT_REPEAT_COUNT,
            Some(written) => written.parse().unwrap_or_else(|_| {
                invalid_count = Some(written);
                DEFAULT_REPEAT_COUNT
            }),
        };
        let start = caps.get(0).map_or(body.len(), |m| m.start());
        body = &body[..start];
        count
    });

    RepeatMarks { body, opens, closes, invalid_count }
}
