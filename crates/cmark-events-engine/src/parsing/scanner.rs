//! # Scanner
//!
//! Phase 0 of parsing: split the input into logical lines and record local
//! facts about each one (leading whitespace width, a hint about what the
//! first non-blank character might start). Nothing here knows about nesting;
//! the block builder decides what a line means in context.
//!
//! The scanner borrows the input and only allocates for lines that contain
//! a NUL byte, which CommonMark requires to be replaced with U+FFFD.

use std::borrow::Cow;

use crate::Error;

/// Tab stops are every 4 columns.
pub const TAB_STOP: usize = 4;

/// What the first non-blank character of a line might start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineHint {
    /// Only spaces and tabs.
    Blank,
    /// `-`, `+`, `*` or an ASCII digit.
    ListMarker,
    /// `>`
    BlockQuoteMarker,
    /// `` ` `` or `~`
    FenceMarker,
    /// Any other character that can open a block: `# = _ < [ | :`
    Structural,
    /// Plain text; can only continue or start a paragraph.
    Other,
}

impl LineHint {
    /// Classifies `s` by its first non-blank character.
    pub fn classify(s: &str) -> Self {
        let Some(c) = s.bytes().find(|b| *b != b' ' && *b != b'\t') else {
            return LineHint::Blank;
        };
        match c {
            b'>' => LineHint::BlockQuoteMarker,
            b'`' | b'~' => LineHint::FenceMarker,
            b'-' | b'+' | b'*' | b'0'..=b'9' => LineHint::ListMarker,
            b'#' | b'=' | b'_' | b'<' | b'[' | b'|' | b':' => LineHint::Structural,
            _ => LineHint::Other,
        }
    }

    /// Whether a line with this hint is worth testing against block starts.
    pub fn might_open_block(self) -> bool {
        !matches!(self, LineHint::Other | LineHint::Blank)
    }
}

/// A single logical line of the input, without its line ending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number.
    pub number: usize,
    /// Line text; owned only when NUL bytes had to be replaced.
    pub text: Cow<'a, str>,
    /// Byte offset of the first non-blank character (`text.len()` if none).
    pub nonspace: usize,
    /// Width of the leading whitespace, tabs expanded to the next tab stop.
    pub indent: usize,
    pub hint: LineHint,
}

/// Lazy, restartable iterator over the lines of a document.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    number: usize,
}

impl<'a> Scanner<'a> {
    /// Validates `input` as UTF-8 and positions the scanner at its start.
    pub fn new(input: &'a [u8]) -> Result<Self, Error> {
        let src = std::str::from_utf8(input)?;
        Ok(Self::for_str(src))
    }

    /// Scans an already validated string.
    pub fn for_str(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            number: 0,
        }
    }

    /// Rewinds to the first line.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.number = 0;
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.src.len() {
            return None;
        }
        let rest = &self.src[self.pos..];
        let (len, ending) = match rest.find(['\n', '\r']) {
            Some(i) if rest[i..].starts_with("\r\n") => (i, 2),
            Some(i) => (i, 1),
            None => (rest.len(), 0),
        };
        let raw = &rest[..len];
        self.pos += len + ending;
        self.number += 1;

        let text = if raw.contains('\0') {
            Cow::Owned(raw.replace('\0', "\u{FFFD}"))
        } else {
            Cow::Borrowed(raw)
        };
        let (nonspace, indent) = leading_whitespace(&text);
        Some(Line {
            number: self.number,
            nonspace,
            indent,
            hint: LineHint::classify(&text),
            text,
        })
    }
}

/// Byte length and column width of the leading whitespace of `s`, tabs
/// expanded.
pub fn leading_whitespace(s: &str) -> (usize, usize) {
    let mut col = 0;
    for (i, b) in s.bytes().enumerate() {
        match b {
            b' ' => col += 1,
            b'\t' => col += TAB_STOP - col % TAB_STOP,
            _ => return (i, col),
        }
    }
    (s.len(), col)
}
