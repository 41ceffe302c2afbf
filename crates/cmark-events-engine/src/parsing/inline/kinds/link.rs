use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::inline::cursor::Cursor;

use super::entity::Entity;

/// Pieces shared by inline links and link reference definitions:
/// destinations, titles and bracketed labels.
pub struct Link;

impl Link {
    pub const OPEN: u8 = b'[';
    pub const CLOSE: u8 = b']';
    pub const IMAGE: &'static [u8] = b"![";
    pub const DEST_OPEN: u8 = b'(';
    pub const DEST_CLOSE: u8 = b')';
    /// Labels may hold at most this many characters between the brackets.
    pub const MAX_LABEL: usize = 999;
    /// Unbalanced-paren nesting allowed in a bare destination.
    const MAX_PAREN_DEPTH: usize = 32;

    fn angle_dest_regex() -> &'static Regex {
        static ANGLE_DEST_REGEX: OnceLock<Regex> = OnceLock::new();
        ANGLE_DEST_REGEX.get_or_init(|| {
            Regex::new(r"^<(?:[^<>\n\\\x00]|\\.)*>").expect("Invalid link destination regex")
        })
    }

    fn title_regex() -> &'static Regex {
        static TITLE_REGEX: OnceLock<Regex> = OnceLock::new();
        TITLE_REGEX.get_or_init(|| {
            Regex::new(r#"^(?s:"(?:\\.|[^"\\\x00])*"|'(?:\\.|[^'\\\x00])*'|\((?:\\.|[^()\\\x00])*\))"#)
                .expect("Invalid link title regex")
        })
    }

    fn label_regex() -> &'static Regex {
        static LABEL_REGEX: OnceLock<Regex> = OnceLock::new();
        LABEL_REGEX.get_or_init(|| {
            Regex::new(r"^(?s:\[(?:[^\\\[\]]|\\.){0,1000}\])").expect("Invalid link label regex")
        })
    }

    /// Parses a destination at the cursor, returning it unescaped.
    ///
    /// On failure the cursor is left where it was.
    pub fn destination(cur: &mut Cursor<'_>) -> Option<String> {
        if let Some(m) = Self::angle_dest_regex().find(cur.rest()) {
            cur.bump_n(m.len());
            let raw = m.as_str();
            return Some(unescape_string(&raw[1..raw.len() - 1]));
        }
        if cur.peek() == Some(b'<') {
            return None;
        }

        let start = cur.i;
        let mut depth = 0usize;
        while let Some(b) = cur.peek() {
            match b {
                b'\\' if cur.peek_at(1).is_some_and(|n| n.is_ascii_punctuation()) => {
                    cur.bump_n(2);
                }
                b'(' => {
                    depth += 1;
                    if depth > Self::MAX_PAREN_DEPTH {
                        cur.i = start;
                        return None;
                    }
                    cur.bump();
                }
                b')' => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    cur.bump();
                }
                b if b <= b' ' || b == 0x7f => break,
                _ => {
                    cur.bump();
                }
            }
        }
        if depth != 0 || (cur.i == start && cur.peek() != Some(Self::DEST_CLOSE)) {
            cur.i = start;
            return None;
        }
        Some(unescape_string(&cur.s[start..cur.i]))
    }

    /// Parses a quoted or parenthesized title at the cursor.
    pub fn title(cur: &mut Cursor<'_>) -> Option<String> {
        let m = Self::title_regex().find(cur.rest())?;
        cur.bump_n(m.len());
        let raw = m.as_str();
        Some(unescape_string(&raw[1..raw.len() - 1]))
    }

    /// Length in bytes of a `[label]` at the cursor, brackets included, or 0.
    ///
    /// The cursor is advanced past the label when one is found.
    pub fn label(cur: &mut Cursor<'_>) -> usize {
        let Some(m) = Self::label_regex().find(cur.rest()) else {
            return 0;
        };
        let inner = &m.as_str()[1..m.len() - 1];
        if inner.chars().count() > Self::MAX_LABEL {
            return 0;
        }
        cur.bump_n(m.len());
        m.len()
    }
}

fn unescape_regex() -> &'static Regex {
    static UNESCAPE_REGEX: OnceLock<Regex> = OnceLock::new();
    UNESCAPE_REGEX.get_or_init(|| {
        Regex::new(r"\\[!-/:-@\[-`{-~]|&(?:#[xX][0-9a-fA-F]{1,6}|#[0-9]{1,7}|[A-Za-z][A-Za-z0-9]{1,31});")
            .expect("Invalid unescape regex")
    })
}

/// Resolves backslash escapes and entity references in `s`.
pub fn unescape_string(s: &str) -> String {
    if !s.contains(['\\', '&']) {
        return s.to_string();
    }
    unescape_regex()
        .replace_all(s, |caps: &regex::Captures<'_>| {
            let m = &caps[0];
            if let Some(escaped) = m.strip_prefix('\\') {
                escaped.to_string()
            } else {
                Entity::scan(m).map_or_else(|| m.to_string(), |(text, _)| text)
            }
        })
        .into_owned()
}
