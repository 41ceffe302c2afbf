use crate::parsing::inline::kinds::unescape_string;

/// Fenced code block type with owned fence constants.
pub struct CodeFence;

impl CodeFence {
    pub const BACKTICK: u8 = b'`';
    pub const TILDE: u8 = b'~';
    /// Fences are at least this many characters long.
    pub const MIN_LEN: usize = 3;

    /// Recognizes an opening fence at the start of `s`.
    ///
    /// Returns the fence character and run length. A backtick fence's info
    /// string may not contain backticks.
    pub fn opening(s: &str) -> Option<(u8, usize)> {
        let ch = *s.as_bytes().first()?;
        if ch != Self::BACKTICK && ch != Self::TILDE {
            return None;
        }
        let len = s.bytes().take_while(|&b| b == ch).count();
        if len < Self::MIN_LEN {
            return None;
        }
        if ch == Self::BACKTICK && s[len..].contains('`') {
            return None;
        }
        Some((ch, len))
    }

    /// Whether `s` (from the next non-space) closes a fence of `ch` that
    /// opened with `min_len` characters.
    pub fn closes(s: &str, ch: u8, min_len: usize) -> bool {
        let len = s.bytes().take_while(|&b| b == ch).count();
        len >= min_len.max(Self::MIN_LEN) && s[len..].bytes().all(|b| b == b' ' || b == b'\t')
    }

    /// Splits accumulated content into the info string (first line) and
    /// the literal body.
    pub fn split_content(content: &str) -> (String, String) {
        let (first, rest) = content.split_once('\n').unwrap_or((content, ""));
        (unescape_string(first.trim()), rest.to_string())
    }

    /// First word of the info string, used as the language tag.
    pub fn language(info: &str) -> &str {
        info.split([' ', '\t']).next().unwrap_or("")
    }
}
