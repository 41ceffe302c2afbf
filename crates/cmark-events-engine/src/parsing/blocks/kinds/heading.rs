/// ATX heading type (`# Title`) with owned marker constants.
pub struct AtxHeading;

impl AtxHeading {
    pub const MARKER: u8 = b'#';
    pub const MAX_LEVEL: usize = 6;

    /// Recognizes an opening sequence at the start of `s`.
    ///
    /// Returns the level and the length of the marker including the
    /// whitespace that follows it.
    pub fn opening(s: &str) -> Option<(u8, usize)> {
        let hashes = s.bytes().take_while(|&b| b == Self::MARKER).count();
        if hashes == 0 || hashes > Self::MAX_LEVEL {
            return None;
        }
        let spaces = s[hashes..]
            .bytes()
            .take_while(|&b| b == b' ' || b == b'\t')
            .count();
        if spaces == 0 && hashes < s.len() {
            return None;
        }
        Some((hashes as u8, hashes + spaces))
    }

    /// Removes an optional closing sequence of `#`s from heading text.
    ///
    /// The closing sequence must be preceded by a space or tab, or be all
    /// the heading holds.
    pub fn strip_closing(rest: &str) -> &str {
        let trimmed = rest.trim_end_matches([' ', '\t']);
        let without = trimmed.trim_end_matches('#');
        if without.len() == trimmed.len() {
            return rest;
        }
        if without.trim_start_matches([' ', '\t']).is_empty() {
            return "";
        }
        if without.ends_with([' ', '\t']) {
            without
        } else {
            rest
        }
    }
}

/// Setext heading underline (`===` or `---` below a paragraph).
pub struct SetextHeading;

impl SetextHeading {
    pub const LEVEL1: u8 = b'=';
    pub const LEVEL2: u8 = b'-';

    /// Heading level for an underline, or `None` when `s` is not one.
    pub fn level(s: &str) -> Option<u8> {
        let ch = *s.as_bytes().first()?;
        let level = match ch {
            Self::LEVEL1 => 1,
            Self::LEVEL2 => 2,
            _ => return None,
        };
        let run = s.bytes().take_while(|&b| b == ch).count();
        s[run..]
            .bytes()
            .all(|b| b == b' ' || b == b'\t')
            .then_some(level)
    }
}
