/// Footnote definition type (`[^label]: text`).
pub struct FootnoteDefinition;

impl FootnoteDefinition {
    pub const OPEN: &'static str = "[^";
    pub const CLOSE: &'static str = "]:";
    /// Content lines of a definition are indented this many columns.
    pub const INDENT: usize = 4;

    /// Recognizes a definition opener at the start of `s`.
    ///
    /// Returns the label and the length of `[^label]:` plus the spaces
    /// after it. Labels may not contain whitespace or brackets.
    pub fn opening(s: &str) -> Option<(&str, usize)> {
        let rest = s.strip_prefix(Self::OPEN)?;
        let end = rest.find(']')?;
        let label = &rest[..end];
        if label.is_empty()
            || label.len() > crate::parsing::inline::kinds::Link::MAX_LABEL
            || label.contains(|c: char| c.is_whitespace() || c == '[')
        {
            return None;
        }
        if !rest[end..].starts_with(Self::CLOSE) {
            return None;
        }
        let mut len = Self::OPEN.len() + end + Self::CLOSE.len();
        len += s[len..]
            .bytes()
            .take_while(|&b| b == b' ' || b == b'\t')
            .count();
        Some((label, len))
    }
}
