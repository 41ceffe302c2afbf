use std::sync::OnceLock;

use regex::Regex;

/// Inline raw HTML: tags, comments, processing instructions, declarations
/// and CDATA sections. Passed through to the output untouched.
pub struct RawHtml;

impl RawHtml {
    pub const OPEN: u8 = b'<';

    /// An open tag with attributes.
    pub const OPEN_TAG: &'static str = concat!(
        r"<[A-Za-z][A-Za-z0-9\-]*",
        r#"(?:\s+[a-zA-Z_:][a-zA-Z0-9:._\-]*(?:\s*=\s*(?:[^"'=<>`\x00-\x20]+|'[^']*'|"[^"]*"))?)*"#,
        r"\s*/?>"
    );

    /// A closing tag.
    pub const CLOSE_TAG: &'static str = r"</[A-Za-z][A-Za-z0-9\-]*\s*>";

    const OTHER: &'static str = concat!(
        r"<!-->|<!--->|<!--[\s\S]*?-->",
        r"|<\?[\s\S]*?\?>",
        r"|<![A-Za-z]+[^>]*>",
        r"|<!\[CDATA\[[\s\S]*?\]\]>"
    );

    fn regex() -> &'static Regex {
        static HTML_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
        HTML_TAG_REGEX.get_or_init(|| {
            Regex::new(&format!(
                "^(?:{}|{}|{})",
                Self::OPEN_TAG,
                Self::CLOSE_TAG,
                Self::OTHER
            ))
            .expect("Invalid raw HTML regex")
        })
    }

    /// Length of the raw HTML construct at the start of `s`, if any.
    pub fn scan(s: &str) -> Option<usize> {
        Self::regex().find(s).map(|m| m.end())
    }
}
