use std::sync::OnceLock;

use regex::Regex;

use crate::event::Kind;

/// Angle-bracket autolinks: `<scheme:rest>` and `<user@host>`.
pub struct Autolink;

/// A recognized autolink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutolinkMatch {
    /// Text between the angle brackets.
    pub text: String,
    /// Link destination; e-mail addresses get a `mailto:` prefix.
    pub url: String,
    pub kind: Kind,
    /// Bytes consumed, brackets included.
    pub len: usize,
}

impl Autolink {
    pub const OPEN: u8 = b'<';
    pub const MAILTO: &'static str = "mailto:";

    fn uri_regex() -> &'static Regex {
        static URI_REGEX: OnceLock<Regex> = OnceLock::new();
        URI_REGEX.get_or_init(|| {
            Regex::new(r"^<[A-Za-z][A-Za-z0-9.+\-]{1,31}:[^<>\x00-\x20]*>")
                .expect("Invalid autolink URI regex")
        })
    }

    fn email_regex() -> &'static Regex {
        static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
        EMAIL_REGEX.get_or_init(|| {
            Regex::new(
                r"^<[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~\-]+@[a-zA-Z0-9](?:[a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?)*>",
            )
            .expect("Invalid autolink email regex")
        })
    }

    /// Recognizes an autolink at the start of `s` (which begins with `<`).
    pub fn scan(s: &str) -> Option<AutolinkMatch> {
        if let Some(m) = Self::uri_regex().find(s) {
            let text = &m.as_str()[1..m.len() - 1];
            return Some(AutolinkMatch {
                text: text.to_string(),
                url: text.to_string(),
                kind: Kind::Autolink,
                len: m.len(),
            });
        }
        let m = Self::email_regex().find(s)?;
        let text = &m.as_str()[1..m.len() - 1];
        Some(AutolinkMatch {
            text: text.to_string(),
            url: format!("{}{text}", Self::MAILTO),
            kind: Kind::Email,
            len: m.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn uri_autolink() {
        let m = Autolink::scan("<https://example.com/a?b=c> tail").unwrap();
        assert_eq!(m.text, "https://example.com/a?b=c");
        assert_eq!(m.url, "https://example.com/a?b=c");
        assert_eq!(m.kind, Kind::Autolink);
        assert_eq!(m.len, 27);
    }

    #[test]
    fn email_autolink_gets_mailto() {
        let m = Autolink::scan("<foo@bar.example.com>").unwrap();
        assert_eq!(m.text, "foo@bar.example.com");
        assert_eq!(m.url, "mailto:foo@bar.example.com");
        assert_eq!(m.kind, Kind::Email);
    }

    #[rstest]
    #[case("<http://foo.bar/baz bim>")]
    #[case("<m:abc>")]
    #[case("<foo.bar.baz>")]
    #[case("<>")]
    #[case("<https://a<b>")]
    fn not_autolinks(#[case] input: &str) {
        assert_eq!(Autolink::scan(input), None);
    }

    #[test]
    fn uri_may_contain_backslashes_verbatim() {
        let m = Autolink::scan(r"<https://example.com/\[\>").unwrap();
        assert_eq!(m.url, r"https://example.com/\[\");
    }
}
