/// Code span inline type with owned delimiter constant.
///
/// Code spans are raw zones: nothing else is parsed inside them, and a
/// backslash is literal.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';

    /// Finds the closing run for an opening run of `len` backticks.
    ///
    /// `rest` starts right after the opening run. Returns the span content
    /// (normalized) and the byte length consumed from `rest`, closing run
    /// included. `None` means the opening run is literal text.
    pub fn scan(rest: &str, len: usize) -> Option<(String, usize)> {
        let bytes = rest.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] != Self::TICK {
                i += 1;
                continue;
            }
            let run_start = i;
            while i < bytes.len() && bytes[i] == Self::TICK {
                i += 1;
            }
            if i - run_start == len {
                return Some((Self::normalize(&rest[..run_start]), i));
            }
        }
        None
    }

    /// Line endings become spaces; one leading and one trailing space are
    /// stripped when both are present and the content is not all spaces.
    fn normalize(raw: &str) -> String {
        let s = raw.replace('\n', " ");
        let b = s.as_bytes();
        if b.len() >= 2 && b[0] == b' ' && b[b.len() - 1] == b' ' && s.bytes().any(|c| c != b' ')
        {
            s[1..s.len() - 1].to_string()
        } else {
            s
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("foo`", 1, Some(("foo", 4)))]
    #[case("foo``bar`", 1, Some(("foo``bar", 9)))]
    #[case(" `` ```", 3, Some(("``", 7)))]
    #[case("  ``", 2, Some(("  ", 4)))]
    #[case("a\nb`", 1, Some(("a b", 4)))]
    #[case(" a`", 1, Some((" a", 3)))]
    #[case("foo``", 1, None)]
    #[case("never closed", 1, None)]
    fn closing_runs(
        #[case] rest: &str,
        #[case] len: usize,
        #[case] expected: Option<(&str, usize)>,
    ) {
        let got = CodeSpan::scan(rest, len);
        assert_eq!(got.as_ref().map(|(c, n)| (c.as_str(), *n)), expected);
    }
}
