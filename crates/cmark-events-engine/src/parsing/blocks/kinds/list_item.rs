use crate::parsing::blocks::{line::LineCursor, types::ListData};

/// List item type with owned marker constants.
pub struct ListItem;

impl ListItem {
    pub const BULLETS: [u8; 3] = [b'-', b'+', b'*'];
    pub const DELIMITERS: [u8; 2] = [b'.', b')'];
    /// Ordered markers carry at most this many digits.
    pub const MAX_DIGITS: usize = 9;
    /// Columns after the marker beyond which the content counts as
    /// indented code inside the item.
    const MAX_PADDING: usize = 5;

    /// Parses a list marker at the cursor's next non-space position and
    /// consumes it with the spaces that belong to it.
    ///
    /// `in_paragraph` applies the interruption rules: an ordered item must
    /// start at 1 and the item may not be empty. The cursor is untouched
    /// when `None` is returned.
    pub fn parse_marker(ln: &mut LineCursor<'_>, in_paragraph: bool) -> Option<ListData> {
        if ln.indent >= 4 {
            return None;
        }
        let rest = ln.rest_from_nonspace().as_bytes();
        let first = *rest.first()?;

        let (ordered, marker, start, len) = if Self::BULLETS.contains(&first) {
            (false, first, 0, 1)
        } else {
            let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
            if digits == 0 || digits > Self::MAX_DIGITS {
                return None;
            }
            let delim = *rest.get(digits)?;
            if !Self::DELIMITERS.contains(&delim) {
                return None;
            }
            let start = std::str::from_utf8(&rest[..digits])
                .ok()?
                .parse::<u64>()
                .ok()?;
            if in_paragraph && start != 1 {
                return None;
            }
            (true, delim, start, digits + 1)
        };

        if !matches!(rest.get(len), None | Some(b' ' | b'\t')) {
            return None;
        }
        if in_paragraph && rest[len..].iter().all(|b| *b == b' ' || *b == b'\t') {
            return None;
        }

        let marker_offset = ln.indent;
        ln.advance_next_nonspace();
        ln.advance_offset(len, true);
        let spaces_start_col = ln.column;
        let spaces_start_offset = ln.offset;
        loop {
            ln.advance_offset(1, true);
            let more = matches!(ln.peek(), Some(b' ' | b'\t'));
            if !(ln.column - spaces_start_col < Self::MAX_PADDING && more) {
                break;
            }
        }
        let blank_item = ln.peek().is_none();
        let spaces_after = ln.column - spaces_start_col;

        let padding = if spaces_after >= Self::MAX_PADDING || spaces_after < 1 || blank_item {
            ln.column = spaces_start_col;
            ln.offset = spaces_start_offset;
            ln.partially_consumed_tab = false;
            if matches!(ln.peek(), Some(b' ' | b'\t')) {
                ln.advance_offset(1, true);
            }
            len + 1
        } else {
            len + spaces_after
        };

        Some(ListData {
            ordered,
            marker,
            start,
            marker_offset,
            padding,
            tight: true,
        })
    }

    /// Recognizes a task marker (`[ ]`, `[x]`, `[X]` plus whitespace) at
    /// the start of an item's first paragraph.
    ///
    /// Returns the checked state and the bytes to strip. The paragraph
    /// must have text after the marker.
    pub fn task_marker(content: &str) -> Option<(bool, usize)> {
        let b = content.as_bytes();
        if b.len() < 4 || b[0] != b'[' || b[2] != b']' {
            return None;
        }
        let checked = match b[1] {
            b' ' => false,
            b'x' | b'X' => true,
            _ => return None,
        };
        if !matches!(b[3], b' ' | b'\t') {
            return None;
        }
        let ws = content[3..]
            .bytes()
            .take_while(|&c| c == b' ' || c == b'\t')
            .count();
        let after = &content[3 + ws..];
        if after.trim().is_empty() {
            return None;
        }
        Some((checked, 3 + ws))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn marker(s: &str, in_paragraph: bool) -> Option<(ListData, String)> {
        let mut ln = LineCursor::new(s);
        ln.find_next_nonspace();
        ListItem::parse_marker(&mut ln, in_paragraph).map(|d| (d, ln.rest().to_string()))
    }

    #[rstest]
    #[case("- one", false, b'-', 0, 2, "one")]
    #[case("1. one", true, b'.', 1, 3, "one")]
    #[case("10) ten", true, b')', 10, 4, "ten")]
    #[case("-    two", false, b'-', 0, 5, "two")]
    #[case("-     code", false, b'-', 0, 2, "    code")]
    #[case("-", false, b'-', 0, 2, "")]
    #[case("*\tx", false, b'*', 0, 4, "x")]
    fn markers(
        #[case] input: &str,
        #[case] ordered: bool,
        #[case] ch: u8,
        #[case] start: u64,
        #[case] padding: usize,
        #[case] rest: &str,
    ) {
        let (data, got_rest) = marker(input, false).unwrap();
        assert_eq!(data.ordered, ordered);
        assert_eq!(data.marker, ch);
        assert_eq!(data.start, start);
        assert_eq!(data.padding, padding);
        assert_eq!(got_rest, rest);
    }

    #[rstest]
    #[case("-one")]
    #[case("1234567890. big")]
    #[case("    - indented")]
    #[case("a. letter")]
    fn not_markers(#[case] input: &str) {
        assert!(marker(input, false).is_none());
    }

    #[test]
    fn interrupting_a_paragraph_is_restricted() {
        assert!(marker("2. two", true).is_none());
        assert!(marker("1. one", true).is_some());
        assert!(marker("-", true).is_none());
        assert!(marker("-   ", true).is_none());
        assert!(marker("- x", true).is_some());
    }

    #[test]
    fn marker_offset_is_recorded() {
        let (data, _) = marker("  - x", false).unwrap();
        assert_eq!(data.marker_offset, 2);
    }

    #[rstest]
    #[case("[ ] todo", Some((false, 4)))]
    #[case("[x] done", Some((true, 4)))]
    #[case("[X]\tdone", Some((true, 4)))]
    #[case("[x]done", None)]
    #[case("[x] ", None)]
    #[case("[-] nope", None)]
    #[case("[ ]", None)]
    fn task_markers(#[case] input: &str, #[case] expected: Option<(bool, usize)>) {
        assert_eq!(ListItem::task_marker(input), expected);
    }
}
