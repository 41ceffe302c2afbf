use crate::parsing::scanner::{Line, LineHint, TAB_STOP};

/// Columns of indentation that make an indented code line.
pub const CODE_INDENT: usize = 4;

/// Position state while the block parser consumes one line.
///
/// `offset` is a byte index into `text`; `column` is the visual column
/// with tabs expanded. A tab can be consumed partially (a list item that
/// needs 2 of its 4 columns), in which case `partially_consumed_tab` is set
/// and `offset` still points at the tab.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    pub text: &'a str,
    pub offset: usize,
    pub column: usize,
    pub next_nonspace: usize,
    pub next_nonspace_column: usize,
    /// Columns between `column` and the next non-space character.
    pub indent: usize,
    pub indented: bool,
    /// Nothing but spaces and tabs after `offset`.
    pub blank: bool,
    pub partially_consumed_tab: bool,
    /// What the scanner found at the start of the line. Only valid while
    /// nothing has been consumed.
    scanned: Option<Scanned>,
}

#[derive(Debug, Clone, Copy)]
struct Scanned {
    nonspace: usize,
    indent: usize,
    hint: LineHint,
}

impl<'a> LineCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            offset: 0,
            column: 0,
            next_nonspace: 0,
            next_nonspace_column: 0,
            indent: 0,
            indented: false,
            blank: false,
            partially_consumed_tab: false,
            scanned: None,
        }
    }

    /// A cursor over a scanned line that reuses the scanner's leading
    /// whitespace and hint instead of measuring them again.
    pub fn for_line(line: &'a Line<'_>) -> Self {
        Self {
            scanned: Some(Scanned {
                nonspace: line.nonspace,
                indent: line.indent,
                hint: line.hint,
            }),
            ..Self::new(&line.text)
        }
    }

    fn at_line_start(&self) -> Option<Scanned> {
        self.scanned
            .filter(|_| self.offset == 0 && self.column == 0 && !self.partially_consumed_tab)
    }

    /// Locates the next non-space character and updates the indent facts.
    pub fn find_next_nonspace(&mut self) {
        if let Some(scanned) = self.at_line_start() {
            self.blank = scanned.hint == LineHint::Blank;
            self.next_nonspace = scanned.nonspace;
            self.next_nonspace_column = scanned.indent;
            self.indent = scanned.indent;
            self.indented = self.indent >= CODE_INDENT;
            return;
        }
        let bytes = self.text.as_bytes();
        let mut i = self.offset;
        let mut cols = self.column;
        while let Some(&b) = bytes.get(i) {
            match b {
                b' ' => cols += 1,
                b'\t' => cols += TAB_STOP - cols % TAB_STOP,
                _ => break,
            }
            i += 1;
        }
        self.blank = i >= bytes.len();
        self.next_nonspace = i;
        self.next_nonspace_column = cols;
        self.indent = cols - self.column;
        self.indented = self.indent >= CODE_INDENT;
    }

    pub fn advance_next_nonspace(&mut self) {
        self.offset = self.next_nonspace;
        self.column = self.next_nonspace_column;
        self.partially_consumed_tab = false;
    }

    /// Advances `count` characters, or `count` columns when `columns` is
    /// set (a tab may then be split).
    pub fn advance_offset(&mut self, mut count: usize, columns: bool) {
        while count > 0 {
            let Some(c) = self.text[self.offset..].chars().next() else {
                break;
            };
            if c == '\t' {
                let to_tab = TAB_STOP - self.column % TAB_STOP;
                if columns {
                    self.partially_consumed_tab = to_tab > count;
                    let advance = to_tab.min(count);
                    self.column += advance;
                    if !self.partially_consumed_tab {
                        self.offset += 1;
                    }
                    count -= advance;
                } else {
                    self.partially_consumed_tab = false;
                    self.column += to_tab;
                    self.offset += 1;
                    count -= 1;
                }
            } else {
                self.partially_consumed_tab = false;
                self.offset += c.len_utf8();
                self.column += 1;
                count -= 1;
            }
        }
    }

    /// Moves past the rest of the line.
    pub fn advance_to_end(&mut self) {
        self.offset = self.text.len();
        self.partially_consumed_tab = false;
    }

    pub fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.offset).copied()
    }

    pub fn peek_nonspace(&self) -> Option<u8> {
        self.text.as_bytes().get(self.next_nonspace).copied()
    }

    pub fn rest(&self) -> &'a str {
        &self.text[self.offset..]
    }

    pub fn rest_from_nonspace(&self) -> &'a str {
        &self.text[self.next_nonspace..]
    }

    /// Quick filter: can the text at the next non-space start any block?
    pub fn maybe_special(&self) -> bool {
        let hint = match self.at_line_start() {
            Some(scanned) => scanned.hint,
            None => LineHint::classify(self.rest_from_nonspace()),
        };
        self.indented || hint.might_open_block()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::parsing::scanner::Scanner;

    #[rstest]
    #[case("foo")]
    #[case("  \tfoo")]
    #[case("      code")]
    #[case(" \t ")]
    #[case("> quote")]
    fn scanned_line_matches_measured_line(#[case] text: &str) {
        let line = Scanner::for_str(text).next().unwrap();
        let mut scanned = LineCursor::for_line(&line);
        let mut measured = LineCursor::new(&line.text);
        scanned.find_next_nonspace();
        measured.find_next_nonspace();
        assert_eq!(scanned.next_nonspace, measured.next_nonspace);
        assert_eq!(scanned.next_nonspace_column, measured.next_nonspace_column);
        assert_eq!(scanned.indent, measured.indent);
        assert_eq!(scanned.indented, measured.indented);
        assert_eq!(scanned.blank, measured.blank);
        assert_eq!(scanned.maybe_special(), measured.maybe_special());
    }

    #[test]
    fn scanned_facts_are_dropped_after_consuming() {
        let line = Scanner::for_str("> foo").next().unwrap();
        let mut ln = LineCursor::for_line(&line);
        ln.find_next_nonspace();
        assert!(ln.maybe_special());
        ln.advance_offset(2, false);
        ln.find_next_nonspace();
        assert_eq!(ln.next_nonspace, 2);
        assert!(!ln.maybe_special());
    }

    #[test]
    fn finds_indent_with_tabs() {
        let mut ln = LineCursor::new("  \tfoo");
        ln.find_next_nonspace();
        assert_eq!(ln.next_nonspace, 3);
        assert_eq!(ln.indent, 4);
        assert!(ln.indented);
        assert!(!ln.blank);
    }

    #[test]
    fn blank_line() {
        let mut ln = LineCursor::new(" \t ");
        ln.find_next_nonspace();
        assert!(ln.blank);
    }

    #[test]
    fn partial_tab_consumption() {
        let mut ln = LineCursor::new("\tfoo");
        ln.advance_offset(2, true);
        assert!(ln.partially_consumed_tab);
        assert_eq!(ln.offset, 0);
        assert_eq!(ln.column, 2);

        ln.advance_offset(2, true);
        assert!(!ln.partially_consumed_tab);
        assert_eq!(ln.offset, 1);
        assert_eq!(ln.column, 4);
    }

    #[test]
    fn character_advance_counts_a_tab_once() {
        let mut ln = LineCursor::new(">\tfoo");
        ln.advance_offset(1, false);
        ln.advance_offset(1, false);
        assert_eq!(ln.offset, 2);
        assert_eq!(ln.column, 4);
    }

    #[test]
    fn advance_stops_at_line_end() {
        let mut ln = LineCursor::new("ab");
        ln.advance_offset(10, true);
        assert_eq!(ln.offset, 2);
        assert_eq!(ln.rest(), "");
    }

    #[test]
    fn advance_steps_over_multibyte_chars() {
        let mut ln = LineCursor::new("éa");
        ln.advance_offset(1, false);
        assert_eq!(ln.rest(), "a");
    }
}
