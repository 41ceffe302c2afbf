/// A byte cursor over a leaf's inline text.
///
/// Positions are byte offsets into `s`. Callers only stop on ASCII bytes or
/// char boundaries found by `char_at`, so slicing at `i` is always valid.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being parsed.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `s`.
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Peeks `n` bytes ahead of the current position.
    pub fn peek_at(&self, n: usize) -> Option<u8> {
        self.s.as_bytes().get(self.i + n).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes()[self.i.min(self.s.len())..].starts_with(pat)
    }

    /// The unconsumed remainder.
    pub fn rest(&self) -> &'a str {
        &self.s[self.i.min(self.s.len())..]
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.s.as_bytes().get(self.i).copied()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Counts and consumes a run of `b`.
    pub fn eat_run(&mut self, b: u8) -> usize {
        let start = self.i;
        while self.peek() == Some(b) {
            self.i += 1;
        }
        self.i - start
    }

    /// Skips spaces and tabs with at most one line ending among them.
    pub fn skip_spnl(&mut self) {
        self.skip_spaces();
        if self.peek() == Some(b'\n') {
            self.i += 1;
            self.skip_spaces();
        }
    }

    /// Skips spaces and tabs, returning how many were skipped.
    pub fn skip_spaces(&mut self) -> usize {
        let start = self.i;
        while matches!(self.peek(), Some(b' ' | b'\t')) {
            self.i += 1;
        }
        self.i - start
    }

    /// The character ending right before byte `at`, or `'\n'` at the start.
    pub fn char_before(&self, at: usize) -> char {
        self.s[..at].chars().next_back().unwrap_or('\n')
    }

    /// The character starting at byte `at`, or `'\n'` past the end.
    pub fn char_at(&self, at: usize) -> char {
        self.s.get(at..).and_then(|r| r.chars().next()).unwrap_or('\n')
    }
}
