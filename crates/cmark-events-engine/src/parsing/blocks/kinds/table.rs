use crate::event::Alignment;

/// Pipe table type (`| a | b |` over a `| --- | :-: |` delimiter row).
pub struct Table;

impl Table {
    pub const PIPE: u8 = b'|';
    pub const DASH: u8 = b'-';
    pub const COLON: u8 = b':';

    /// Parses a delimiter row into per-column alignments.
    ///
    /// Every cell must be `:?-+:?` and the row must contain at least one
    /// pipe, so a lone `---` stays a setext underline or thematic break.
    pub fn delimiter_row(s: &str) -> Option<Vec<Alignment>> {
        let s = s.trim();
        if !s.as_bytes().contains(&Self::PIPE) {
            return None;
        }
        let cells = Self::split_cells(s);
        if cells.is_empty() {
            return None;
        }
        cells.iter().map(|cell| Self::alignment(cell)).collect()
    }

    fn alignment(cell: &str) -> Option<Alignment> {
        let b = cell.as_bytes();
        let left = b.first() == Some(&Self::COLON);
        let right = b.len() > 1 && b.last() == Some(&Self::COLON);
        let dashes = &b[usize::from(left)..b.len() - usize::from(right)];
        if dashes.is_empty() || dashes.iter().any(|&c| c != Self::DASH) {
            return None;
        }
        Some(match (left, right) {
            (true, true) => Alignment::Center,
            (false, true) => Alignment::Right,
            _ => Alignment::Left,
        })
    }

    /// Splits a row into trimmed cell texts.
    ///
    /// Leading and trailing pipes are optional. `\|` is a literal pipe and
    /// does not split; it is unescaped here, while other backslash escapes
    /// are left for inline parsing.
    pub fn split_cells(s: &str) -> Vec<String> {
        let mut s = s.trim();
        if let Some(rest) = s.strip_prefix('|') {
            s = rest;
        }
        if s.ends_with('|') && !s.ends_with("\\|") {
            s = &s[..s.len() - 1];
        }

        let mut cells = Vec::new();
        let mut cell = String::new();
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\\' if chars.peek() == Some(&'|') => {
                    chars.next();
                    cell.push('|');
                }
                '\\' => {
                    cell.push('\\');
                    if let Some(next) = chars.next() {
                        cell.push(next);
                    }
                }
                '|' => cells.push(std::mem::take(&mut cell).trim().to_string()),
                _ => cell.push(c),
            }
        }
        if !cell.is_empty() || !cells.is_empty() || !s.is_empty() {
            cells.push(cell.trim().to_string());
        }
        cells
    }

    /// Pads or truncates `cells` to the header's column count.
    pub fn fit_row(mut cells: Vec<String>, width: usize) -> Vec<String> {
        cells.resize(width, String::new());
        cells
    }
}
