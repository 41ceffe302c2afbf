use crate::parsing::blocks::line::LineCursor;

/// Block quote type with owned marker constant.
pub struct BlockQuote;

impl BlockQuote {
    /// The block quote marker.
    pub const MARKER: u8 = b'>';

    /// Consumes a `>` marker and one optional following space.
    ///
    /// Used both to open a quote and to continue one. Returns false (and
    /// leaves the cursor alone) when the line has no marker at the next
    /// non-space position or is indented as code.
    pub fn consume_marker(ln: &mut LineCursor<'_>) -> bool {
        if ln.indented || ln.peek_nonspace() != Some(Self::MARKER) {
            return false;
        }
        ln.advance_next_nonspace();
        ln.advance_offset(1, false);
        if matches!(ln.peek(), Some(b' ' | b'\t')) {
            ln.advance_offset(1, true);
        }
        true
    }
}
