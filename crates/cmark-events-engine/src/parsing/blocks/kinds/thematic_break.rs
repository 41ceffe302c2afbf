/// Thematic break (`***`, `---`, `___`).
pub struct ThematicBreak;

impl ThematicBreak {
    pub const MARKERS: [u8; 3] = [b'*', b'-', b'_'];
    pub const MIN_COUNT: usize = 3;

    /// Three or more of the same marker, optionally separated by spaces or
    /// tabs, and nothing else.
    pub fn matches(s: &str) -> bool {
        let Some(&ch) = s.as_bytes().first() else {
            return false;
        };
        if !Self::MARKERS.contains(&ch) {
            return false;
        }
        let mut count = 0;
        for b in s.bytes() {
            match b {
                b' ' | b'\t' => {}
                b if b == ch => count += 1,
                _ => return false,
            }
        }
        count >= Self::MIN_COUNT
    }
}
