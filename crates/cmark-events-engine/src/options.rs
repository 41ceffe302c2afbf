use serde::{Deserialize, Serialize};

/// Parser switches for the fixed extension set and the nesting guard.
///
/// Every extension is on by default. Missing fields in a deserialized
/// document fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// GFM pipe tables.
    pub tables: bool,
    /// `[^label]` references and `[^label]:` definitions.
    pub footnotes: bool,
    /// `~text~` and `~~text~~`.
    pub strikethrough: bool,
    /// `[ ]` / `[x]` at the start of list items.
    pub tasklists: bool,
    /// Deepest allowed block nesting (block quotes, lists, items, footnotes).
    pub max_nesting: usize,
}

impl Options {
    pub const DEFAULT_MAX_NESTING: usize = 128;

    /// Plain CommonMark: no extensions.
    pub fn commonmark() -> Self {
        Self {
            tables: false,
            footnotes: false,
            strikethrough: false,
            tasklists: false,
            ..Self::default()
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            tasklists: true,
            max_nesting: Self::DEFAULT_MAX_NESTING,
        }
    }
}
