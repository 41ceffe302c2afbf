//! # Inline Parsing
//!
//! Turns the raw text of a leaf block (paragraph, heading, table cell) into
//! resolved inline nodes.
//!
//! ## Architecture
//!
//! Inline parsing runs after block parsing has finished, so every link
//! reference definition in the document is known.
//!
//! 1. **Forward scan**: the `logos` lexer splits the text into plain runs and
//!    special characters. Raw zones (code spans, autolinks, raw HTML) and
//!    entities are recognized on the spot and skipped over. `[` / `![`
//!    push onto the bracket stack; `*`, `_`, `~` runs onto the delimiter
//!    stack.
//! 2. **Links**: on `]` the nearest bracket is matched against an inline
//!    destination or the reference table. Emphasis inside the link text is
//!    resolved before the link closes.
//! 3. **Emphasis**: remaining delimiters are paired once the scan ends.
//!
//! ## Modules
//!
//! - **`lexer`**: `InlineToken`, the context-free token set
//! - **`kinds`**: per-construct delimiters and scanners
//! - **`cursor`**: byte cursor used by the scanners
//! - **`delimiters`**: delimiter stack and emphasis resolution
//! - **`parser`**: `parse_inline()` and the bracket stack
//! - **`types`**: resolved `InlineNode`s
//!
//! ## Raw Zone Precedence
//!
//! Code spans bind tighter than everything else: `` `*a*` `` is a code span
//! containing `*a*`, never emphasis.

pub mod cursor;
pub mod delimiters;
pub mod kinds;
pub mod lexer;
pub mod parser;
pub mod types;

pub use parser::parse_inline;
pub use types::{InlineNode, LinkTarget, SpanKind};
