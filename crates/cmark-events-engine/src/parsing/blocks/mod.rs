//! # Block Parsing
//!
//! Line-by-line construction of the block tree, following the CommonMark
//! two-phase model: block structure first, inline content later.
//!
//! ## Per-line Algorithm
//!
//! 1. **Continuation**: walk the open blocks from the document inward and
//!    test each one's continuation rule against the line. The first failure
//!    leaves the rest unmatched.
//! 2. **Block starts** (`open`): on what remains of the line, try the
//!    block starts in precedence order. Unmatched blocks are closed as soon
//!    as a new block opens.
//! 3. **Text**: the rest of the line lazily continues an unmatched
//!    paragraph, goes to an open leaf that takes text, or opens a new
//!    paragraph.
//!
//! ## Modules
//!
//! - **`types`**: `BlockTree` arena, `BlockKind`, `BlockNode`
//! - **`line`**: `LineCursor`, tab-aware position within one line
//! - **`kinds`**: per-kind marker constants and scans
//! - **`open`**: `try_open` block start dispatch
//! - **`builder`**: `BlockBuilder`, the per-line state machine
//!
//! ## Key Invariants
//!
//! - The tree is an index-addressed arena; no step recurses over depth.
//! - Nesting is bounded by `Options::max_nesting`.
//! - Leaf text is raw; inline parsing waits until every reference
//!   definition in the document is known.

pub mod builder;
pub mod kinds;
pub mod line;
pub mod open;
pub mod types;

pub use builder::BlockBuilder;
pub use types::{BlockKind, BlockNode, BlockState, BlockTree, Fence, ListData, NodeId};
