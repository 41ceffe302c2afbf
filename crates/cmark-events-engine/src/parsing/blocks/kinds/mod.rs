//! Per-kind block recognizers. Each kind owns its marker constants and the
//! small scans that decide whether a line opens, continues or closes it.

pub mod block_quote;
pub mod code_fence;
pub mod footnote;
pub mod heading;
pub mod html_block;
pub mod indented_code;
pub mod list_item;
pub mod paragraph;
pub mod table;
pub mod thematic_break;

pub use block_quote::BlockQuote;
pub use code_fence::CodeFence;
pub use footnote::FootnoteDefinition;
pub use heading::{AtxHeading, SetextHeading};
pub use html_block::HtmlBlock;
pub use indented_code::IndentedCode;
pub use list_item::ListItem;
pub use paragraph::Paragraph;
pub use table::Table;
pub use thematic_break::ThematicBreak;
