//! # Inline Kinds
//!
//! Inline constructs that own their syntax: each type holds its delimiter
//! constants and the scanner that recognizes it at a given position.
//!
//! ## Types
//!
//! - **`CodeSpan`**: `` ` `` runs; raw zone that suppresses other parsing
//! - **`Entity`**: `&name;`, `&#N;`, `&#xH;` references
//! - **`Autolink`**: `<scheme:...>` and `<user@host>`
//! - **`RawHtml`**: inline tags, comments, declarations, CDATA
//! - **`Link`**: destinations, titles and labels for links and definitions
//!
//! The parser calls these; it never hardcodes `` ` `` or `](`.

pub mod autolink;
pub mod code_span;
pub mod entity;
pub mod link;
pub mod raw_html;

pub use autolink::{Autolink, AutolinkMatch};
pub use code_span::CodeSpan;
pub use entity::Entity;
pub use link::{Link, unescape_string};
pub use raw_html::RawHtml;
