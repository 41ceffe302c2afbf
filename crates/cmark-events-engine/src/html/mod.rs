//! # HTML Rendering
//!
//! Turns an event sequence into HTML in the CommonMark reference output
//! format: block elements each end a line, inline content is written as-is.
//!
//! ## Modules
//!
//! - **`render`**: `HtmlWriter`, the event-driven writer and its tag stack
//! - **`escape`**: text escaping and URL percent-encoding
//!
//! Raw HTML events pass through verbatim. Text, attribute values and URLs
//! are always escaped.

mod escape;
mod render;

use crate::{Error, event::Event};

use render::HtmlWriter;

/// Appends the HTML for `events` to `out`.
///
/// The events must be balanced: every Start closed by a matching End, leaf
/// tags only as Atomic events. Streams produced by the parser always are;
/// anything else yields [`Error::UnbalancedEvents`] and `out` may hold a
/// partial rendering.
pub fn push_html(out: &mut String, events: &[Event]) -> Result<(), Error> {
    HtmlWriter::new(out).run(events)
}
