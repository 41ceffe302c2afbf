//! # cmark-events-engine
//!
//! A CommonMark engine that turns markdown into a flat sequence of typed
//! structural [`Event`]s and renders those events as HTML.
//!
//! ```
//! let html = cmark_events_engine::render_html("# Hi *there*").unwrap();
//! assert_eq!(html, "<h1>Hi <em>there</em></h1>\n");
//! ```
//!
//! Supported extensions (all on by default, see [`Options`]): pipe tables,
//! footnotes, strikethrough and task-list items.

pub mod error;
pub mod event;
pub mod html;
pub mod options;
pub mod parsing;

pub use error::Error;
pub use event::{Alignment, Event, EventType, Kind, Tag};
pub use options::Options;

/// Parses markdown into events with every extension enabled.
pub fn parse(input: impl AsRef<[u8]>) -> Result<Vec<Event>, Error> {
    parse_with_options(input, &Options::default())
}

pub fn parse_with_options(input: impl AsRef<[u8]>, options: &Options) -> Result<Vec<Event>, Error> {
    parsing::parse_events(input.as_ref(), options)
}

/// Parses markdown and renders it as HTML.
pub fn render_html(input: impl AsRef<[u8]>) -> Result<String, Error> {
    render_html_with_options(input, &Options::default())
}

pub fn render_html_with_options(
    input: impl AsRef<[u8]>,
    options: &Options,
) -> Result<String, Error> {
    let events = parse_with_options(input, options)?;
    let mut out = String::new();
    html::push_html(&mut out, &events)?;
    Ok(out)
}
