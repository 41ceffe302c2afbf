//! # Parsing Pipeline
//!
//! text → [`scanner`] → [`blocks`] → ([`inline`] per leaf) → [`emitter`]
//! → events.
//!
//! Block structure is built for the whole document first. Inline parsing
//! runs during emission, once every link reference definition is known.

pub mod blocks;
pub mod emitter;
pub mod inline;
pub mod refs;
pub mod scanner;

#[cfg(test)]
mod tests;

use log::debug;

use crate::{Error, event::Event, options::Options};

use blocks::{BlockBuilder, BlockTree};
use refs::RefTable;
use scanner::Scanner;

/// A document after block parsing: the block tree and the labels it
/// defines.
#[derive(Debug)]
pub struct ParsedDoc {
    pub tree: BlockTree,
    pub refs: RefTable,
}

impl ParsedDoc {
    /// Flattens the document into events.
    pub fn events(&self, options: &Options) -> Vec<Event> {
        let events = emitter::emit(&self.tree, &self.refs, options);
        debug!("emitted {} events", events.len());
        events
    }
}

/// Runs block parsing over every line of `scanner`.
pub fn parse_document(scanner: Scanner<'_>, options: &Options) -> Result<ParsedDoc, Error> {
    let mut builder = BlockBuilder::new(options);
    for line in scanner {
        builder.push(&line)?;
    }
    let lines = builder.line_count();
    let (tree, refs) = builder.finish();
    debug!(
        "parsed {lines} lines into {} blocks ({} link definitions)",
        tree.len() - 1,
        refs.link_count()
    );
    Ok(ParsedDoc { tree, refs })
}

/// Validates `input` and produces its event sequence.
pub fn parse_events(input: &[u8], options: &Options) -> Result<Vec<Event>, Error> {
    let scanner = Scanner::new(input)?;
    let doc = parse_document(scanner, options)?;
    Ok(doc.events(options))
}
