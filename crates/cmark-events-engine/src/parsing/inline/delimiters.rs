//! # Delimiter Runs
//!
//! Emphasis, strong emphasis and strikethrough are resolved after the
//! forward scan. Each run of `*`, `_` or `~` is pushed as an [`Item::Delim`]
//! with a matching [`Delimiter`] entry on a plain `Vec` stack. The matching
//! pass walks closers left to right and looks back for the nearest
//! compatible opener; a matched pair records the span on both runs instead
//! of rearranging the item buffer.
//!
//! A run that is both opener and closer uses its left characters to close
//! and its right characters to open, so a resolved run flattens to
//! `closes`, leftover literal characters, then `opens` (innermost last).

use std::collections::HashMap;

use super::types::{InlineNode, SpanKind};

/// A slot in the inline buffer.
#[derive(Debug, Clone)]
pub enum Item {
    Node(InlineNode),
    Delim(DelimRun),
}

/// A run of delimiter characters and the spans it ended up opening/closing.
#[derive(Debug, Clone)]
pub struct DelimRun {
    pub ch: u8,
    /// Characters not consumed by a match; rendered as literal text.
    pub remaining: usize,
    /// Spans opened by this run, in match order (innermost first).
    pub opens: Vec<SpanKind>,
    /// Spans closed by this run, in match order (innermost first).
    pub closes: Vec<SpanKind>,
}

impl DelimRun {
    pub fn new(ch: u8, len: usize) -> Self {
        Self {
            ch,
            remaining: len,
            opens: Vec::new(),
            closes: Vec::new(),
        }
    }
}

/// Stack entry pointing at an [`Item::Delim`].
#[derive(Debug, Clone, Copy)]
pub struct Delimiter {
    pub item: usize,
    pub ch: u8,
    /// Run length as scanned.
    pub orig: usize,
    pub can_open: bool,
    pub can_close: bool,
    pub active: bool,
}

impl Delimiter {
    /// Closers sharing a key share a search floor: once a search fails,
    /// later closers with the same key skip everything below it.
    fn floor_key(&self) -> (u8, bool, usize) {
        if self.ch == b'~' {
            (self.ch, false, self.orig)
        } else {
            (self.ch, self.can_open, self.orig % 3)
        }
    }

    /// Whether `self` (an opener) may pair with `closer`.
    fn pairs_with(&self, closer: &Delimiter) -> bool {
        if self.ch != closer.ch {
            return false;
        }
        if self.ch == b'~' {
            return self.orig == closer.orig;
        }
        // A run that can both open and close only pairs when the lengths
        // are not a multiple of 3 in total, unless both are.
        let odd_match = (closer.can_open || self.can_close)
            && closer.orig % 3 != 0
            && (self.orig + closer.orig) % 3 == 0;
        !odd_match
    }
}

fn run(items: &mut [Item], idx: usize) -> Option<&mut DelimRun> {
    match items.get_mut(idx) {
        Some(Item::Delim(run)) => Some(run),
        _ => None,
    }
}

fn remaining(items: &[Item], idx: usize) -> usize {
    match items.get(idx) {
        Some(Item::Delim(run)) => run.remaining,
        _ => 0,
    }
}

/// Resolves every delimiter above `bottom`, then drops them from the stack.
pub fn process_emphasis(items: &mut [Item], delims: &mut Vec<Delimiter>, bottom: usize) {
    let mut floors: HashMap<(u8, bool, usize), usize> = HashMap::new();
    let mut ci = bottom;

    while ci < delims.len() {
        let closer = delims[ci];
        let closer_left = remaining(items, closer.item);
        if !closer.active || !closer.can_close || closer_left == 0 {
            ci += 1;
            continue;
        }

        let key = closer.floor_key();
        let floor = floors.get(&key).copied().unwrap_or(bottom).max(bottom);
        let opener = (floor..ci).rev().find(|&oi| {
            let o = &delims[oi];
            o.active && o.can_open && remaining(items, o.item) > 0 && o.pairs_with(&closer)
        });

        let Some(oi) = opener else {
            floors.insert(key, ci);
            if !closer.can_open {
                delims[ci].active = false;
            }
            ci += 1;
            continue;
        };

        let opener_left = remaining(items, delims[oi].item);
        let (used, kind) = if closer.ch == b'~' {
            (closer_left, SpanKind::Strikethrough)
        } else if opener_left >= 2 && closer_left >= 2 {
            (2, SpanKind::Strong)
        } else {
            (1, SpanKind::Emphasis)
        };

        if let Some(o) = run(items, delims[oi].item) {
            o.remaining -= used;
            o.opens.push(kind.clone());
        }
        if let Some(c) = run(items, closer.item) {
            c.remaining -= used;
            c.closes.push(kind);
        }

        for between in &mut delims[oi + 1..ci] {
            between.active = false;
        }
        if opener_left == used {
            delims[oi].active = false;
        }
        if closer_left == used {
            delims[ci].active = false;
            ci += 1;
        }
    }

    delims.truncate(bottom);
}

/// Turns the item buffer into resolved nodes.
pub fn flatten(items: Vec<Item>) -> Vec<InlineNode> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Item::Node(node) => out.push(node),
            Item::Delim(run) => {
                out.extend(run.closes.into_iter().map(InlineNode::Close));
                if run.remaining > 0 {
                    out.push(InlineNode::Text(
                        char::from(run.ch).to_string().repeat(run.remaining),
                    ));
                }
                out.extend(run.opens.into_iter().rev().map(InlineNode::Open));
            }
        }
    }
    out
}
