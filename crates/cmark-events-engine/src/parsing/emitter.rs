//! # Event Emitter
//!
//! Flattens the finished block tree into the public event sequence,
//! running the inline parser over each leaf's text on the way.
//!
//! The walk is depth-first with an explicit stack: a container pushes its
//! End event and then its children, so the End pops after the last child.

use std::collections::HashSet;

use crate::{
    event::{Event, Kind, Tag},
    options::Options,
};

use super::{
    blocks::{BlockKind, BlockTree, NodeId, kinds::CodeFence},
    inline::{InlineNode, LinkTarget, SpanKind, parse_inline},
    refs::{RefTable, normalize_label},
};

enum Step {
    Enter(NodeId),
    Leave(Event),
}

struct Emitter<'a> {
    tree: &'a BlockTree,
    refs: &'a RefTable,
    options: &'a Options,
    events: Vec<Event>,
    /// Normalized labels of footnote definitions already emitted.
    footnotes: HashSet<String>,
}

/// Produces the events for `tree`, resolving links against `refs`.
pub fn emit(tree: &BlockTree, refs: &RefTable, options: &Options) -> Vec<Event> {
    let mut emitter = Emitter {
        tree,
        refs,
        options,
        events: Vec::new(),
        footnotes: HashSet::new(),
    };
    let mut stack: Vec<Step> = children_rev(tree, BlockTree::ROOT).collect();
    while let Some(step) = stack.pop() {
        match step {
            Step::Leave(end) => emitter.events.push(end),
            Step::Enter(id) => {
                if let Some(start) = emitter.enter(id) {
                    stack.push(Step::Leave(start.to_end()));
                    stack.extend(children_rev(tree, id));
                }
            }
        }
    }
    emitter.events
}

fn children_rev(tree: &BlockTree, id: NodeId) -> impl Iterator<Item = Step> + '_ {
    tree.get(id).children.iter().rev().map(|&c| Step::Enter(c))
}

impl Emitter<'_> {
    /// Emits everything for a leaf, or the Start event of a container.
    /// Returns the Start when children follow.
    fn enter(&mut self, id: NodeId) -> Option<Event> {
        let tree = self.tree;
        let node = tree.get(id);
        match &node.kind {
            BlockKind::Document => None,
            BlockKind::BlockQuote => Some(self.open(Event::start(Tag::BlockQuote))),
            BlockKind::List(data) => {
                let mut start = Event::start(Tag::List);
                if data.ordered {
                    start.kind = Kind::Ordered;
                    start.start_number = data.start;
                } else {
                    start.kind = Kind::Unordered;
                }
                Some(self.open(start))
            }
            BlockKind::Item { .. } => Some(self.open(Event::start(Tag::ListItem))),
            // Later definitions of a label are dropped with their content.
            BlockKind::FootnoteDefinition { label } => {
                if !self.footnotes.insert(normalize_label(label)) {
                    return None;
                }
                let start = Event::start(Tag::FootnoteDefinition).with_label(label.as_str());
                Some(self.open(start))
            }
            BlockKind::Paragraph => {
                let task = self.task_of(id);
                if self.in_tight_list(id) {
                    self.task_marker(task);
                    self.inlines(&node.content);
                } else {
                    let start = self.open(Event::start(Tag::Paragraph));
                    self.task_marker(task);
                    self.inlines(&node.content);
                    self.events.push(start.to_end());
                }
                None
            }
            BlockKind::Heading { level, .. } => {
                let start = self.open(Event::start(Tag::Heading).with_level(*level));
                self.inlines(&node.content);
                self.events.push(start.to_end());
                None
            }
            BlockKind::ThematicBreak => {
                self.events.push(Event::atomic(Tag::ThematicBreak));
                None
            }
            BlockKind::CodeBlock { fence, info } => {
                let mut event = Event::atomic(Tag::CodeBlock).with_content(node.content.as_str());
                if fence.is_some() {
                    event.kind = Kind::Fenced;
                    event.fenced = true;
                    event.language = CodeFence::language(info).to_string();
                } else {
                    event.kind = Kind::Indented;
                }
                self.events.push(event);
                None
            }
            BlockKind::HtmlBlock { .. } => {
                self.events
                    .push(Event::atomic(Tag::HtmlBlock).with_content(node.content.as_str()));
                None
            }
            BlockKind::Table {
                alignments,
                header,
                rows,
            } => {
                let table = Event {
                    alignments: alignments.clone(),
                    ..Event::start(Tag::Table)
                };
                let table = self.open(table);
                self.row(Tag::TableHead, header);
                for row in rows {
                    self.row(Tag::TableRow, row);
                }
                self.events.push(table.to_end());
                None
            }
        }
    }

    fn open(&mut self, start: Event) -> Event {
        self.events.push(start.clone());
        start
    }

    fn row(&mut self, tag: Tag, cells: &[String]) {
        let row = self.open(Event::start(tag));
        for cell in cells {
            let start = self.open(Event::start(Tag::TableCell));
            self.inlines(cell);
            self.events.push(start.to_end());
        }
        self.events.push(row.to_end());
    }

    fn in_tight_list(&self, id: NodeId) -> bool {
        let Some(item) = self.tree.parent(id) else {
            return false;
        };
        if !matches!(self.tree.kind(item), BlockKind::Item { .. }) {
            return false;
        }
        self.tree
            .parent(item)
            .is_some_and(|list| matches!(self.tree.kind(list), BlockKind::List(data) if data.tight))
    }

    /// Task state when `id` is the first paragraph of a task item.
    fn task_of(&self, id: NodeId) -> Option<bool> {
        let item = self.tree.parent(id)?;
        match self.tree.kind(item) {
            BlockKind::Item {
                task: Some(checked),
                ..
            } if self.tree.get(item).children.first() == Some(&id) => Some(*checked),
            _ => None,
        }
    }

    fn task_marker(&mut self, task: Option<bool>) {
        if let Some(checked) = task {
            self.events.push(Event {
                checked,
                ..Event::atomic(Tag::TaskListMarker)
            });
        }
    }

    fn inlines(&mut self, text: &str) {
        let nodes = parse_inline(text, self.refs, self.options);
        let mut i = 0;
        while i < nodes.len() {
            match &nodes[i] {
                InlineNode::Open(SpanKind::Image(target)) => {
                    let (alt, close) = image_alt(&nodes, i);
                    let image = with_target(Event::atomic(Tag::Image), target).with_content(alt);
                    self.events.push(image);
                    i = close;
                }
                node => self.inline(node),
            }
            i += 1;
        }
    }

    fn inline(&mut self, node: &InlineNode) {
        let event = match node {
            InlineNode::Text(text) => {
                if text.is_empty() {
                    return;
                }
                if let Some(last) = self.events.last_mut()
                    && last.tag == Tag::Text
                {
                    last.content.push_str(text);
                    return;
                }
                Event::text(text.as_str())
            }
            InlineNode::Code(code) => Event::atomic(Tag::CodeSpan).with_content(code.as_str()),
            InlineNode::Html(html) => Event::atomic(Tag::HtmlInline).with_content(html.as_str()),
            InlineNode::SoftBreak => Event::atomic(Tag::SoftBreak),
            InlineNode::HardBreak => Event::atomic(Tag::HardBreak),
            InlineNode::FootnoteReference(label) => {
                Event::atomic(Tag::FootnoteReference).with_label(label.as_str())
            }
            InlineNode::Open(span) => span_event(span),
            InlineNode::Close(span) => span_event(span).to_end(),
        };
        self.events.push(event);
    }
}

fn span_event(span: &SpanKind) -> Event {
    match span {
        SpanKind::Emphasis => Event::start(Tag::Emphasis),
        SpanKind::Strong => Event::start(Tag::Strong),
        SpanKind::Strikethrough => Event::start(Tag::Strikethrough),
        SpanKind::Link(target) => with_target(Event::start(Tag::Link), target),
        SpanKind::Image(target) => with_target(Event::atomic(Tag::Image), target),
    }
}

fn with_target(mut event: Event, target: &LinkTarget) -> Event {
    event.url = target.url.clone();
    event.title = target.title.clone();
    event.kind = target.kind;
    event.label = target.label.clone();
    event
}

/// Plain-text rendering of an image description, and the index of the
/// image's closing node.
fn image_alt(nodes: &[InlineNode], open: usize) -> (String, usize) {
    let mut alt = String::new();
    let mut depth = 0usize;
    for (j, node) in nodes.iter().enumerate().skip(open + 1) {
        match node {
            InlineNode::Open(_) => depth += 1,
            InlineNode::Close(_) if depth == 0 => return (alt, j),
            InlineNode::Close(_) => depth -= 1,
            InlineNode::Text(s) | InlineNode::Code(s) | InlineNode::Html(s) => alt.push_str(s),
            InlineNode::SoftBreak | InlineNode::HardBreak => alt.push('\n'),
            InlineNode::FootnoteReference(_) => {}
        }
    }
    (alt, nodes.len())
}
