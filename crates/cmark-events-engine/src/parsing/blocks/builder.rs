use log::{trace, warn};

use crate::{
    Error,
    options::Options,
    parsing::{
        refs::RefTable,
        scanner::{Line, TAB_STOP},
    },
};

use super::{
    kinds::{BlockQuote, CodeFence, HtmlBlock, IndentedCode, ListItem, Paragraph, Table},
    line::{CODE_INDENT, LineCursor},
    open::{BlockOpen, OpenContext, header_line, try_open},
    types::{BlockKind, BlockState, BlockTree, ListData, NodeId},
};

/// Outcome of testing an open block against a new line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Continuation {
    Matched,
    Unmatched,
    /// The line closed the block and nothing else is left to do with it.
    Consumed,
}

/// Builds the block tree one line at a time.
///
/// Each line first walks the open containers from the root inward, then
/// tries new block starts on what remains, then adds the rest of the line
/// as text to the innermost block that takes it.
pub struct BlockBuilder<'o> {
    tree: BlockTree,
    refs: RefTable,
    options: &'o Options,
    /// Innermost open block.
    tip: NodeId,
    /// `tip` before the current line was processed.
    old_tip: NodeId,
    /// Deepest block matched by the current line.
    last_matched: NodeId,
    /// No unmatched blocks are waiting to be closed.
    all_closed: bool,
    line_number: usize,
}

impl<'o> BlockBuilder<'o> {
    pub fn new(options: &'o Options) -> Self {
        Self {
            tree: BlockTree::new(),
            refs: RefTable::new(),
            options,
            tip: BlockTree::ROOT,
            old_tip: BlockTree::ROOT,
            last_matched: BlockTree::ROOT,
            all_closed: true,
            line_number: 0,
        }
    }

    /// Incorporates the next scanned line.
    pub fn push(&mut self, line: &Line<'_>) -> Result<(), Error> {
        self.line_number = line.number;
        self.old_tip = self.tip;
        let mut ln = LineCursor::for_line(line);

        let mut container = BlockTree::ROOT;
        while let Some(child) = self.tree.open_last_child(container) {
            container = child;
            ln.find_next_nonspace();
            match self.continues(container, &mut ln) {
                Continuation::Matched => {}
                Continuation::Unmatched => {
                    container = self.tree.parent(container).unwrap_or(BlockTree::ROOT);
                    break;
                }
                Continuation::Consumed => {
                    self.finalize(container, self.line_number);
                    return Ok(());
                }
            }
        }

        self.all_closed = container == self.old_tip;
        self.last_matched = container;
        self.mark_unmatched();

        let mut matched_leaf = {
            let kind = self.tree.kind(container);
            kind.accepts_lines()
                && !kind.is_paragraph()
                && !matches!(kind, BlockKind::Table { .. })
        };
        while !matched_leaf {
            ln.find_next_nonspace();
            if !ln.maybe_special() {
                ln.advance_next_nonspace();
                break;
            }
            let tip_kind = self.tree.kind(self.tip);
            let ctx = OpenContext {
                paragraph: self
                    .tree
                    .kind(container)
                    .is_paragraph()
                    .then(|| self.tree.get(container).content.as_str()),
                lazy_paragraph: !self.all_closed && tip_kind.is_paragraph(),
                tip_takes_text: tip_kind.is_paragraph()
                    || matches!(tip_kind, BlockKind::Table { .. }),
                options: self.options,
            };
            let Some(opened) = try_open(&mut ln, &ctx) else {
                ln.advance_next_nonspace();
                break;
            };
            matched_leaf = !opened.is_container();
            container = self.open_block(container, opened)?;
        }

        let blank = ln.blank;
        self.track_blank_lines(container, blank);

        if !self.all_closed && !blank && self.tree.kind(self.tip).is_paragraph() {
            // Lazy continuation: the unmatched blocks stay open.
            self.restore_unmatched();
            self.add_line(&ln);
            return Ok(());
        }

        self.close_unmatched();
        match self.tree.kind(container).clone() {
            BlockKind::Table { .. } => {
                if !ln.rest().trim().is_empty() {
                    self.add_line(&ln);
                }
            }
            BlockKind::HtmlBlock { condition } => {
                self.add_line(&ln);
                if HtmlBlock::ends(condition, ln.rest()) {
                    self.finalize(container, self.line_number);
                }
            }
            kind if kind.accepts_lines() => self.add_line(&ln),
            _ if !blank && ln.offset < ln.text.len() => {
                self.add_child(BlockKind::Paragraph)?;
                ln.advance_next_nonspace();
                self.add_line(&ln);
            }
            _ => {}
        }
        Ok(())
    }

    /// Closes every open block and returns the finished tree with the
    /// collected reference definitions.
    pub fn finish(mut self) -> (BlockTree, RefTable) {
        loop {
            let tip = self.tip;
            self.finalize(tip, self.line_number);
            if tip == BlockTree::ROOT {
                break;
            }
        }
        (self.tree, self.refs)
    }

    pub fn line_count(&self) -> usize {
        self.line_number
    }

    fn continues(&self, id: NodeId, ln: &mut LineCursor<'_>) -> Continuation {
        let node = self.tree.get(id);
        match &node.kind {
            BlockKind::Document | BlockKind::List(_) => Continuation::Matched,
            BlockKind::BlockQuote => {
                if BlockQuote::consume_marker(ln) {
                    Continuation::Matched
                } else {
                    Continuation::Unmatched
                }
            }
            BlockKind::Item { list, .. } => {
                let width = list.marker_offset + list.padding;
                if ln.blank {
                    if node.children.is_empty() {
                        return Continuation::Unmatched;
                    }
                    ln.advance_next_nonspace();
                } else if ln.indent >= width {
                    ln.advance_offset(width, true);
                } else {
                    return Continuation::Unmatched;
                }
                Continuation::Matched
            }
            BlockKind::CodeBlock {
                fence: Some(fence), ..
            } => {
                let fence = *fence;
                if ln.indent < CODE_INDENT
                    && ln.peek_nonspace() == Some(fence.ch)
                    && CodeFence::closes(ln.rest_from_nonspace(), fence.ch, fence.len)
                {
                    return Continuation::Consumed;
                }
                let mut skip = fence.offset;
                while skip > 0 && matches!(ln.peek(), Some(b' ' | b'\t')) {
                    ln.advance_offset(1, true);
                    skip -= 1;
                }
                Continuation::Matched
            }
            BlockKind::CodeBlock { fence: None, .. } => {
                if ln.indent >= CODE_INDENT {
                    ln.advance_offset(CODE_INDENT, true);
                } else if ln.blank {
                    ln.advance_next_nonspace();
                } else {
                    return Continuation::Unmatched;
                }
                Continuation::Matched
            }
            BlockKind::HtmlBlock { condition } => {
                if ln.blank && HtmlBlock::ends_at_blank(*condition) {
                    Continuation::Unmatched
                } else {
                    Continuation::Matched
                }
            }
            BlockKind::Paragraph | BlockKind::Table { .. } => {
                if ln.blank {
                    Continuation::Unmatched
                } else {
                    Continuation::Matched
                }
            }
            BlockKind::Heading { .. } | BlockKind::ThematicBreak => Continuation::Unmatched,
            BlockKind::FootnoteDefinition { .. } => {
                if ln.blank {
                    ln.advance_next_nonspace();
                } else if ln.indent >= CODE_INDENT {
                    ln.advance_offset(CODE_INDENT, true);
                } else {
                    return Continuation::Unmatched;
                }
                Continuation::Matched
            }
        }
    }

    /// Applies a recognized block start and returns the new container.
    fn open_block(&mut self, container: NodeId, opened: BlockOpen) -> Result<NodeId, Error> {
        self.close_unmatched();
        let id = match opened {
            BlockOpen::BlockQuote => self.add_child(BlockKind::BlockQuote)?,
            BlockOpen::AtxHeading { level, text } => {
                let id = self.add_child(BlockKind::Heading {
                    level,
                    setext: false,
                })?;
                self.tree.get_mut(id).content = text;
                id
            }
            BlockOpen::FencedCode(fence) => self.add_child(BlockKind::CodeBlock {
                fence: Some(fence),
                info: String::new(),
            })?,
            BlockOpen::HtmlBlock { condition } => {
                self.add_child(BlockKind::HtmlBlock { condition })?
            }
            BlockOpen::SetextHeading { level } => {
                let node = self.tree.get_mut(container);
                Paragraph::peel_definitions(&mut node.content, &mut self.refs);
                node.kind = BlockKind::Heading {
                    level,
                    setext: true,
                };
                trace!("paragraph became setext heading at line {}", self.line_number);
                container
            }
            BlockOpen::ThematicBreak => self.add_child(BlockKind::ThematicBreak)?,
            BlockOpen::FootnoteDefinition { label } => {
                self.refs.insert_footnote(&label);
                self.add_child(BlockKind::FootnoteDefinition { label })?
            }
            BlockOpen::ListItem(data) => {
                let continues_list = matches!(
                    self.tree.kind(self.tip),
                    BlockKind::List(list) if list.same_list(&data)
                );
                if !continues_list {
                    self.add_child(BlockKind::List(data))?;
                }
                self.add_child(BlockKind::Item {
                    list: data,
                    task: None,
                })?
            }
            BlockOpen::IndentedCode => self.add_child(BlockKind::CodeBlock {
                fence: None,
                info: String::new(),
            })?,
            BlockOpen::Table { alignments } => {
                let paragraph = &mut self.tree.get_mut(container).content;
                let header = header_line(paragraph).unwrap_or_default().to_string();
                let keep = paragraph
                    .trim_end_matches('\n')
                    .len()
                    .saturating_sub(header.len());
                paragraph.truncate(keep);
                let header = Table::split_cells(&header);
                let id = self.add_child(BlockKind::Table {
                    alignments,
                    header,
                    rows: Vec::new(),
                })?;
                self.tree.get_mut(id).start_line = self.line_number.saturating_sub(1);
                id
            }
        };
        Ok(id)
    }

    /// Appends a block under the tip, closing blocks that cannot hold it.
    fn add_child(&mut self, kind: BlockKind) -> Result<NodeId, Error> {
        while !self.tree.kind(self.tip).can_contain(&kind) {
            self.finalize(self.tip, self.line_number.saturating_sub(1));
        }
        let depth = self.tree.get(self.tip).depth + 1;
        if depth > self.options.max_nesting {
            warn!(
                "nesting limit {} exceeded at line {}",
                self.options.max_nesting, self.line_number
            );
            return Err(Error::NestingLimitExceeded {
                limit: self.options.max_nesting,
            });
        }
        trace!("open {} at line {}", kind.name(), self.line_number);
        let id = self.tree.append(self.tip, kind, self.line_number);
        self.tip = id;
        Ok(id)
    }

    fn add_line(&mut self, ln: &LineCursor<'_>) {
        let mut offset = ln.offset;
        let node = self.tree.get_mut(self.tip);
        if ln.partially_consumed_tab {
            offset += 1;
            let to_tab = TAB_STOP - ln.column % TAB_STOP;
            node.content.extend(std::iter::repeat_n(' ', to_tab));
        }
        node.content.push_str(&ln.text[offset..]);
        node.content.push('\n');
    }

    /// Flags the blocks between the old tip and the last matched container.
    fn mark_unmatched(&mut self) {
        let mut id = self.old_tip;
        while id != self.last_matched {
            self.tree.get_mut(id).state = BlockState::AwaitingContinuation;
            match self.tree.parent(id) {
                Some(parent) => id = parent,
                None => break,
            }
        }
    }

    fn restore_unmatched(&mut self) {
        let mut id = self.old_tip;
        while id != self.last_matched {
            self.tree.get_mut(id).state = BlockState::Open;
            match self.tree.parent(id) {
                Some(parent) => id = parent,
                None => break,
            }
        }
    }

    fn close_unmatched(&mut self) {
        if self.all_closed {
            return;
        }
        while self.old_tip != self.last_matched {
            let Some(parent) = self.tree.parent(self.old_tip) else {
                break;
            };
            self.finalize(self.old_tip, self.line_number.saturating_sub(1));
            self.old_tip = parent;
        }
        self.all_closed = true;
    }

    /// Blank-line bookkeeping used to decide list tightness.
    fn track_blank_lines(&mut self, container: NodeId, blank: bool) {
        if blank && let Some(last) = self.tree.last_child(container) {
            self.tree.get_mut(last).last_line_blank = true;
        }
        let node = self.tree.get(container);
        let keeps_blank = match &node.kind {
            BlockKind::BlockQuote | BlockKind::Heading { .. } | BlockKind::ThematicBreak => false,
            BlockKind::CodeBlock { fence, .. } => fence.is_none(),
            BlockKind::Item { .. } => {
                !(node.children.is_empty() && node.start_line == self.line_number)
            }
            _ => true,
        };
        self.tree.get_mut(container).last_line_blank = blank && keeps_blank;
        let mut id = container;
        while let Some(parent) = self.tree.parent(id) {
            self.tree.get_mut(parent).last_line_blank = false;
            id = parent;
        }
    }

    fn finalize(&mut self, id: NodeId, line: usize) {
        let parent = self.tree.parent(id);
        {
            let node = self.tree.get_mut(id);
            node.state = BlockState::Closed;
            node.end_line = line.max(node.start_line);
        }
        trace!("close {} at line {}", self.tree.kind(id).name(), line);

        match self.tree.kind(id).clone() {
            BlockKind::Paragraph => {
                let node = self.tree.get_mut(id);
                Paragraph::peel_definitions(&mut node.content, &mut self.refs);
                if node.content.trim().is_empty() {
                    self.tree.detach(id);
                }
            }
            BlockKind::CodeBlock { fence: Some(fence), .. } => {
                let node = self.tree.get_mut(id);
                let (info, literal) = CodeFence::split_content(&node.content);
                node.content = literal;
                node.kind = BlockKind::CodeBlock {
                    fence: Some(fence),
                    info,
                };
            }
            BlockKind::CodeBlock { fence: None, .. } => {
                let node = self.tree.get_mut(id);
                node.content = IndentedCode::literal(&node.content);
            }
            BlockKind::HtmlBlock { .. } => {
                let node = self.tree.get_mut(id);
                node.content = HtmlBlock::literal(&node.content);
            }
            BlockKind::List(mut data) => {
                data.tight = self.is_tight(id);
                self.tree.get_mut(id).kind = BlockKind::List(data);
            }
            BlockKind::Item { list, task: None } if self.options.tasklists => {
                self.detect_task(id, list);
            }
            BlockKind::Table {
                alignments, header, ..
            } => {
                let node = self.tree.get_mut(id);
                let rows = node
                    .content
                    .lines()
                    .map(|row| Table::fit_row(Table::split_cells(row), header.len()))
                    .collect();
                node.content.clear();
                node.kind = BlockKind::Table {
                    alignments,
                    header,
                    rows,
                };
            }
            _ => {}
        }

        if let Some(parent) = parent {
            self.tip = parent;
        }
    }

    /// A list is loose when an item is followed by a sibling after a blank
    /// line, or when blank lines separate an item's children.
    fn is_tight(&self, list: NodeId) -> bool {
        let items = &self.tree.get(list).children;
        for (i, &item) in items.iter().enumerate() {
            let has_next_item = i + 1 < items.len();
            if self.tree.get(item).last_line_blank && has_next_item {
                return false;
            }
            let children = &self.tree.get(item).children;
            for (j, &child) in children.iter().enumerate() {
                let has_next = has_next_item || j + 1 < children.len();
                if has_next && self.ends_with_blank_line(child) {
                    return false;
                }
            }
        }
        true
    }

    fn ends_with_blank_line(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(id) = current {
            let node = self.tree.get(id);
            if node.last_line_blank {
                return true;
            }
            current = match node.kind {
                BlockKind::List(_) | BlockKind::Item { .. } => self.tree.last_child(id),
                _ => None,
            };
        }
        false
    }

    fn detect_task(&mut self, item: NodeId, list: ListData) {
        let Some(&first) = self.tree.get(item).children.first() else {
            return;
        };
        if !self.tree.kind(first).is_paragraph() {
            return;
        }
        let Some((checked, len)) = ListItem::task_marker(&self.tree.get(first).content) else {
            return;
        };
        self.tree.get_mut(first).content.drain(..len);
        self.tree.get_mut(item).kind = BlockKind::Item {
            list,
            task: Some(checked),
        };
    }
}
