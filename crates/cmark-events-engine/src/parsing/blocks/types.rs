use crate::event::Alignment;

/// Index of a node in a [`BlockTree`].
pub type NodeId = usize;

/// Lifecycle of a block while lines are being consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    /// Accepting lines.
    Open,
    /// Not matched by the current line; closes unless the line turns out
    /// to be a lazy paragraph continuation.
    AwaitingContinuation,
    Closed,
}

/// Marker data shared by a list and its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListData {
    pub ordered: bool,
    /// `-`, `+`, `*` for bullet lists; `.` or `)` for ordered lists.
    pub marker: u8,
    pub start: u64,
    /// Columns of indentation before the marker.
    pub marker_offset: usize,
    /// Marker width plus the spaces after it; continuation lines must be
    /// indented `marker_offset + padding` columns.
    pub padding: usize,
    pub tight: bool,
}

impl ListData {
    /// Items belong to the same list when their markers are the same kind.
    pub fn same_list(&self, other: &ListData) -> bool {
        self.ordered == other.ordered && self.marker == other.marker
    }
}

/// Opening fence of a fenced code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence {
    pub ch: u8,
    pub len: usize,
    /// Indentation of the opening fence, removed from content lines.
    pub offset: usize,
}

/// Kind-specific data of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Document,
    BlockQuote,
    List(ListData),
    Item {
        list: ListData,
        /// Task-list state once detected: `Some(checked)`.
        task: Option<bool>,
    },
    Paragraph,
    Heading {
        level: u8,
        setext: bool,
    },
    ThematicBreak,
    CodeBlock {
        fence: Option<Fence>,
        /// Info string of a fenced block, unescaped.
        info: String,
    },
    HtmlBlock {
        /// Start condition 1..=7; decides how the block ends.
        condition: u8,
    },
    Table {
        alignments: Vec<Alignment>,
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    FootnoteDefinition {
        label: String,
    },
}

impl BlockKind {
    /// Whether a block of this kind may hold `child` directly.
    pub fn can_contain(&self, child: &BlockKind) -> bool {
        match self {
            BlockKind::Document
            | BlockKind::BlockQuote
            | BlockKind::Item { .. }
            | BlockKind::FootnoteDefinition { .. } => !matches!(child, BlockKind::Item { .. }),
            BlockKind::List(_) => matches!(child, BlockKind::Item { .. }),
            _ => false,
        }
    }

    /// Leaves whose remaining line text is appended to their content.
    pub fn accepts_lines(&self) -> bool {
        matches!(
            self,
            BlockKind::Paragraph
                | BlockKind::CodeBlock { .. }
                | BlockKind::HtmlBlock { .. }
                | BlockKind::Table { .. }
        )
    }

    pub fn is_paragraph(&self) -> bool {
        matches!(self, BlockKind::Paragraph)
    }

    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Document => "document",
            BlockKind::BlockQuote => "block_quote",
            BlockKind::List(_) => "list",
            BlockKind::Item { .. } => "item",
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading { .. } => "heading",
            BlockKind::ThematicBreak => "thematic_break",
            BlockKind::CodeBlock { .. } => "code_block",
            BlockKind::HtmlBlock { .. } => "html_block",
            BlockKind::Table { .. } => "table",
            BlockKind::FootnoteDefinition { .. } => "footnote_definition",
        }
    }
}

/// A node of the block tree.
#[derive(Debug, Clone)]
pub struct BlockNode {
    pub kind: BlockKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Raw text accumulated for leaves, one `\n`-terminated line at a time.
    pub content: String,
    /// 1-based line where the block starts.
    pub start_line: usize,
    /// 1-based line where the block ends; set when it closes.
    pub end_line: usize,
    pub last_line_blank: bool,
    pub state: BlockState,
    /// Nesting depth; the document is 0.
    pub depth: usize,
}

/// Arena of block nodes; node 0 is the document.
#[derive(Debug, Clone)]
pub struct BlockTree {
    nodes: Vec<BlockNode>,
}

impl BlockTree {
    pub const ROOT: NodeId = 0;

    pub fn new() -> Self {
        Self {
            nodes: vec![BlockNode {
                kind: BlockKind::Document,
                parent: None,
                children: Vec::new(),
                content: String::new(),
                start_line: 1,
                end_line: 0,
                last_line_blank: false,
                state: BlockState::Open,
                depth: 0,
            }],
        }
    }

    pub fn get(&self, id: NodeId) -> &BlockNode {
        &self.nodes[id]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut BlockNode {
        &mut self.nodes[id]
    }

    pub fn kind(&self, id: NodeId) -> &BlockKind {
        &self.nodes[id].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].children.last().copied()
    }

    /// The last child of `id` if it has not been closed yet.
    pub fn open_last_child(&self, id: NodeId) -> Option<NodeId> {
        self.last_child(id)
            .filter(|&c| self.nodes[c].state != BlockState::Closed)
    }

    /// Appends a new open node under `parent`.
    pub fn append(&mut self, parent: NodeId, kind: BlockKind, line: usize) -> NodeId {
        let id = self.nodes.len();
        let depth = self.nodes[parent].depth + 1;
        self.nodes.push(BlockNode {
            kind,
            parent: Some(parent),
            children: Vec::new(),
            content: String::new(),
            start_line: line,
            end_line: line,
            last_line_blank: false,
            state: BlockState::Open,
            depth,
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Unlinks `id` from its parent. The slot stays in the arena.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id].parent.take() {
            self.nodes[parent].children.retain(|&c| c != id);
        }
    }

    /// Number of nodes reachable from the root.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![Self::ROOT];
        while let Some(id) = stack.pop() {
            count += 1;
            stack.extend(self.nodes[id].children.iter().copied());
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[Self::ROOT].children.is_empty()
    }
}

impl Default for BlockTree {
    fn default() -> Self {
        Self::new()
    }
}
