use crate::event::Kind;

/// Where a link or image points.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkTarget {
    pub url: String,
    pub title: String,
    pub kind: Kind,
    /// Reference label as written, for reference-style links.
    pub label: String,
}

/// An inline container opened by [`InlineNode::Open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanKind {
    Emphasis,
    Strong,
    Strikethrough,
    Link(LinkTarget),
    Image(LinkTarget),
}

/// One resolved inline item. Containers are flat `Open`/`Close` pairs,
/// properly nested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    /// Literal text, escapes and entities already resolved.
    Text(String),
    /// Code span content after normalization.
    Code(String),
    /// Raw inline HTML, verbatim.
    Html(String),
    SoftBreak,
    HardBreak,
    /// `[^label]` with the label as it was defined.
    FootnoteReference(String),
    Open(SpanKind),
    Close(SpanKind),
}
