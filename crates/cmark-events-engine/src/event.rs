//! # Events
//!
//! The flat, ordered output of the parser. Every event has the same set of
//! fields; fields that do not apply to a tag keep their empty value so a
//! consumer can rely on a fixed schema.
//!
//! ```text
//! # Hi *there*
//!
//! Start(Heading level=1)
//!   Text("Hi ")
//!   Start(Emphasis)
//!     Text("there")
//!   End(Emphasis)
//! End(Heading level=1)
//! ```
//!
//! Start/End pairs are always balanced and properly nested. End events
//! repeat the attributes of their Start (without `content`).

use serde::Serialize;

/// Position of an event in the Start/End nesting protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Start,
    End,
    #[default]
    Atomic,
}

/// The closed set of node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tag {
    Paragraph,
    Heading,
    List,
    ListItem,
    BlockQuote,
    CodeBlock,
    ThematicBreak,
    Table,
    TableHead,
    TableRow,
    TableCell,
    Emphasis,
    Strong,
    Link,
    Image,
    Strikethrough,
    CodeSpan,
    #[default]
    Text,
    SoftBreak,
    HardBreak,
    HtmlBlock,
    HtmlInline,
    TaskListMarker,
    FootnoteReference,
    FootnoteDefinition,
}

impl Tag {
    /// Tags that only ever appear as [`EventType::Atomic`].
    pub fn is_atomic(self) -> bool {
        matches!(
            self,
            Tag::Text
                | Tag::CodeSpan
                | Tag::CodeBlock
                | Tag::ThematicBreak
                | Tag::SoftBreak
                | Tag::HardBreak
                | Tag::HtmlBlock
                | Tag::HtmlInline
                | Tag::Image
                | Tag::TaskListMarker
                | Tag::FootnoteReference
        )
    }
}

/// Sub-kind of lists, code blocks, links and images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Kind {
    #[default]
    #[serde(rename = "")]
    None,
    Ordered,
    Unordered,
    Fenced,
    Indented,
    /// `[text](url)`
    Inline,
    /// `[text][label]`
    Reference,
    /// `[label][]`
    Collapsed,
    /// `[label]`
    Shortcut,
    /// `<https://...>`
    Autolink,
    /// `<user@host>`
    Email,
}

/// Column alignment of a table.
///
/// A delimiter cell without colons aligns left, the natural direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// One unit of parser output.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub tag: Tag,
    pub content: String,
    pub level: u8,
    pub kind: Kind,
    pub fenced: bool,
    pub language: String,
    pub start_number: u64,
    pub label: String,
    pub url: String,
    pub title: String,
    pub alignments: Vec<Alignment>,
    pub checked: bool,
}

impl Event {
    pub fn start(tag: Tag) -> Self {
        Self {
            event_type: EventType::Start,
            tag,
            ..Self::default()
        }
    }

    pub fn atomic(tag: Tag) -> Self {
        Self {
            event_type: EventType::Atomic,
            tag,
            ..Self::default()
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::atomic(Tag::Text).with_content(content)
    }

    /// The End event matching this Start: same attributes, no payload.
    pub fn to_end(&self) -> Self {
        Self {
            event_type: EventType::End,
            content: String::new(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: Kind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn is_start(&self) -> bool {
        self.event_type == EventType::Start
    }

    pub fn is_end(&self) -> bool {
        self.event_type == EventType::End
    }
}
