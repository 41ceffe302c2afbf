use crate::{event::Alignment, options::Options};

use super::{
    kinds::{
        AtxHeading, BlockQuote, CodeFence, FootnoteDefinition, HtmlBlock, ListItem, Paragraph,
        SetextHeading, Table, ThematicBreak,
    },
    line::{CODE_INDENT, LineCursor},
    types::{Fence, ListData},
};

/// A block start recognized on the remainder of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOpen {
    BlockQuote,
    AtxHeading { level: u8, text: String },
    FencedCode(Fence),
    HtmlBlock { condition: u8 },
    /// Turns the matched paragraph into a heading.
    SetextHeading { level: u8 },
    ThematicBreak,
    FootnoteDefinition { label: String },
    ListItem(ListData),
    IndentedCode,
    /// Turns the last line of the matched paragraph into a table header.
    Table { alignments: Vec<Alignment> },
}

impl BlockOpen {
    /// Containers keep looking for block starts on the same line.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            BlockOpen::BlockQuote | BlockOpen::FootnoteDefinition { .. } | BlockOpen::ListItem(_)
        )
    }
}

/// Parser state that gates some block starts.
#[derive(Debug, Clone, Copy)]
pub struct OpenContext<'a> {
    /// Text of the matched container when it is a paragraph.
    pub paragraph: Option<&'a str>,
    /// The innermost open block is a paragraph the line could lazily
    /// continue.
    pub lazy_paragraph: bool,
    /// The innermost open block is a paragraph or a table; indented code
    /// cannot interrupt either.
    pub tip_takes_text: bool,
    pub options: &'a Options,
}

/// Tries the block starts in precedence order at the cursor's next
/// non-space character.
///
/// On success the cursor has consumed the block's marker (or the whole
/// line for leaves that take no further text).
pub fn try_open(ln: &mut LineCursor<'_>, ctx: &OpenContext<'_>) -> Option<BlockOpen> {
    let rest = ln.rest_from_nonspace();
    let indented = ln.indented;

    if BlockQuote::consume_marker(ln) {
        return Some(BlockOpen::BlockQuote);
    }

    if !indented && let Some((level, marker_len)) = AtxHeading::opening(rest) {
        ln.advance_next_nonspace();
        ln.advance_offset(marker_len, false);
        let text = AtxHeading::strip_closing(ln.rest()).to_string();
        ln.advance_to_end();
        return Some(BlockOpen::AtxHeading { level, text });
    }

    if !indented && let Some((ch, len)) = CodeFence::opening(rest) {
        let fence = Fence {
            ch,
            len,
            offset: ln.indent,
        };
        ln.advance_next_nonspace();
        ln.advance_offset(len, false);
        return Some(BlockOpen::FencedCode(fence));
    }

    let interrupts = ctx.paragraph.is_some() || ctx.lazy_paragraph;
    if !indented && let Some(condition) = HtmlBlock::start_condition(rest, interrupts) {
        return Some(BlockOpen::HtmlBlock { condition });
    }

    if !indented
        && let Some(paragraph) = ctx.paragraph
        && let Some(level) = SetextHeading::level(rest)
        && Paragraph::has_text(paragraph)
    {
        ln.advance_to_end();
        return Some(BlockOpen::SetextHeading { level });
    }

    if !indented && ThematicBreak::matches(rest) {
        ln.advance_to_end();
        return Some(BlockOpen::ThematicBreak);
    }

    if ctx.options.footnotes
        && !indented
        && let Some((label, len)) = FootnoteDefinition::opening(rest)
    {
        let label = label.to_string();
        ln.advance_next_nonspace();
        ln.advance_offset(len, false);
        return Some(BlockOpen::FootnoteDefinition { label });
    }

    if let Some(data) = ListItem::parse_marker(ln, ctx.paragraph.is_some()) {
        return Some(BlockOpen::ListItem(data));
    }

    if indented && !ctx.tip_takes_text && !ln.blank {
        ln.advance_offset(CODE_INDENT, true);
        return Some(BlockOpen::IndentedCode);
    }

    if ctx.options.tables
        && !indented
        && let Some(paragraph) = ctx.paragraph
        && let Some(alignments) = Table::delimiter_row(rest)
        && header_line(paragraph)
            .is_some_and(|header| Table::split_cells(header).len() == alignments.len())
    {
        ln.advance_to_end();
        return Some(BlockOpen::Table { alignments });
    }

    None
}

/// The last line of accumulated paragraph text.
pub fn header_line(paragraph: &str) -> Option<&str> {
    paragraph
        .strip_suffix('\n')
        .unwrap_or(paragraph)
        .rsplit('\n')
        .next()
        .filter(|line| !line.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(line: &str, paragraph: Option<&str>) -> Option<BlockOpen> {
        let options = Options::default();
        let ctx = OpenContext {
            paragraph,
            lazy_paragraph: false,
            tip_takes_text: paragraph.is_some(),
            options: &options,
        };
        let mut ln = LineCursor::new(line);
        ln.find_next_nonspace();
        try_open(&mut ln, &ctx)
    }

    #[test]
    fn precedence_in_document() {
        assert_eq!(open("> q", None), Some(BlockOpen::BlockQuote));
        assert_eq!(
            open("## Title ##", None),
            Some(BlockOpen::AtxHeading {
                level: 2,
                text: "Title ".to_string()
            })
        );
        assert!(matches!(open("```rust", None), Some(BlockOpen::FencedCode(_))));
        assert_eq!(
            open("<div>", None),
            Some(BlockOpen::HtmlBlock { condition: 6 })
        );
        assert_eq!(open("* * *", None), Some(BlockOpen::ThematicBreak));
        assert!(matches!(open("* item", None), Some(BlockOpen::ListItem(_))));
        assert_eq!(open("    code", None), Some(BlockOpen::IndentedCode));
        assert_eq!(open("plain", None), None);
    }

    #[test]
    fn setext_needs_a_paragraph_with_text() {
        assert_eq!(
            open("---", Some("Title\n")),
            Some(BlockOpen::SetextHeading { level: 2 })
        );
        assert_eq!(open("---", Some("[a]: /a\n")), Some(BlockOpen::ThematicBreak));
        assert_eq!(open("===", None), None);
    }

    #[test]
    fn paragraph_blocks_indented_code() {
        assert_eq!(open("    more", Some("text\n")), None);
    }

    #[test]
    fn tables_need_matching_header_width() {
        assert_eq!(
            open("|--|--:|", Some("|a|b|\n")),
            Some(BlockOpen::Table {
                alignments: vec![Alignment::Left, Alignment::Right]
            })
        );
        assert_eq!(open("|--|--|", Some("|a|b|c|\n")), None);
    }

    #[test]
    fn footnote_definitions_open_containers() {
        let opened = open("[^1]: note", None).unwrap();
        assert!(opened.is_container());
        assert_eq!(
            opened,
            BlockOpen::FootnoteDefinition {
                label: "1".to_string()
            }
        );
    }
}
