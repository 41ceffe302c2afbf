use crate::parsing::refs::{RefTable, parse_reference_definition};

/// Paragraph block type.
///
/// Paragraphs have no delimiters: they are the default leaf block when no
/// other block opener matches. Link reference definitions are only
/// recognized at the start of a paragraph.
pub struct Paragraph;

impl Paragraph {
    /// Removes leading link reference definitions from `content`, adding
    /// them to `refs`. Returns whether any definition was found.
    pub fn peel_definitions(content: &mut String, refs: &mut RefTable) -> bool {
        let mut consumed = 0;
        while content[consumed..].starts_with('[') {
            let Some((len, label, def)) = parse_reference_definition(&content[consumed..]) else {
                break;
            };
            refs.insert_link(&label, def);
            consumed += len;
        }
        content.drain(..consumed);
        consumed > 0
    }

    /// Whether `content` holds anything besides leading link reference
    /// definitions.
    pub fn has_text(content: &str) -> bool {
        let mut consumed = 0;
        while content[consumed..].starts_with('[') {
            let Some((len, ..)) = parse_reference_definition(&content[consumed..]) else {
                break;
            };
            consumed += len;
        }
        !content[consumed..].trim().is_empty()
    }
}
