use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::inline::kinds::RawHtml;

/// HTML block type. A block opens on one of seven start conditions, and the
/// condition decides what ends it.
pub struct HtmlBlock;

/// Tag names that open a condition 6 block.
const BLOCK_TAGS: &str = concat!(
    "address|article|aside|base|basefont|blockquote|body|caption|center|col|colgroup|dd|",
    "details|dialog|dir|div|dl|dt|fieldset|figcaption|figure|footer|form|frame|frameset|",
    "h1|h2|h3|h4|h5|h6|head|header|hr|html|iframe|legend|li|link|main|menu|menuitem|nav|",
    "noframes|ol|optgroup|option|p|param|search|section|summary|table|tbody|td|tfoot|th|",
    "thead|title|tr|track|ul"
);

fn start_regexes() -> &'static [Regex; 7] {
    static HTML_BLOCK_START_REGEX: OnceLock<[Regex; 7]> = OnceLock::new();
    HTML_BLOCK_START_REGEX.get_or_init(|| {
        let compile = |p: &str| Regex::new(p).expect("Invalid HTML block start regex");
        [
            compile(r"(?i)^<(?:script|pre|textarea|style)(?:\s|>|$)"),
            compile(r"^<!--"),
            compile(r"^<\?"),
            compile(r"^<![A-Za-z]"),
            compile(r"^<!\[CDATA\["),
            compile(&format!(r"(?i)^</?(?:{BLOCK_TAGS})(?:\s|/?>|$)")),
            compile(&format!(
                r"(?i)^(?:{}|{})\s*$",
                RawHtml::OPEN_TAG,
                RawHtml::CLOSE_TAG
            )),
        ]
    })
}

fn condition1_end() -> &'static Regex {
    static HTML_BLOCK_END_REGEX: OnceLock<Regex> = OnceLock::new();
    HTML_BLOCK_END_REGEX.get_or_init(|| {
        Regex::new(r"(?i)</(?:script|pre|textarea|style)>").expect("Invalid HTML block end regex")
    })
}

impl HtmlBlock {
    pub const OPEN: u8 = b'<';
    /// The only condition that may not interrupt a paragraph.
    pub const CONDITION_TAG: u8 = 7;

    /// Start condition (1..=7) met by `s`, which begins at the line's first
    /// non-space character.
    pub fn start_condition(s: &str, in_paragraph: bool) -> Option<u8> {
        if s.as_bytes().first() != Some(&Self::OPEN) {
            return None;
        }
        start_regexes()
            .iter()
            .zip(1u8..)
            .filter(|(_, condition)| !(in_paragraph && *condition == Self::CONDITION_TAG))
            .find(|(re, _)| re.is_match(s))
            .map(|(_, condition)| condition)
    }

    /// Whether `line` ends a block opened under `condition`. Conditions 6
    /// and 7 end at a blank line instead.
    pub fn ends(condition: u8, line: &str) -> bool {
        match condition {
            1 => condition1_end().is_match(line),
            2 => line.contains("-->"),
            3 => line.contains("?>"),
            4 => line.contains('>'),
            5 => line.contains("]]>"),
            _ => false,
        }
    }

    /// Blocks under conditions 6 and 7 run until a blank line.
    pub fn ends_at_blank(condition: u8) -> bool {
        condition >= 6
    }

    /// Drops trailing blank lines from the accumulated block text.
    pub fn literal(content: &str) -> String {
        let mut lines: Vec<&str> = content.lines().collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        let mut out = lines.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("<script>", Some(1))]
    #[case("<PRE class=\"x\">", Some(1))]
    #[case("<style", Some(1))]
    #[case("<!-- note", Some(2))]
    #[case("<?php", Some(3))]
    #[case("<!DOCTYPE html>", Some(4))]
    #[case("<![CDATA[", Some(5))]
    #[case("<div>", Some(6))]
    #[case("</table>", Some(6))]
    #[case("<td/>", Some(6))]
    #[case("<custom-tag attr=\"1\">", Some(7))]
    #[case("</foo >  ", Some(7))]
    #[case("<a href=\"x\">text", None)]
    #[case("<scripts>", Some(7))]
    #[case("not html", None)]
    fn start_conditions(#[case] line: &str, #[case] expected: Option<u8>) {
        assert_eq!(HtmlBlock::start_condition(line, false), expected);
    }

    #[test]
    fn condition_seven_cannot_interrupt_a_paragraph() {
        assert_eq!(HtmlBlock::start_condition("<custom>", true), None);
        assert_eq!(HtmlBlock::start_condition("<div>", true), Some(6));
    }

    #[rstest]
    #[case(1, "</SCRIPT> after", true)]
    #[case(1, "</scripts>", false)]
    #[case(2, "end -->", true)]
    #[case(3, "?>", true)]
    #[case(4, "x>", true)]
    #[case(5, "]]>", true)]
    #[case(6, "</div>", false)]
    fn end_conditions(#[case] condition: u8, #[case] line: &str, #[case] expected: bool) {
        assert_eq!(HtmlBlock::ends(condition, line), expected);
    }

    #[test]
    fn literal_drops_trailing_blank_lines() {
        assert_eq!(HtmlBlock::literal("<div>\n\n  \n"), "<div>\n");
        assert_eq!(HtmlBlock::literal(""), "");
    }
}
