//! # Reference Table
//!
//! Link reference definitions (`[label]: /url "title"`) and footnote labels
//! collected during block parsing. The table is complete before any inline
//! content is parsed, so a link may use a definition that appears later in
//! the document.

use std::collections::HashMap;

use super::inline::{cursor::Cursor, kinds::Link};

/// Destination and title of a link reference definition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkDef {
    pub dest: String,
    pub title: String,
}

/// Label lookup for one document.
#[derive(Debug, Clone, Default)]
pub struct RefTable {
    links: HashMap<String, LinkDef>,
    /// Normalized footnote label to the label as first defined.
    footnotes: HashMap<String, String>,
}

impl RefTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a link definition; the first definition of a label wins.
    pub fn insert_link(&mut self, label: &str, def: LinkDef) -> bool {
        let key = normalize_label(label);
        if key.is_empty() || self.links.contains_key(&key) {
            return false;
        }
        self.links.insert(key, def);
        true
    }

    pub fn link(&self, label: &str) -> Option<&LinkDef> {
        self.links.get(&normalize_label(label))
    }

    /// Records a footnote definition label; the first spelling is kept.
    pub fn insert_footnote(&mut self, label: &str) {
        self.footnotes
            .entry(normalize_label(label))
            .or_insert_with(|| label.to_string());
    }

    /// The defined spelling of a footnote label, if it is defined.
    pub fn footnote(&self, label: &str) -> Option<&str> {
        self.footnotes.get(&normalize_label(label)).map(String::as_str)
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

/// Case-folds `label` (without brackets) and collapses internal whitespace,
/// so `[Foo  Bar]` and `[foo bar]` refer to the same definition.
pub fn normalize_label(label: &str) -> String {
    label
        .split([' ', '\t', '\n', '\r'])
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
        .to_uppercase()
}

/// Parses one link reference definition at the start of `s`.
///
/// Returns the bytes consumed (including the trailing line ending), the raw
/// label and the definition. `None` when `s` does not start with a complete
/// definition.
pub fn parse_reference_definition(s: &str) -> Option<(usize, String, LinkDef)> {
    let mut cur = Cursor::new(s);
    let label_len = Link::label(&mut cur);
    if label_len == 0 {
        return None;
    }
    let label = &s[1..label_len - 1];
    if cur.peek() != Some(b':') {
        return None;
    }
    cur.bump();
    cur.skip_spnl();

    let dest = Link::destination(&mut cur)?;
    if dest.is_empty() && !s[..cur.i].ends_with("<>") {
        return None;
    }

    let before_title = cur.i;
    cur.skip_spnl();
    let mut title = None;
    if cur.i != before_title {
        title = Link::title(&mut cur);
    }
    if title.is_none() {
        cur.i = before_title;
    }

    let mut at_line_end = skip_to_line_end(&mut cur);
    if !at_line_end && title.is_some() {
        // The title is not followed by the end of the line; the definition
        // still stands without it if the destination ends its line.
        title = None;
        cur.i = before_title;
        at_line_end = skip_to_line_end(&mut cur);
    }
    if !at_line_end || normalize_label(label).is_empty() {
        return None;
    }

    Some((
        cur.i,
        label.to_string(),
        LinkDef {
            dest,
            title: title.unwrap_or_default(),
        },
    ))
}

/// Consumes trailing spaces and one line ending; false if other text follows.
fn skip_to_line_end(cur: &mut Cursor<'_>) -> bool {
    let saved = cur.i;
    cur.skip_spaces();
    match cur.peek() {
        None => true,
        Some(b'\n') => {
            cur.bump();
            true
        }
        Some(_) => {
            cur.i = saved;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn def(dest: &str, title: &str) -> LinkDef {
        LinkDef {
            dest: dest.to_string(),
            title: title.to_string(),
        }
    }

    #[rstest]
    #[case("Foo", "FOO")]
    #[case("  foo \t bar\n baz ", "FOO BAR BAZ")]
    #[case("ẞ", "SS")]
    #[case("", "")]
    fn normalizes(#[case] label: &str, #[case] expected: &str) {
        assert_eq!(normalize_label(label), expected);
    }

    #[test]
    fn first_definition_wins() {
        let mut refs = RefTable::new();
        assert!(refs.insert_link("foo", def("/first", "")));
        assert!(!refs.insert_link("FOO", def("/second", "")));
        assert_eq!(refs.link("Foo").map(|d| d.dest.as_str()), Some("/first"));
        assert_eq!(refs.link_count(), 1);
    }

    #[test]
    fn footnote_keeps_defined_spelling() {
        let mut refs = RefTable::new();
        refs.insert_footnote("Note");
        refs.insert_footnote("note");
        assert_eq!(refs.footnote("NOTE"), Some("Note"));
        assert_eq!(refs.footnote("other"), None);
    }

    #[rstest]
    #[case("[foo]: /url \"title\"", 19, "foo", "/url", "title")]
    #[case("[foo]:\n/url\n\"the title\"\nrest", 24, "foo", "/url", "the title")]
    #[case("[Foo bar]: <my url> 'title'\n", 28, "Foo bar", "my url", "title")]
    #[case("[foo]: <>", 9, "foo", "", "")]
    #[case("[foo]: /url\nrest", 12, "foo", "/url", "")]
    #[case("[foo]: /url\n\"title\" ok", 12, "foo", "/url", "")]
    fn parses_definitions(
        #[case] input: &str,
        #[case] consumed: usize,
        #[case] label: &str,
        #[case] dest: &str,
        #[case] title: &str,
    ) {
        let (n, l, d) = parse_reference_definition(input).unwrap();
        assert_eq!((n, l.as_str()), (consumed, label));
        assert_eq!(d, def(dest, title));
    }

    #[rstest]
    #[case("[foo]:")]
    #[case("[foo]: /url \"title\" ok")]
    #[case("[foo] /url")]
    #[case("[]: /url")]
    #[case("[  ]: /url")]
    #[case("not a definition")]
    fn rejects(#[case] input: &str) {
        assert_eq!(parse_reference_definition(input), None);
    }
}
