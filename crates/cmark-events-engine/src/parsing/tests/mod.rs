//! Pipeline tests for the parsing module.
//!
//! Documents are parsed to events, checked against the nesting invariants
//! and compared as indented outlines with inline `insta` snapshots.

mod normalize;

use insta::assert_snapshot;
use rstest::rstest;

use crate::{
    Error,
    event::{Event, Tag},
    options::Options,
    parsing::parse_events,
};

fn events_with(md: &str, options: &Options) -> Vec<Event> {
    let events = parse_events(md.as_bytes(), options).unwrap();
    invariants::check(&events);
    invariants::check_text_merged(&events);
    events
}

fn outline(md: &str) -> String {
    normalize::outline(&events_with(md, &Options::default()))
}

// Structure

#[test]
fn atx_heading() {
    assert_snapshot!(outline("# H1"), @r#"
    Heading level=1
      Text "H1"
    "#);
}

#[rstest]
#[case("# a", Some(1))]
#[case("###### a", Some(6))]
#[case("######", Some(6))]
#[case("####### a", None)]
#[case("#a", None)]
fn heading_levels(#[case] md: &str, #[case] level: Option<u8>) {
    let events = events_with(md, &Options::default());
    match level {
        Some(level) => {
            assert_eq!(events[0].tag, Tag::Heading);
            assert_eq!(events[0].level, level);
        }
        None => assert_eq!(events[0].tag, Tag::Paragraph),
    }
}

#[test]
fn nested_list_with_sibling() {
    assert_snapshot!(outline("- a\n  - b\n- c"), @r#"
    List kind=Unordered
      ListItem
        Text "a"
        List kind=Unordered
          ListItem
            Text "b"
      ListItem
        Text "c"
    "#);
}

#[test]
fn loose_ordered_list() {
    assert_snapshot!(outline("1. one\n2. two\n\n   para\n"), @r#"
    List kind=Ordered start=1
      ListItem
        Paragraph
          Text "one"
      ListItem
        Paragraph
          Text "two"
        Paragraph
          Text "para"
    "#);
}

#[test]
fn quote_break_and_hard_breaks() {
    assert_snapshot!(outline("> quote\nlazy\n\n---\n\nText  \nhard\\\nbreak"), @r#"
    BlockQuote
      Paragraph
        Text "quote"
        SoftBreak
        Text "lazy"
    ThematicBreak
    Paragraph
      Text "Text"
      HardBreak
      Text "hard"
      HardBreak
      Text "break"
    "#);
}

#[test]
fn fenced_code_block() {
    assert_snapshot!(outline("```rust\ncode\n```"), @r#"
    CodeBlock kind=Fenced lang=rust "code\n"
    "#);
}

#[test]
fn html_block_and_inline_html() {
    assert_snapshot!(outline("<div>\n<b>x</b>\n</div>\n\ninline <span>y</span>"), @r#"
    HtmlBlock "<div>\n<b>x</b>\n</div>\n"
    Paragraph
      Text "inline "
      HtmlInline "<span>"
      Text "y"
      HtmlInline "</span>"
    "#);
}

#[test]
fn setext_heading_with_entity() {
    assert_snapshot!(outline("Title &amp; more\n==="), @r#"
    Heading level=1
      Text "Title & more"
    "#);
}

// Inline content

#[test]
fn alternating_emphasis() {
    assert_snapshot!(outline("*a*b*c*"), @r#"
    Paragraph
      Emphasis
        Text "a"
      Text "b"
      Emphasis
        Text "c"
    "#);
}

#[test]
fn link_forms() {
    let md = "[x](/u \"t\") [y][Ref] [ref]\n\n[ref]: /r";
    assert_snapshot!(outline(md), @r#"
    Paragraph
      Link kind=Inline url=/u title="t"
        Text "x"
      Text " "
      Link kind=Reference url=/r label=Ref
        Text "y"
      Text " "
      Link kind=Shortcut url=/r label=ref
        Text "ref"
    "#);
}

#[test]
fn autolinks() {
    assert_snapshot!(outline("<https://a.b> <me@x.org>"), @r#"
    Paragraph
      Link kind=Autolink url=https://a.b
        Text "https://a.b"
      Text " "
      Link kind=Email url=mailto:me@x.org
        Text "me@x.org"
    "#);
}

#[test]
fn image_description_is_flattened() {
    assert_snapshot!(outline("![alt *x*](/i.png)"), @r#"
    Paragraph
      Image kind=Inline url=/i.png "alt x"
    "#);
}

#[test]
fn code_spans_and_escapes() {
    assert_snapshot!(outline("`a*b*` \\*lit\\*"), @r#"
    Paragraph
      CodeSpan "a*b*"
      Text " *lit*"
    "#);
}

// Extensions

#[test]
fn table_with_alignments() {
    assert_snapshot!(outline("|a|b|\n|--|--:|"), @r#"
    Table align=[Left, Right]
      TableHead
        TableCell
          Text "a"
        TableCell
          Text "b"
    "#);
}

#[test]
fn table_without_delimiter_row_is_a_paragraph() {
    assert_snapshot!(outline("|a|b|\n|c|d|"), @r#"
    Paragraph
      Text "|a|b|"
      SoftBreak
      Text "|c|d|"
    "#);
}

#[test]
fn task_list() {
    assert_snapshot!(outline("- [ ] todo\n- [x] done"), @r#"
    List kind=Unordered
      ListItem
        TaskListMarker
        Text "todo"
      ListItem
        TaskListMarker checked
        Text "done"
    "#);
}

#[test]
fn footnotes() {
    assert_snapshot!(outline("Note[^1].\n\n[^1]: Details."), @r#"
    Paragraph
      Text "Note"
      FootnoteReference label=1
      Text "."
    FootnoteDefinition label=1
      Paragraph
        Text "Details."
    "#);
}

#[test]
fn strikethrough() {
    assert_snapshot!(outline("~~gone~~ ~one~ ~~~no~~~"), @r#"
    Paragraph
      Strikethrough
        Text "gone"
      Text " "
      Strikethrough
        Text "one"
      Text " ~~~no~~~"
    "#);
}

#[test]
fn commonmark_options_disable_extensions() {
    let events = events_with("|a|\n|-|\n\n~~x~~ [^1]\n\n[^1]: n", &Options::commonmark());
    assert!(events.iter().all(|e| !matches!(
        e.tag,
        Tag::Table | Tag::Strikethrough | Tag::FootnoteReference | Tag::FootnoteDefinition
    )));
}

// Degenerate input

#[rstest]
#[case("")]
#[case("\n\n\n")]
#[case("   \n\t\n")]
fn blank_documents_have_no_events(#[case] md: &str) {
    assert!(events_with(md, &Options::default()).is_empty());
}

#[rstest]
#[case("[".repeat(2000))]
#[case("*".repeat(2000))]
#[case("_a ".repeat(500))]
#[case("`".repeat(500))]
#[case("[a](".repeat(300))]
#[case("<".repeat(1000))]
#[case("> - ".repeat(40))]
#[case("- ".repeat(60) + "x")]
#[case("|".repeat(100) + "\n" + &"-|".repeat(50))]
#[case("**a ~~b *c ~d".to_string())]
#[case("\0\r\n\t\u{FFFD}".to_string())]
fn adversarial_input_stays_balanced(#[case] md: String) {
    events_with(&md, &Options::default());
}

#[test]
fn unclosed_constructs_become_text() {
    assert_snapshot!(outline("[unclosed and `also unclosed"), @r#"
    Paragraph
      Text "[unclosed and `also unclosed"
    "#);
}

#[test]
fn nesting_limit() {
    let md = ">".repeat(Options::DEFAULT_MAX_NESTING + 1);
    let err = parse_events(md.as_bytes(), &Options::default()).unwrap_err();
    assert_eq!(
        err,
        Error::NestingLimitExceeded {
            limit: Options::DEFAULT_MAX_NESTING
        }
    );
    let ok = ">".repeat(Options::DEFAULT_MAX_NESTING - 1) + " x";
    assert!(parse_events(ok.as_bytes(), &Options::default()).is_ok());
}

#[test]
fn invalid_utf8_is_rejected() {
    let err = parse_events(b"ok\xff", &Options::default()).unwrap_err();
    assert_eq!(err, Error::InvalidEncoding { valid_up_to: 2 });
}
