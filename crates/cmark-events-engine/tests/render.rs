//! End-to-end tests: markdown in, events or HTML out.

use cmark_events_engine::{
    Alignment, Error, Event, EventType, Kind, Options, Tag, parse, render_html,
    render_html_with_options,
};
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn html(md: &str) -> String {
    render_html(md).unwrap()
}

/// Asserts the stream never closes more than it opened, and ends balanced.
fn assert_balanced(events: &[Event]) {
    let mut depth = 0usize;
    for (i, event) in events.iter().enumerate() {
        match event.event_type {
            EventType::Start => depth += 1,
            EventType::End => {
                assert!(depth > 0, "End without Start at {i}: {event:?}");
                depth -= 1;
            }
            EventType::Atomic => {}
        }
    }
    assert_eq!(depth, 0);
}

const MIXED: &str = "\
# Title

Some *emphasis*, **strong**, `code` and [a link](/x \"T\").

> quoted
> - item one
> - [x] item two

| a | b |
|:-:|---|
| 1 | 2 |

```rust
fn main() {}
```

Footnote[^1] and ~~struck~~ text.

[^1]: The note.
";

#[test]
fn rendering_is_deterministic() {
    let first = html(MIXED);
    for _ in 0..3 {
        assert_eq!(html(MIXED), first);
    }
}

#[test]
fn mixed_document_events_are_balanced() {
    assert_balanced(&parse(MIXED).unwrap());
}

#[test]
fn heading_events() {
    let heading = Event::start(Tag::Heading).with_level(1);
    assert_eq!(
        parse("# H1").unwrap(),
        vec![heading.clone(), Event::text("H1"), heading.to_end()]
    );
}

#[test]
fn fenced_code_event() {
    let events = parse("```rust\ncode\n```").unwrap();
    assert_eq!(events.len(), 1);
    let code = &events[0];
    assert_eq!(code.event_type, EventType::Atomic);
    assert_eq!(code.tag, Tag::CodeBlock);
    assert_eq!(code.kind, Kind::Fenced);
    assert!(code.fenced);
    assert_eq!(code.language, "rust");
    assert_eq!(code.content, "code\n");
}

#[test]
fn table_alignment_event() {
    let events = parse("|a|b|\n|--|--:|").unwrap();
    assert_eq!(events[0].tag, Tag::Table);
    assert_eq!(events[0].alignments, vec![Alignment::Left, Alignment::Right]);
}

#[rstest]
#[case::escaped_tag("\\<script>alert(1)\\</script>")]
#[case::code_span("`<script>alert(1)</script>`")]
#[case::fenced_code("```\n<script>alert(1)</script>\n```")]
#[case::link_title("[x](/y \"<script>\")")]
#[case::image_alt("![<script>](/x)")]
fn script_in_text_is_escaped(#[case] md: &str) {
    let out = html(md);
    assert!(!out.contains("<script>"), "{out}");
    assert!(out.contains("&lt;script&gt;"), "{out}");
}

#[test]
fn raw_html_block_passes_through() {
    assert_snapshot!(html("<script>\nalert(1)\n</script>\nafter"), @r"
    <script>
    alert(1)
    </script>
    <p>after</p>
    ");
}

#[test]
fn nested_tight_list() {
    assert_snapshot!(html("- a\n  - b\n- c"), @r"
    <ul>
    <li>a
    <ul>
    <li>b</li>
    </ul>
    </li>
    <li>c</li>
    </ul>
    ");
}

#[test]
fn loose_ordered_list() {
    assert_snapshot!(html("1. one\n2. two\n\n   para\n"), @r"
    <ol>
    <li>
    <p>one</p>
    </li>
    <li>
    <p>two</p>
    <p>para</p>
    </li>
    </ol>
    ");
}

#[test]
fn quote_and_thematic_break() {
    assert_snapshot!(html("> q\n\n---"), @r"
    <blockquote>
    <p>q</p>
    </blockquote>
    <hr />
    ");
}

#[test]
fn table_with_body() {
    assert_snapshot!(html("|a|b|\n|--|--:|\n|1|2|"), @r#"
    <table>
    <thead>
    <tr>
    <th>a</th>
    <th align="right">b</th>
    </tr>
    </thead>
    <tbody>
    <tr>
    <td>1</td>
    <td align="right">2</td>
    </tr>
    </tbody>
    </table>
    "#);
}

#[test]
fn footnote_reference_and_definition() {
    assert_snapshot!(html("Hi[^n]\n\n[^n]: Note"), @r##"
    <p>Hi<sup class="footnote-reference"><a href="#n">1</a></sup></p>
    <div class="footnote-definition" id="n"><sup class="footnote-definition-label">1</sup>
    <p>Note</p>
    </div>
    "##);
}

#[rstest]
#[case("*a*b*c*", "<p><em>a</em>b<em>c</em></p>\n")]
#[case("a  \nb", "<p>a<br />\nb</p>\n")]
#[case("~~x~~", "<p><del>x</del></p>\n")]
#[case("###### six", "<h6>six</h6>\n")]
#[case("####### x", "<p>####### x</p>\n")]
#[case(
    "[a](/x?q=1&r=2 \"T\")",
    "<p><a href=\"/x?q=1&amp;r=2\" title=\"T\">a</a></p>\n"
)]
#[case(
    "```rust\ncode\n```",
    "<pre><code class=\"language-rust\">code\n</code></pre>\n"
)]
#[case(
    "- [x] done",
    "<ul>\n<li><input checked=\"\" disabled=\"\" type=\"checkbox\"> done</li>\n</ul>\n"
)]
#[case("|a|b|\n|c|d|", "<p>|a|b|\n|c|d|</p>\n")]
#[case("&ngE; &nvlt;", "<p>\u{2267}\u{338} &lt;\u{20D2}</p>\n")]
fn renders(#[case] md: &str, #[case] expected: &str) {
    assert_eq!(html(md), expected);
}

#[test]
fn commonmark_options_render_extensions_as_text() {
    let out = render_html_with_options("~~x~~", &Options::commonmark()).unwrap();
    assert_eq!(out, "<p>~~x~~</p>\n");
}

#[test]
fn invalid_utf8_is_an_error() {
    let err = render_html(b"caf\xc3".as_slice()).unwrap_err();
    assert_eq!(err, Error::InvalidEncoding { valid_up_to: 3 });
}

#[test]
fn empty_input_renders_nothing() {
    assert_eq!(html(""), "");
}
