use std::fmt::Write;

use crate::event::{Event, EventType, Kind};

/// Renders events as an indented outline for snapshot tests.
///
/// One line per Start or Atomic event, children indented two spaces; End
/// events only dedent. Attributes that hold their empty value are left out.
///
/// ```text
/// List kind=Unordered
///   ListItem
///     Text "a"
/// ```
pub fn outline(events: &[Event]) -> String {
    let mut out = String::new();
    let mut depth = 0usize;
    for e in events {
        if e.event_type == EventType::End {
            depth = depth.saturating_sub(1);
            continue;
        }
        let _ = write!(out, "{}{:?}", "  ".repeat(depth), e.tag);
        attributes(e, &mut out);
        if !e.content.is_empty() {
            let _ = write!(out, " {:?}", e.content);
        }
        out.push('\n');
        if e.event_type == EventType::Start {
            depth += 1;
        }
    }
    out
}

fn attributes(e: &Event, out: &mut String) {
    if e.level > 0 {
        let _ = write!(out, " level={}", e.level);
    }
    if e.kind != Kind::None {
        let _ = write!(out, " kind={:?}", e.kind);
    }
    if e.kind == Kind::Ordered {
        let _ = write!(out, " start={}", e.start_number);
    }
    if !e.language.is_empty() {
        let _ = write!(out, " lang={}", e.language);
    }
    if !e.url.is_empty() {
        let _ = write!(out, " url={}", e.url);
    }
    if !e.title.is_empty() {
        let _ = write!(out, " title={:?}", e.title);
    }
    if !e.label.is_empty() {
        let _ = write!(out, " label={}", e.label);
    }
    if !e.alignments.is_empty() {
        let _ = write!(out, " align={:?}", e.alignments);
    }
    if e.checked {
        out.push_str(" checked");
    }
}
