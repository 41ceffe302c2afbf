use std::collections::HashMap;

use crate::{
    Error,
    event::{Alignment, Event, EventType, Kind, Tag},
    parsing::refs::normalize_label,
};

use super::escape::{escape_fragment, escape_href, escape_html};

/// Writes HTML for a balanced event stream.
pub(super) struct HtmlWriter<'o> {
    out: &'o mut String,
    /// Tags of open Start events.
    stack: Vec<Tag>,
    /// Column alignments of the open table.
    alignments: Vec<Alignment>,
    column: usize,
    in_table_head: bool,
    in_table_body: bool,
    /// Footnote numbers in order of first appearance.
    footnotes: HashMap<String, usize>,
}

impl<'o> HtmlWriter<'o> {
    pub(super) fn new(out: &'o mut String) -> Self {
        Self {
            out,
            stack: Vec::new(),
            alignments: Vec::new(),
            column: 0,
            in_table_head: false,
            in_table_body: false,
            footnotes: HashMap::new(),
        }
    }

    pub(super) fn run(mut self, events: &[Event]) -> Result<(), Error> {
        for (index, event) in events.iter().enumerate() {
            match event.event_type {
                EventType::Start => {
                    if event.tag.is_atomic() {
                        return Err(Error::UnbalancedEvents {
                            index,
                            reason: format!("{:?} cannot be a Start event", event.tag),
                        });
                    }
                    self.stack.push(event.tag);
                    self.start(event);
                }
                EventType::End => {
                    match self.stack.pop() {
                        Some(open) if open == event.tag => {}
                        open => return Err(Error::unexpected_end(index, event.tag, open)),
                    }
                    self.end(event);
                }
                EventType::Atomic => {
                    if !event.tag.is_atomic() {
                        return Err(Error::UnbalancedEvents {
                            index,
                            reason: format!("{:?} cannot be an Atomic event", event.tag),
                        });
                    }
                    self.atomic(event);
                }
            }
        }
        if let Some(open) = self.stack.last() {
            return Err(Error::UnbalancedEvents {
                index: events.len(),
                reason: format!("Start({open:?}) is never closed"),
            });
        }
        Ok(())
    }

    fn start(&mut self, event: &Event) {
        match event.tag {
            Tag::Paragraph => {
                self.cr();
                self.push("<p>");
            }
            Tag::Heading => {
                self.cr();
                self.push(&format!("<h{}>", event.level));
            }
            Tag::BlockQuote => {
                self.cr();
                self.push("<blockquote>\n");
            }
            Tag::List => {
                self.cr();
                if event.kind == Kind::Ordered {
                    if event.start_number == 1 {
                        self.push("<ol>\n");
                    } else {
                        self.push(&format!("<ol start=\"{}\">\n", event.start_number));
                    }
                } else {
                    self.push("<ul>\n");
                }
            }
            Tag::ListItem => {
                self.cr();
                self.push("<li>");
            }
            Tag::Table => {
                self.cr();
                self.alignments = event.alignments.clone();
                self.in_table_body = false;
                self.push("<table>\n");
            }
            Tag::TableHead => {
                self.in_table_head = true;
                self.column = 0;
                self.push("<thead>\n<tr>\n");
            }
            Tag::TableRow => {
                if !self.in_table_body {
                    self.in_table_body = true;
                    self.push("<tbody>\n");
                }
                self.column = 0;
                self.push("<tr>\n");
            }
            Tag::TableCell => {
                let cell = if self.in_table_head { "th" } else { "td" };
                self.push("<");
                self.push(cell);
                match self.alignments.get(self.column) {
                    Some(Alignment::Center) => self.push(" align=\"center\""),
                    Some(Alignment::Right) => self.push(" align=\"right\""),
                    _ => {}
                }
                self.push(">");
            }
            Tag::Emphasis => self.push("<em>"),
            Tag::Strong => self.push("<strong>"),
            Tag::Strikethrough => self.push("<del>"),
            Tag::Link => {
                self.push("<a href=\"");
                escape_href(&event.url, self.out);
                self.push("\"");
                if !event.title.is_empty() {
                    self.push(" title=\"");
                    escape_html(&event.title, self.out);
                    self.push("\"");
                }
                self.push(">");
            }
            Tag::FootnoteDefinition => {
                self.cr();
                let number = self.footnote_number(&event.label);
                self.push("<div class=\"footnote-definition\" id=\"");
                escape_fragment(&event.label, self.out);
                self.push(&format!(
                    "\"><sup class=\"footnote-definition-label\">{number}</sup>\n"
                ));
            }
            _ => {}
        }
    }

    fn end(&mut self, event: &Event) {
        match event.tag {
            Tag::Paragraph => self.push("</p>\n"),
            Tag::Heading => self.push(&format!("</h{}>\n", event.level)),
            Tag::BlockQuote => {
                self.cr();
                self.push("</blockquote>\n");
            }
            Tag::List => {
                self.cr();
                self.push(if event.kind == Kind::Ordered {
                    "</ol>\n"
                } else {
                    "</ul>\n"
                });
            }
            Tag::ListItem => self.push("</li>\n"),
            Tag::Table => {
                if self.in_table_body {
                    self.push("</tbody>\n");
                }
                self.push("</table>\n");
                self.alignments.clear();
            }
            Tag::TableHead => {
                self.in_table_head = false;
                self.push("</tr>\n</thead>\n");
            }
            Tag::TableRow => self.push("</tr>\n"),
            Tag::TableCell => {
                self.push(if self.in_table_head {
                    "</th>\n"
                } else {
                    "</td>\n"
                });
                self.column += 1;
            }
            Tag::Emphasis => self.push("</em>"),
            Tag::Strong => self.push("</strong>"),
            Tag::Strikethrough => self.push("</del>"),
            Tag::Link => self.push("</a>"),
            Tag::FootnoteDefinition => {
                self.cr();
                self.push("</div>\n");
            }
            _ => {}
        }
    }

    fn atomic(&mut self, event: &Event) {
        match event.tag {
            Tag::Text => escape_html(&event.content, self.out),
            Tag::CodeSpan => {
                self.push("<code>");
                escape_html(&event.content, self.out);
                self.push("</code>");
            }
            Tag::SoftBreak => self.push("\n"),
            Tag::HardBreak => self.push("<br />\n"),
            Tag::HtmlInline => self.push(&event.content),
            Tag::HtmlBlock => {
                self.cr();
                self.push(&event.content);
                self.cr();
            }
            Tag::ThematicBreak => {
                self.cr();
                self.push("<hr />\n");
            }
            Tag::CodeBlock => {
                self.cr();
                if event.language.is_empty() {
                    self.push("<pre><code>");
                } else {
                    self.push("<pre><code class=\"language-");
                    escape_html(&event.language, self.out);
                    self.push("\">");
                }
                escape_html(&event.content, self.out);
                self.push("</code></pre>\n");
            }
            Tag::Image => {
                self.push("<img src=\"");
                escape_href(&event.url, self.out);
                self.push("\" alt=\"");
                escape_html(&event.content, self.out);
                self.push("\"");
                if !event.title.is_empty() {
                    self.push(" title=\"");
                    escape_html(&event.title, self.out);
                    self.push("\"");
                }
                self.push(" />");
            }
            Tag::TaskListMarker => self.push(if event.checked {
                "<input checked=\"\" disabled=\"\" type=\"checkbox\"> "
            } else {
                "<input disabled=\"\" type=\"checkbox\"> "
            }),
            Tag::FootnoteReference => {
                let number = self.footnote_number(&event.label);
                self.push("<sup class=\"footnote-reference\"><a href=\"#");
                escape_fragment(&event.label, self.out);
                self.push(&format!("\">{number}</a></sup>"));
            }
            _ => {}
        }
    }

    fn footnote_number(&mut self, label: &str) -> usize {
        let next = self.footnotes.len() + 1;
        *self.footnotes.entry(normalize_label(label)).or_insert(next)
    }

    fn push(&mut self, s: &str) {
        self.out.push_str(s);
    }

    /// Starts a new line unless the output already ends one.
    fn cr(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }
}
