use logos::Logos;

use crate::{event::Kind, options::Options, parsing::refs::RefTable};

use super::{
    cursor::Cursor,
    delimiters::{DelimRun, Delimiter, Item, flatten, process_emphasis},
    kinds::{Autolink, CodeSpan, Entity, Link, RawHtml},
    lexer::InlineToken,
    types::{InlineNode, LinkTarget, SpanKind},
};

/// Parses a leaf's raw text into resolved [`InlineNode`]s.
///
/// `text` is the accumulated content of a paragraph, heading or table cell,
/// lines joined with `\n`. Surrounding whitespace is ignored. `refs` must
/// already hold every definition in the document.
pub fn parse_inline(text: &str, refs: &RefTable, options: &Options) -> Vec<InlineNode> {
    let s = text.trim_matches(|c| matches!(c, ' ' | '\t' | '\n'));
    InlineParser::new(s, refs, options).run()
}

/// An entry on the bracket stack: a `[` or `![` that may still become a
/// link or image.
#[derive(Debug, Clone, Copy)]
struct Bracket {
    /// Item holding the literal bracket text.
    item: usize,
    image: bool,
    /// Cleared when a link forms around it; links cannot contain links.
    active: bool,
    /// Byte offset right after the bracket, where the link text starts.
    text_start: usize,
    /// Delimiter stack height when the bracket was pushed.
    delim_bottom: usize,
    /// Another bracket appeared after this one.
    bracket_after: bool,
}

struct InlineParser<'a> {
    src: &'a str,
    refs: &'a RefTable,
    options: &'a Options,
    items: Vec<Item>,
    delims: Vec<Delimiter>,
    brackets: Vec<Bracket>,
}

impl<'a> InlineParser<'a> {
    fn new(src: &'a str, refs: &'a RefTable, options: &'a Options) -> Self {
        Self {
            src,
            refs,
            options,
            items: Vec::new(),
            delims: Vec::new(),
            brackets: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<InlineNode> {
        let src = self.src;
        let mut lex = InlineToken::lexer(src);
        while let Some(token) = lex.next() {
            let span = lex.span();
            // Bytes consumed past the token by a construct needing lookahead.
            let extra = match token.unwrap_or(InlineToken::Text) {
                InlineToken::Newline => self.newline(span.end, false),
                InlineToken::Backslash => self.backslash(span.end),
                InlineToken::Backticks => self.code_span(span.end, span.len()),
                InlineToken::Stars | InlineToken::Underscores => {
                    self.delim_run(span.start, span.end);
                    0
                }
                InlineToken::Tildes if self.options.strikethrough && span.len() <= 2 => {
                    self.delim_run(span.start, span.end);
                    0
                }
                InlineToken::ImageOpen => {
                    self.open_bracket(span.end, true);
                    0
                }
                InlineToken::LinkOpen => self
                    .footnote_reference(span.end)
                    .unwrap_or_else(|| {
                        self.open_bracket(span.end, false);
                        0
                    }),
                InlineToken::BracketClose => self.close_bracket(span.start),
                InlineToken::Lt => self.angle(span.start),
                InlineToken::Amp => self.entity(span.start),
                InlineToken::Tildes | InlineToken::Bang | InlineToken::Text => {
                    self.push_text(&src[span]);
                    0
                }
            };
            if extra > 0 {
                lex.bump(extra);
            }
        }
        process_emphasis(&mut self.items, &mut self.delims, 0);
        flatten(self.items)
    }

    fn push(&mut self, node: InlineNode) {
        self.items.push(Item::Node(node));
    }

    fn push_text(&mut self, text: &str) {
        self.push(InlineNode::Text(text.to_string()));
    }

    /// Line ending: two or more trailing spaces make a hard break (or
    /// `hard` when a backslash preceded it). Leading spaces of the next
    /// line are skipped.
    fn newline(&mut self, after: usize, hard: bool) -> usize {
        let mut hard = hard;
        if let Some(Item::Node(InlineNode::Text(t))) = self.items.last_mut() {
            let kept = t.trim_end_matches(' ').len();
            hard |= t.len() - kept >= 2;
            t.truncate(kept);
            if t.is_empty() {
                self.items.pop();
            }
        }
        self.push(if hard {
            InlineNode::HardBreak
        } else {
            InlineNode::SoftBreak
        });
        self.src.as_bytes()[after..]
            .iter()
            .take_while(|b| **b == b' ')
            .count()
    }

    fn backslash(&mut self, after: usize) -> usize {
        match self.src.as_bytes().get(after) {
            Some(b'\n') => 1 + self.newline(after + 1, true),
            Some(&b) if b.is_ascii_punctuation() => {
                self.push(InlineNode::Text(char::from(b).to_string()));
                1
            }
            _ => {
                self.push_text("\\");
                0
            }
        }
    }

    fn code_span(&mut self, after: usize, len: usize) -> usize {
        match CodeSpan::scan(&self.src[after..], len) {
            Some((content, consumed)) => {
                self.push(InlineNode::Code(content));
                consumed
            }
            None => {
                let run = &self.src[after - len..after];
                self.push_text(run);
                0
            }
        }
    }

    /// Pushes a `*`, `_` or `~` run with its flanking-based eligibility.
    fn delim_run(&mut self, start: usize, end: usize) {
        let cur = Cursor::new(self.src);
        let ch = self.src.as_bytes()[start];
        let before = cur.char_before(start);
        let after = cur.char_at(end);

        let before_ws = before.is_whitespace();
        let after_ws = after.is_whitespace();
        let before_punct = is_punctuation(before);
        let after_punct = is_punctuation(after);

        let left_flanking = !after_ws && (!after_punct || before_ws || before_punct);
        let right_flanking = !before_ws && (!before_punct || after_ws || after_punct);

        let (can_open, can_close) = if ch == b'_' {
            (
                left_flanking && (!right_flanking || before_punct),
                right_flanking && (!left_flanking || after_punct),
            )
        } else {
            (left_flanking, right_flanking)
        };

        let item = self.items.len();
        self.items.push(Item::Delim(DelimRun::new(ch, end - start)));
        if can_open || can_close {
            self.delims.push(Delimiter {
                item,
                ch,
                orig: end - start,
                can_open,
                can_close,
                active: true,
            });
        }
    }

    fn open_bracket(&mut self, after: usize, image: bool) {
        if let Some(top) = self.brackets.last_mut() {
            top.bracket_after = true;
        }
        self.push_text(if image { "![" } else { "[" });
        self.brackets.push(Bracket {
            item: self.items.len() - 1,
            image,
            active: true,
            text_start: after,
            delim_bottom: self.delims.len(),
            bracket_after: false,
        });
    }

    /// `[^label]` naming a defined footnote. Returns the bytes consumed.
    fn footnote_reference(&mut self, after: usize) -> Option<usize> {
        if !self.options.footnotes {
            return None;
        }
        let rest = self.src[after..].strip_prefix('^')?;
        let close = rest.find(']')?;
        let label = &rest[..close];
        if label.is_empty() || label.contains(|c: char| c.is_whitespace() || c == '[') {
            return None;
        }
        let defined = self.refs.footnote(label)?.to_string();
        self.push(InlineNode::FootnoteReference(defined));
        Some(1 + close + 1)
    }

    /// `]`: tries to close the nearest bracket as a link or image.
    fn close_bracket(&mut self, at: usize) -> usize {
        let after = at + 1;
        let Some(&opener) = self.brackets.last() else {
            self.push_text("]");
            return 0;
        };
        if !opener.active {
            self.brackets.pop();
            self.push_text("]");
            return 0;
        }

        let mut cur = Cursor::new(self.src);
        cur.i = after;
        let target = match self.inline_link(&mut cur) {
            Some(target) => Some(target),
            None => self.reference_link(&mut cur, &opener, at),
        };
        self.brackets.pop();
        let Some(target) = target else {
            self.push_text("]");
            return 0;
        };

        process_emphasis(&mut self.items, &mut self.delims, opener.delim_bottom);
        let kind = if opener.image {
            SpanKind::Image(target)
        } else {
            SpanKind::Link(target)
        };
        self.items[opener.item] = Item::Node(InlineNode::Open(kind.clone()));
        self.push(InlineNode::Close(kind));

        if !opener.image {
            for bracket in &mut self.brackets {
                if !bracket.image {
                    bracket.active = false;
                }
            }
        }
        cur.i - after
    }

    /// `(dest "title")` right after the closing bracket.
    fn inline_link(&self, cur: &mut Cursor<'_>) -> Option<LinkTarget> {
        if cur.peek() != Some(Link::DEST_OPEN) {
            return None;
        }
        let saved = cur.i;
        cur.bump();
        cur.skip_spnl();
        let Some(url) = Link::destination(cur) else {
            cur.i = saved;
            return None;
        };
        let before_title = cur.i;
        cur.skip_spnl();
        let title = if cur.i > before_title {
            Link::title(cur)
        } else {
            None
        };
        cur.skip_spnl();
        if cur.peek() != Some(Link::DEST_CLOSE) {
            cur.i = saved;
            return None;
        }
        cur.bump();
        Some(LinkTarget {
            url,
            title: title.unwrap_or_default(),
            kind: Kind::Inline,
            label: String::new(),
        })
    }

    /// Full `[label]`, collapsed `[]` or shortcut reference forms.
    fn reference_link(
        &self,
        cur: &mut Cursor<'_>,
        opener: &Bracket,
        close_at: usize,
    ) -> Option<LinkTarget> {
        let before = cur.i;
        let n = Link::label(cur);
        let (label, kind) = if n > 2 {
            (&self.src[before + 1..before + n - 1], Kind::Reference)
        } else if !opener.bracket_after {
            let text = &self.src[opener.text_start..close_at];
            let kind = if n == 2 {
                Kind::Collapsed
            } else {
                Kind::Shortcut
            };
            (text, kind)
        } else {
            cur.i = before;
            return None;
        };
        let found = (label.chars().count() <= Link::MAX_LABEL)
            .then(|| self.refs.link(label))
            .flatten();
        let Some(def) = found else {
            cur.i = before;
            return None;
        };
        Some(LinkTarget {
            url: def.dest.clone(),
            title: def.title.clone(),
            kind,
            label: label.to_string(),
        })
    }

    /// `<`: autolink, then raw HTML, else a literal.
    fn angle(&mut self, at: usize) -> usize {
        let rest = &self.src[at..];
        if let Some(m) = Autolink::scan(rest) {
            let target = LinkTarget {
                url: m.url,
                title: String::new(),
                kind: m.kind,
                label: String::new(),
            };
            self.push(InlineNode::Open(SpanKind::Link(target.clone())));
            self.push(InlineNode::Text(m.text));
            self.push(InlineNode::Close(SpanKind::Link(target)));
            return m.len - 1;
        }
        if let Some(len) = RawHtml::scan(rest) {
            self.push(InlineNode::Html(rest[..len].to_string()));
            return len - 1;
        }
        self.push_text("<");
        0
    }

    fn entity(&mut self, at: usize) -> usize {
        match Entity::scan(&self.src[at..]) {
            Some((text, len)) => {
                self.push(InlineNode::Text(text));
                len - 1
            }
            None => {
                self.push_text("&");
                0
            }
        }
    }
}

/// ASCII punctuation, or a non-ASCII character that is neither a letter,
/// a digit, whitespace nor a control character.
fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || (!c.is_ascii() && !c.is_alphanumeric() && !c.is_whitespace() && !c.is_control())
}
