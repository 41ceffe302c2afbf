//! # Inline Lexer
//!
//! Splits a leaf's text into runs of plain text and the characters that can
//! start an inline construct. Tokens are context-free: the lexer does not
//! know whether `*` opens emphasis or `<` starts an autolink. Every byte of
//! the input lands in exactly one token.
//!
//! Constructs that need lookahead (code spans, link tails, autolinks, raw
//! HTML, entities) are recognized by the parser, which then moves the lexer
//! past them with [`logos::Lexer::bump`].

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineToken {
    #[token("\n")]
    Newline,

    #[token("\\")]
    Backslash,

    /// A whole run of backticks.
    #[regex("`+")]
    Backticks,

    #[regex(r"\*+")]
    Stars,

    #[regex("_+")]
    Underscores,

    #[regex("~+")]
    Tildes,

    #[token("![")]
    ImageOpen,

    #[token("[")]
    LinkOpen,

    #[token("]")]
    BracketClose,

    #[token("<")]
    Lt,

    #[token("&")]
    Amp,

    /// A lone `!` not followed by `[`.
    #[token("!")]
    Bang,

    /// Plain text, spaces included.
    #[regex(r"[^\n\\`*_~\[\]!<&]+")]
    Text,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn lex(input: &str) -> Vec<(InlineToken, std::ops::Range<usize>)> {
        let mut lexer = InlineToken::lexer(input);
        let mut tokens = Vec::new();
        while let Some(result) = lexer.next() {
            tokens.push((result.unwrap_or(InlineToken::Text), lexer.span()));
        }
        tokens
    }

    fn kinds(input: &str) -> Vec<(InlineToken, &str)> {
        lex(input)
            .into_iter()
            .map(|(t, r)| (t, &input[r]))
            .collect()
    }

    #[test]
    fn lex_empty_input() {
        assert_eq!(lex(""), vec![]);
    }

    #[test]
    fn plain_text_is_one_token() {
        assert_eq!(
            kinds("hello world"),
            vec![(InlineToken::Text, "hello world")]
        );
    }

    #[test]
    fn runs_are_single_tokens() {
        assert_eq!(
            kinds("**a__``~~"),
            vec![
                (InlineToken::Stars, "**"),
                (InlineToken::Text, "a"),
                (InlineToken::Underscores, "__"),
                (InlineToken::Backticks, "``"),
                (InlineToken::Tildes, "~~"),
            ]
        );
    }

    #[test]
    fn image_open_beats_bang() {
        assert_eq!(
            kinds("!![x]"),
            vec![
                (InlineToken::Bang, "!"),
                (InlineToken::ImageOpen, "!["),
                (InlineToken::Text, "x"),
                (InlineToken::BracketClose, "]"),
            ]
        );
    }

    #[test]
    fn every_byte_is_covered() {
        let input = "a\\b <c> &amp; [d](e)\n`f` ~g~ _h_ *i* ![j] é";
        let rebuilt: String = lex(input).into_iter().map(|(_, r)| &input[r]).collect();
        assert_eq!(rebuilt, input);
    }
}
