/// Indented code block: lines indented four or more columns.
pub struct IndentedCode;

impl IndentedCode {
    /// Content with trailing blank lines dropped, newline-terminated.
    pub fn literal(content: &str) -> String {
        let mut lines: Vec<&str> = content.split('\n').collect();
        while lines
            .last()
            .is_some_and(|l| l.bytes().all(|b| b == b' ' || b == b'\t'))
        {
            lines.pop();
        }
        let mut literal = lines.join("\n");
        literal.push('\n');
        literal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_blank_lines_are_dropped() {
        assert_eq!(IndentedCode::literal("a\n\n  b\n  \n\n"), "a\n\n  b\n");
    }

    #[test]
    fn interior_blank_lines_stay() {
        assert_eq!(IndentedCode::literal("a\n\nb\n"), "a\n\nb\n");
    }
}
