//! Shared utilities for block parsing.

use crate::syntax::SyntaxKind;
use rowan::GreenNodeBuilder;

/// Strip trailing newline (LF or CRLF) from a line, returning the content and the newline string.
/// Returns (content_without_newline, newline_str).
pub(crate) fn strip_newline(line: &str) -> (&str, &str) {
    if let Some(content) = line.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = line.strip_suffix('\n') {
        (content, "\n")
    } else {
        (line, "")
    }
}

/// Split input into lines, dropping line endings (LF or CRLF).
/// A trailing newline does not produce an empty last line.
pub(crate) fn split_lines(input: &str) -> Vec<&str> {
    if input.is_empty() {
        return vec![];
    }
    input
        .split_inclusive('\n')
        .map(|line| strip_newline(line).0)
        .collect()
}

/// Strip up to 3 leading spaces from a line.
pub(crate) fn strip_leading_spaces(line: &str) -> &str {
    line.strip_prefix("   ")
        .or_else(|| line.strip_prefix("  "))
        .or_else(|| line.strip_prefix(" "))
        .unwrap_or(line)
}

/// Number of leading spaces.
pub(crate) fn leading_indent(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// Remove up to `n` leading spaces.
pub(crate) fn strip_indent(line: &str, n: usize) -> &str {
    let indent = leading_indent(line).min(n);
    &line[indent..]
}

/// Trim each line and join with single spaces, skipping blank lines.
pub(crate) fn join_paragraph_lines<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .map(|l| l.as_ref().trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Emit a TEXT token unless `text` is empty.
pub(crate) fn emit_text(builder: &mut GreenNodeBuilder<'static>, text: &str) {
    if !text.is_empty() {
        builder.token(SyntaxKind::TEXT.into(), text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_handles_crlf_and_trailing_newline() {
        assert_eq!(split_lines("a\r\nb\nc\n"), vec!["a", "b", "c"]);
        assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_strip_indent_stops_at_text() {
        assert_eq!(strip_indent("      x", 4), "  x");
        assert_eq!(strip_indent("  x", 4), "x");
    }

    #[test]
    fn test_join_paragraph_lines() {
        assert_eq!(join_paragraph_lines(&["  a ", "b", "", "  c"]), "a b c");
    }
}
