//! Emphasis, code span, escape and raw HTML wrappers.

use super::ast::{ast_node, support};
use super::{AstNode, SyntaxKind, SyntaxNode};

ast_node!(Strong, STRONG);

impl Strong {
    /// Marker used, `**` or `__`.
    pub fn marker(&self) -> Option<String> {
        support::token(&self.0, SyntaxKind::STRONG_MARKER).map(|t| t.text().to_string())
    }
}

ast_node!(Emphasis, EMPHASIS);

impl Emphasis {
    pub fn marker(&self) -> Option<String> {
        support::token(&self.0, SyntaxKind::EMPHASIS_MARKER).map(|t| t.text().to_string())
    }
}

ast_node!(Strikethrough, STRIKETHROUGH);

ast_node!(
    /// Code span; content is stored unparsed.
    InlineCode,
    INLINE_CODE
);

impl InlineCode {
    pub fn content(&self) -> String {
        support::token_text(&self.0, SyntaxKind::CODE_CONTENT).unwrap_or_default()
    }

    /// Length of the opening backtick run.
    pub fn backticks(&self) -> usize {
        support::token(&self.0, SyntaxKind::CODE_SPAN_MARKER).map_or(1, |t| t.text().len())
    }
}

ast_node!(EscapeSequence, ESCAPE);

impl EscapeSequence {
    /// The escaped character, without the backslash.
    pub fn character(&self) -> Option<char> {
        support::token(&self.0, SyntaxKind::ESCAPED_CHAR).and_then(|t| t.text().chars().next())
    }
}

ast_node!(HtmlSpan, HTML_SPAN);

impl HtmlSpan {
    pub fn content(&self) -> String {
        support::token_text(&self.0, SyntaxKind::HTML_CONTENT).unwrap_or_default()
    }
}
