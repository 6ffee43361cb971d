//! Leaf and container block wrappers.

use super::ast::{ast_node, support};
use super::{AstNode, Node, SyntaxKind, SyntaxNode};

ast_node!(
    /// Root of a parsed document.
    DocumentNode,
    DOCUMENT
);

impl DocumentNode {
    /// Wraps the root produced by the parser, which is always a `DOCUMENT`.
    pub(crate) fn from_root(root: SyntaxNode) -> Self {
        debug_assert_eq!(root.kind(), SyntaxKind::DOCUMENT);
        Self(root)
    }

    /// Top-level blocks in document order.
    pub fn blocks(&self) -> impl Iterator<Item = Node> + '_ {
        self.0.children().filter_map(Node::cast)
    }
}

ast_node!(Paragraph, PARAGRAPH);

ast_node!(
    /// A block quote; children are blocks.
    Quote,
    BLOCKQUOTE
);

impl Quote {
    pub fn blocks(&self) -> impl Iterator<Item = Node> + '_ {
        self.0.children().filter_map(Node::cast)
    }
}

ast_node!(ThematicBreak, THEMATIC_BREAK);

ast_node!(HtmlBlock, HTML_BLOCK);

impl HtmlBlock {
    /// Raw HTML, one trailing newline per source line.
    pub fn content(&self) -> String {
        support::token_text(&self.0, SyntaxKind::HTML_CONTENT).unwrap_or_default()
    }
}

ast_node!(
    /// Fenced or indented code. Content is never tokenized.
    CodeBlock,
    CODE_BLOCK
);

impl CodeBlock {
    /// Raw code, one trailing newline per line.
    pub fn content(&self) -> String {
        support::token_text(&self.0, SyntaxKind::CODE_CONTENT).unwrap_or_default()
    }

    /// Full info string after the opening fence.
    pub fn info(&self) -> Option<String> {
        support::token(&self.0, SyntaxKind::CODE_INFO).map(|t| t.text().to_string())
    }

    /// First word of the info string.
    pub fn language(&self) -> Option<String> {
        self.info()
            .and_then(|info| info.split_whitespace().next().map(str::to_string))
    }

    pub fn is_fenced(&self) -> bool {
        support::token(&self.0, SyntaxKind::CODE_FENCE_MARKER).is_some()
    }

    /// Opening fence text, e.g. "```" or "~~~~".
    pub fn fence(&self) -> Option<String> {
        support::token(&self.0, SyntaxKind::CODE_FENCE_MARKER).map(|t| t.text().to_string())
    }
}
