//! Heading AST node wrappers.

use super::ast::{ast_node, support};
use super::{AstNode, SyntaxKind, SyntaxNode, plain_text};

ast_node!(Heading, HEADING);

impl Heading {
    /// Returns the heading level (1-6).
    pub fn level(&self) -> usize {
        if let Some(marker) = support::token(&self.0, SyntaxKind::HEADING_MARKER) {
            return marker.text().chars().filter(|&c| c == '#').count();
        }

        // Setext headings: '=' is level 1, '-' is level 2
        match support::token(&self.0, SyntaxKind::SETEXT_UNDERLINE) {
            Some(underline) if underline.text().starts_with('-') => 2,
            _ => 1,
        }
    }

    pub fn is_setext(&self) -> bool {
        support::token(&self.0, SyntaxKind::SETEXT_UNDERLINE).is_some()
    }

    /// Returns the heading content node if present.
    pub fn content(&self) -> Option<HeadingContent> {
        support::child(&self.0)
    }

    /// Returns the heading text without inline markup.
    pub fn text(&self) -> String {
        self.content().map(|c| c.text()).unwrap_or_default()
    }
}

ast_node!(HeadingContent, HEADING_CONTENT);

impl HeadingContent {
    pub fn text(&self) -> String {
        plain_text(&self.0)
    }
}
