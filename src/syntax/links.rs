//! Link, image and autolink wrappers.

use super::ast::{ast_node, support};
use super::{AstNode, SyntaxKind, SyntaxNode, plain_text};

ast_node!(
    /// `[text](dest "title")` or a reference form `[text][label]`, `[label][]`, `[label]`.
    Link,
    LINK
);

impl Link {
    pub fn text(&self) -> Option<LinkText> {
        support::child(&self.0)
    }

    /// Inline destination; `None` for reference links.
    pub fn destination(&self) -> Option<String> {
        if self.is_reference() {
            return None;
        }
        Some(support::token_text(&self.0, SyntaxKind::LINK_DEST).unwrap_or_default())
    }

    pub fn title(&self) -> Option<String> {
        support::token(&self.0, SyntaxKind::LINK_TITLE).map(|t| t.text().to_string())
    }

    /// Reference label; resolved against the document's reference table.
    pub fn label(&self) -> Option<String> {
        support::token(&self.0, SyntaxKind::LINK_LABEL).map(|t| t.text().to_string())
    }

    pub fn is_reference(&self) -> bool {
        self.label().is_some()
    }
}

ast_node!(LinkText, LINK_TEXT);

impl LinkText {
    pub fn text(&self) -> String {
        plain_text(&self.0)
    }
}

ast_node!(Image, IMAGE);

impl Image {
    /// Alt text with inline markup flattened.
    pub fn alt(&self) -> String {
        support::token_text(&self.0, SyntaxKind::IMAGE_ALT).unwrap_or_default()
    }

    pub fn source(&self) -> Option<String> {
        if self.is_reference() {
            return None;
        }
        Some(support::token_text(&self.0, SyntaxKind::LINK_DEST).unwrap_or_default())
    }

    pub fn title(&self) -> Option<String> {
        support::token(&self.0, SyntaxKind::LINK_TITLE).map(|t| t.text().to_string())
    }

    pub fn label(&self) -> Option<String> {
        support::token(&self.0, SyntaxKind::LINK_LABEL).map(|t| t.text().to_string())
    }

    pub fn is_reference(&self) -> bool {
        self.label().is_some()
    }
}

ast_node!(
    /// `<https://example.com>` or `<user@example.com>`.
    AutoLink,
    AUTO_LINK
);

impl AutoLink {
    /// Target as written, used as display text.
    pub fn target(&self) -> String {
        support::token_text(&self.0, SyntaxKind::TEXT).unwrap_or_default()
    }

    pub fn is_email(&self) -> bool {
        let target = self.target();
        !target.contains(':') && target.contains('@')
    }

    /// Href, with `mailto:` prepended for email targets.
    pub fn url(&self) -> String {
        if self.is_email() {
            format!("mailto:{}", self.target())
        } else {
            self.target()
        }
    }
}
