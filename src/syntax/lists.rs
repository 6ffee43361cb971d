//! List AST node wrappers.

use super::ast::{ast_node, support};
use super::{AstNode, Node, SyntaxKind, SyntaxNode};

ast_node!(
    /// A bullet or ordered list. Children are items and nested lists.
    List,
    LIST
);

impl List {
    /// Items directly in this list, skipping nested lists.
    pub fn items(&self) -> impl Iterator<Item = ListItem> + '_ {
        support::children(&self.0)
    }

    /// Whether the first item uses a numbered leader.
    pub fn ordered(&self) -> bool {
        self.items().next().is_some_and(|item| item.is_ordered())
    }

    /// Start number of an ordered list.
    pub fn start(&self) -> Option<u64> {
        self.items().next().and_then(|item| item.number())
    }

    /// Bullet character of an unordered list.
    pub fn bullet(&self) -> Option<char> {
        self.items()
            .next()
            .and_then(|item| item.marker())
            .and_then(|m| m.chars().next())
            .filter(|c| matches!(c, '-' | '+' | '*'))
    }
}

ast_node!(ListItem, LIST_ITEM);

impl ListItem {
    /// Leader text, e.g. "-" or "3.".
    pub fn marker(&self) -> Option<String> {
        support::token(&self.0, SyntaxKind::LIST_MARKER).map(|t| t.text().to_string())
    }

    pub fn is_ordered(&self) -> bool {
        self.number().is_some()
    }

    /// Number of an ordered leader.
    pub fn number(&self) -> Option<u64> {
        let marker = self.marker()?;
        marker
            .trim_end_matches(['.', ')'])
            .parse::<u64>()
            .ok()
    }

    /// True when the item holds blocks rather than inline content.
    pub fn is_loose(&self) -> bool {
        self.0.children().any(|child| child.kind().is_block())
    }

    /// Children in order, inline nodes or blocks.
    pub fn children(&self) -> Vec<Node> {
        Node::ListItem(self.clone()).children()
    }
}
