//! AST node trait and support utilities.

use super::{SyntaxKind, SyntaxNode, SyntaxToken};

/// Trait for typed AST node wrappers.
///
/// This provides type-safe access to syntax tree nodes with ergonomic APIs.
/// Pattern borrowed from rust-analyzer.
pub trait AstNode: Sized {
    /// Returns the `SyntaxKind` for this node type.
    fn kind() -> SyntaxKind
    where
        Self: Sized;

    /// Checks if a `SyntaxKind` can be cast to this node type.
    fn can_cast(kind: SyntaxKind) -> bool
    where
        Self: Sized;

    /// Attempts to cast a `SyntaxNode` to this typed wrapper.
    fn cast(syntax: SyntaxNode) -> Option<Self>
    where
        Self: Sized;

    /// Returns a reference to the underlying `SyntaxNode`.
    fn syntax(&self) -> &SyntaxNode;
}

/// Declares a newtype wrapper over `SyntaxNode` for a single kind.
macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident, $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn kind() -> SyntaxKind {
                SyntaxKind::$kind
            }

            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(syntax: SyntaxNode) -> Option<Self> {
                if Self::can_cast(syntax.kind()) {
                    Some(Self(syntax))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

pub(crate) use ast_node;

/// Helper functions for accessing children.
pub(super) mod support {
    use super::{AstNode, SyntaxKind, SyntaxNode, SyntaxToken};

    /// Find the first child node of a specific type.
    pub(crate) fn child<N: AstNode>(node: &SyntaxNode) -> Option<N> {
        node.children().find_map(N::cast)
    }

    /// Find all child nodes of a specific type.
    pub(crate) fn children<'a, N: AstNode + 'a>(
        node: &'a SyntaxNode,
    ) -> impl Iterator<Item = N> + 'a {
        node.children().filter_map(N::cast)
    }

    /// Find the first token of a specific kind.
    pub(crate) fn token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
        node.children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|it| it.kind() == kind)
    }

    /// Concatenated text of all direct tokens of a kind.
    pub(crate) fn token_text(node: &SyntaxNode, kind: SyntaxKind) -> Option<String> {
        let mut out: Option<String> = None;
        for token in node
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|it| it.kind() == kind)
        {
            out.get_or_insert_with(String::new).push_str(token.text());
        }
        out
    }
}
