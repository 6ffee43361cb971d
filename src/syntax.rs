//! Syntax tree types: kinds, typed wrappers, and the closed `Node` view.

mod ast;
mod blocks;
mod headings;
mod inlines;
mod kind;
mod links;
mod lists;
mod node;
mod tables;

pub use ast::AstNode;
pub use blocks::{CodeBlock, DocumentNode, HtmlBlock, Paragraph, Quote, ThematicBreak};
pub use headings::{Heading, HeadingContent};
pub use inlines::{Emphasis, EscapeSequence, HtmlSpan, InlineCode, Strikethrough, Strong};
pub use kind::{MarkdownLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
pub use links::{AutoLink, Image, Link, LinkText};
pub use lists::{List, ListItem};
pub use node::Node;
pub use tables::{Alignment, Table, TableCell, TableRow, parse_alignments};

/// Text content below `node` with all markup removed.
///
/// Marker tokens and link destinations are skipped, so `**a** [b](c)` yields `a b`.
pub fn plain_text(node: &SyntaxNode) -> String {
    node.descendants_with_tokens()
        .filter_map(|it| it.into_token())
        .filter(|t| {
            matches!(
                t.kind(),
                SyntaxKind::TEXT
                    | SyntaxKind::ESCAPED_CHAR
                    | SyntaxKind::CODE_CONTENT
                    | SyntaxKind::IMAGE_ALT
            )
        })
        .map(|t| t.text().to_string())
        .collect()
}
