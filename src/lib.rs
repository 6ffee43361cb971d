//! A two-level Markdown tokenizer.
//!
//! Input lines are first split into blocks (headings, quotes, lists, tables,
//! code, HTML, paragraphs), then the text of every leaf block is split into
//! spans (emphasis, links, code spans, escapes). The result is a typed syntax
//! tree plus the document's reference table, which the bundled renderers turn
//! into HTML or canonical Markdown.

pub mod config;
pub mod parser;
pub mod render;
pub mod syntax;

use std::fmt::Write;

pub use config::{Config, ConfigBuilder, ConfigError, Extensions, Flavor, InlineMode};
pub use parser::{ReferenceDefinition, ReferenceRegistry};
pub use render::{HtmlRenderer, MarkdownRenderer, Render};
pub use syntax::{AstNode, Node, SyntaxKind, SyntaxNode};

use rowan::{NodeOrToken, WalkEvent};
use syntax::{DocumentNode, Image, Link};

#[cfg(test)]
fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A parsed document: the syntax tree and its reference table.
#[derive(Debug, Clone)]
pub struct Document {
    root: DocumentNode,
    references: ReferenceRegistry,
}

impl Document {
    fn new(tree: SyntaxNode, references: ReferenceRegistry) -> Self {
        Self {
            root: DocumentNode::from_root(tree),
            references,
        }
    }

    /// The `DOCUMENT` syntax node.
    pub fn root(&self) -> &SyntaxNode {
        self.root.syntax()
    }

    /// The root in the closed node view.
    pub fn node(&self) -> Node {
        Node::Document(self.root.clone())
    }

    /// Top-level blocks in document order.
    pub fn blocks(&self) -> Vec<Node> {
        self.root.blocks().collect()
    }

    pub fn references(&self) -> &ReferenceRegistry {
        &self.references
    }

    /// Look up a reference definition, case-insensitively.
    pub fn resolve(&self, label: &str) -> Option<&ReferenceDefinition> {
        self.references.get(label)
    }

    /// Destination and title of a link, following its reference label if it has one.
    pub fn link_target(&self, link: &Link) -> Option<(String, Option<String>)> {
        match link.label() {
            Some(label) => self
                .resolve(&label)
                .map(|def| (def.url.clone(), def.title.clone())),
            None => Some((link.destination().unwrap_or_default(), link.title())),
        }
    }

    /// Source and title of an image, following its reference label if it has one.
    pub fn image_target(&self, image: &Image) -> Option<(String, Option<String>)> {
        match image.label() {
            Some(label) => self
                .resolve(&label)
                .map(|def| (def.url.clone(), def.title.clone())),
            None => Some((image.source().unwrap_or_default(), image.title())),
        }
    }

    /// One line per node or token, indented by depth, tokens with their text.
    pub fn debug_tree(&self) -> String {
        let mut out = String::new();
        let mut depth = 0usize;
        for event in self.root().preorder_with_tokens() {
            match event {
                WalkEvent::Enter(element) => {
                    let indent = "  ".repeat(depth);
                    match element {
                        NodeOrToken::Node(node) => {
                            let _ = writeln!(out, "{indent}{:?}", node.kind());
                            depth += 1;
                        }
                        NodeOrToken::Token(token) => {
                            let _ = writeln!(out, "{indent}{:?} {:?}", token.kind(), token.text());
                        }
                    }
                }
                WalkEvent::Leave(NodeOrToken::Node(_)) => depth = depth.saturating_sub(1),
                WalkEvent::Leave(NodeOrToken::Token(_)) => {}
            }
        }
        out
    }
}

/// Parses a document with the default configuration.
///
/// # Examples
///
/// ```
/// let doc = sprig::parse("# Title\n\nSome *text*.");
/// assert_eq!(doc.blocks().len(), 2);
/// ```
pub fn parse(input: &str) -> Document {
    parse_with_config(input, &Config::default())
}

/// Parses a document. An out-of-range nesting depth is clamped, not rejected.
pub fn parse_with_config(input: &str, config: &Config) -> Document {
    let (tree, references) = parser::parse(input, config);
    Document::new(tree, references)
}

/// Parses a stream of lines, each with or without its line ending.
pub fn parse_lines<S: AsRef<str>>(lines: &[S], config: &Config) -> Document {
    let (tree, references) = parser::parse_lines(lines, config);
    Document::new(tree, references)
}

pub fn render_html(document: &Document) -> String {
    HtmlRenderer::new(document.references()).render(&document.node())
}

/// Canonical Markdown; rendering a parse of the output gives the same text.
pub fn render_markdown(document: &Document) -> String {
    MarkdownRenderer::new(document.references()).render(&document.node())
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn test_parse_lines_matches_parse() {
        init_logger();
        let lines = ["- item 1\n", "    - nested\n", "- item 2\n"];
        let from_lines = parse_lines(&lines, &Config::default());
        let from_str = parse("- item 1\n    - nested\n- item 2\n");
        assert_eq!(from_lines.debug_tree(), from_str.debug_tree());
    }

    #[test]
    fn test_debug_tree() {
        init_logger();
        let doc = parse("# Hi\n\n*a* [b](/c)");
        assert_snapshot!(doc.debug_tree(), @r##"
        DOCUMENT
          HEADING
            HEADING_MARKER "#"
            HEADING_CONTENT
              TEXT "Hi"
          PARAGRAPH
            EMPHASIS
              EMPHASIS_MARKER "*"
              TEXT "a"
              EMPHASIS_MARKER "*"
            TEXT " "
            LINK
              LINK_START "["
              LINK_TEXT
                TEXT "b"
              LINK_TEXT_END "]"
              LINK_DEST_START "("
              LINK_DEST "/c"
              LINK_DEST_END ")"
        "##);
    }

    #[test]
    fn test_link_target_follows_reference() {
        init_logger();
        let doc = parse("[x][Ref]\n\n[ref]: /target 'T'\n");
        let link = doc.root().descendants().find_map(Link::cast).unwrap();
        assert_eq!(
            doc.link_target(&link),
            Some(("/target".to_string(), Some("T".to_string())))
        );
        assert!(doc.resolve("REF").is_some());
        assert!(doc.resolve("missing").is_none());
    }

    #[test]
    fn test_parents_are_reachable() {
        init_logger();
        let doc = parse("> - *deep*");
        let emphasis = doc
            .root()
            .descendants()
            .find(|n| n.kind() == SyntaxKind::EMPHASIS)
            .and_then(Node::cast)
            .unwrap();
        let chain: Vec<_> = std::iter::successors(emphasis.parent(), Node::parent)
            .map(|n| n.kind())
            .collect();
        assert_eq!(
            chain,
            vec![
                SyntaxKind::LIST_ITEM,
                SyntaxKind::LIST,
                SyntaxKind::BLOCKQUOTE,
                SyntaxKind::DOCUMENT
            ]
        );
    }
}
