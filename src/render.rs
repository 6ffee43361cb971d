//! Renderer contract and the bundled renderers.
//!
//! A renderer walks the closed [`Node`] view of a parsed document. Every
//! implementation dispatches with one exhaustive `match` in
//! [`Render::render_node`], so adding a node kind fails to compile until each
//! renderer handles it.

pub mod html;
pub mod markdown;

pub use html::HtmlRenderer;
pub use markdown::MarkdownRenderer;

use crate::syntax::Node;

pub trait Render {
    /// Append the output for `node` and its subtree.
    fn render_node(&mut self, node: &Node, out: &mut String);

    fn render_children(&mut self, node: &Node, out: &mut String) {
        for child in node.children() {
            self.render_node(&child, out);
        }
    }

    /// Render a whole subtree into a fresh string.
    fn render(&mut self, root: &Node) -> String {
        let mut out = String::with_capacity(1024);
        self.render_node(root, &mut out);
        out
    }
}
