//! HTML output.
//!
//! Text, code and attribute values are escaped; raw HTML blocks and spans are
//! passed through untouched. Reference links resolve through the document's
//! reference table.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::Render;
use crate::parser::ReferenceRegistry;
use crate::syntax::{
    Alignment, AstNode, Image, Link, List, ListItem, Node, Table, TableCell, TableRow,
};

pub struct HtmlRenderer<'a> {
    references: &'a ReferenceRegistry,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(references: &'a ReferenceRegistry) -> Self {
        Self { references }
    }

    /// Destination and title of a link or image, inline or looked up by label.
    fn target(
        &self,
        dest: Option<String>,
        title: Option<String>,
        label: Option<String>,
    ) -> Option<(String, Option<String>)> {
        match label {
            Some(label) => self
                .references
                .get(&label)
                .map(|def| (def.url.clone(), def.title.clone())),
            None => Some((dest.unwrap_or_default(), title)),
        }
    }

    fn render_link(&mut self, node: &Node, link: &Link, out: &mut String) {
        let Some((href, title)) = self.target(link.destination(), link.title(), link.label())
        else {
            log::debug!("Unresolved reference {:?}", link.label());
            out.push('[');
            self.render_children(node, out);
            out.push(']');
            return;
        };
        out.push_str("<a href=\"");
        out.push_str(&encode_double_quoted_attribute(&href));
        out.push('"');
        push_title(out, title.as_deref());
        out.push('>');
        self.render_children(node, out);
        out.push_str("</a>");
    }

    fn render_image(&mut self, image: &Image, out: &mut String) {
        let Some((src, title)) = self.target(image.source(), image.title(), image.label()) else {
            out.push_str("![");
            out.push_str(&encode_text(&image.alt()));
            out.push(']');
            return;
        };
        out.push_str("<img src=\"");
        out.push_str(&encode_double_quoted_attribute(&src));
        out.push_str("\" alt=\"");
        out.push_str(&encode_double_quoted_attribute(&image.alt()));
        out.push('"');
        push_title(out, title.as_deref());
        out.push_str(" />");
    }

    fn render_list(&mut self, list: &List, node: &Node, out: &mut String) {
        if list.ordered() {
            match list.start() {
                Some(start) if start != 1 => {
                    let _ = writeln!(out, "<ol start=\"{start}\">");
                }
                _ => out.push_str("<ol>\n"),
            }
        } else {
            out.push_str("<ul>\n");
        }

        // Nested lists belong inside the item before them
        let children = node.children();
        let mut i = 0;
        while i < children.len() {
            let nested_end = children[i + 1..]
                .iter()
                .position(|c| !matches!(c, Node::List(_)))
                .map_or(children.len(), |p| i + 1 + p);
            match &children[i] {
                Node::ListItem(item) => {
                    self.render_item(item, &children[i + 1..nested_end], out);
                    i = nested_end;
                }
                other => {
                    out.push_str("<li>\n");
                    self.render_node(other, out);
                    out.push_str("</li>\n");
                    i += 1;
                }
            }
        }

        out.push_str(if list.ordered() { "</ol>\n" } else { "</ul>\n" });
    }

    fn render_item(&mut self, item: &ListItem, nested: &[Node], out: &mut String) {
        let node = Node::ListItem(item.clone());
        out.push_str("<li>");
        if item.is_loose() {
            out.push('\n');
            self.render_children(&node, out);
        } else {
            self.render_children(&node, out);
            if !nested.is_empty() {
                out.push('\n');
            }
        }
        for list in nested {
            self.render_node(list, out);
        }
        out.push_str("</li>\n");
    }

    fn render_table(&mut self, table: &Table, out: &mut String) {
        out.push_str("<table>\n");
        if let Some(header) = table.header() {
            out.push_str("<thead>\n<tr>\n");
            for cell in header.cells() {
                self.render_cell(&cell, "th", out);
            }
            out.push_str("</tr>\n</thead>\n");
        }
        let mut rows = table.rows().peekable();
        if rows.peek().is_some() {
            out.push_str("<tbody>\n");
            for row in rows {
                out.push_str("<tr>\n");
                for cell in row.cells() {
                    self.render_cell(&cell, "td", out);
                }
                out.push_str("</tr>\n");
            }
            out.push_str("</tbody>\n");
        }
        out.push_str("</table>\n");
    }

    fn render_cell(&mut self, cell: &TableCell, tag: &str, out: &mut String) {
        let align = match cell.alignment() {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        };
        let _ = write!(out, "<{tag} align=\"{align}\">");
        self.render_children(&Node::TableCell(cell.clone()), out);
        let _ = writeln!(out, "</{tag}>");
    }
}

fn push_title(out: &mut String, title: Option<&str>) {
    if let Some(title) = title {
        out.push_str(" title=\"");
        out.push_str(&encode_double_quoted_attribute(title));
        out.push('"');
    }
}

impl Render for HtmlRenderer<'_> {
    fn render_node(&mut self, node: &Node, out: &mut String) {
        match node {
            Node::Document(_) => self.render_children(node, out),
            Node::Heading(heading) => {
                let level = heading.level();
                let _ = write!(out, "<h{level}>");
                self.render_children(node, out);
                let _ = writeln!(out, "</h{level}>");
            }
            Node::Quote(_) => {
                out.push_str("<blockquote>\n");
                self.render_children(node, out);
                out.push_str("</blockquote>\n");
            }
            Node::Paragraph(_) => {
                out.push_str("<p>");
                self.render_children(node, out);
                out.push_str("</p>\n");
            }
            Node::CodeBlock(code) => {
                out.push_str("<pre><code");
                if let Some(lang) = code.language() {
                    out.push_str(" class=\"language-");
                    out.push_str(&encode_double_quoted_attribute(&lang));
                    out.push('"');
                }
                out.push('>');
                out.push_str(&encode_text(&code.content()));
                out.push_str("</code></pre>\n");
            }
            Node::List(list) => self.render_list(list, node, out),
            Node::ListItem(item) => self.render_item(item, &[], out),
            Node::Table(table) => self.render_table(table, out),
            Node::TableRow(_) => {
                out.push_str("<tr>\n");
                self.render_children(node, out);
                out.push_str("</tr>\n");
            }
            Node::TableCell(cell) => {
                let header = cell
                    .syntax()
                    .parent()
                    .and_then(TableRow::cast)
                    .is_some_and(|row| row.is_header());
                let tag = if header { "th" } else { "td" };
                self.render_cell(cell, tag, out);
            }
            Node::ThematicBreak(_) => out.push_str("<hr />\n"),
            Node::HtmlBlock(html) => out.push_str(&html.content()),
            Node::Strong(_) => {
                out.push_str("<strong>");
                self.render_children(node, out);
                out.push_str("</strong>");
            }
            Node::Emphasis(_) => {
                out.push_str("<em>");
                self.render_children(node, out);
                out.push_str("</em>");
            }
            Node::Strikethrough(_) => {
                out.push_str("<del>");
                self.render_children(node, out);
                out.push_str("</del>");
            }
            Node::InlineCode(code) => {
                out.push_str("<code>");
                out.push_str(&encode_text(&code.content()));
                out.push_str("</code>");
            }
            Node::Link(link) => self.render_link(node, link, out),
            Node::Image(image) => self.render_image(image, out),
            Node::AutoLink(auto) => {
                out.push_str("<a href=\"");
                out.push_str(&encode_double_quoted_attribute(&auto.url()));
                out.push_str("\">");
                out.push_str(&encode_text(&auto.target()));
                out.push_str("</a>");
            }
            Node::Escape(escape) => {
                if let Some(ch) = escape.character() {
                    let mut buf = [0; 4];
                    let ch: &str = ch.encode_utf8(&mut buf);
                    out.push_str(&encode_text(ch));
                }
            }
            Node::HtmlSpan(html) => out.push_str(&html.content()),
            Node::RawText(token) => out.push_str(&encode_text(token.text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::parser::parse;
    use crate::syntax::SyntaxNode;
    use similar_asserts::assert_eq;

    fn html(input: &str) -> String {
        let (tree, references): (SyntaxNode, _) = parse(input, &Config::default());
        let root = Node::cast(tree).unwrap();
        HtmlRenderer::new(&references).render(&root)
    }

    #[test]
    fn test_heading_and_paragraph() {
        assert_eq!(
            html("# Title\n\nSome *text* & more."),
            "<h1>Title</h1>\n<p>Some <em>text</em> &amp; more.</p>\n"
        );
    }

    #[test]
    fn test_code_block_is_escaped() {
        assert_eq!(
            html("```rust\nif a < b {}\n```\n"),
            "<pre><code class=\"language-rust\">if a &lt; b {}\n</code></pre>\n"
        );
    }

    #[test]
    fn test_nested_list_inside_item() {
        assert_eq!(
            html("- item 1\n    - nested\n- item 2\n"),
            "<ul>\n<li>item 1\n<ul>\n<li>nested</li>\n</ul>\n</li>\n<li>item 2</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_ordered_list_start() {
        assert_eq!(
            html("3. a\n4. b\n"),
            "<ol start=\"3\">\n<li>a</li>\n<li>b</li>\n</ol>\n"
        );
    }

    #[test]
    fn test_table_alignment() {
        assert_eq!(
            html("| a | b |\n|:-:|--:|\n| 1 | 2 |\n"),
            "<table>\n<thead>\n<tr>\n<th align=\"center\">a</th>\n<th align=\"right\">b</th>\n</tr>\n</thead>\n<tbody>\n<tr>\n<td align=\"center\">1</td>\n<td align=\"right\">2</td>\n</tr>\n</tbody>\n</table>\n"
        );
    }

    #[test]
    fn test_reference_link_resolves() {
        assert_eq!(
            html("[docs][d]\n\n[d]: /docs \"The docs\"\n"),
            "<p><a href=\"/docs\" title=\"The docs\">docs</a></p>\n"
        );
    }

    #[test]
    fn test_autolinks() {
        assert_eq!(
            html("<https://a.b/?x=1&y=2> <me@example.com>"),
            "<p><a href=\"https://a.b/?x=1&amp;y=2\">https://a.b/?x=1&amp;y=2</a> <a href=\"mailto:me@example.com\">me@example.com</a></p>\n"
        );
    }

    #[test]
    fn test_raw_html_passes_through() {
        assert_eq!(
            html("<div>\n<b>x</b>\n</div>\n\na <i>b</i>"),
            "<div>\n<b>x</b>\n</div>\n<p>a <i>b</i></p>\n"
        );
    }

    #[test]
    fn test_image() {
        assert_eq!(
            html("![a \"cat\"](/c.png)"),
            "<p><img src=\"/c.png\" alt=\"a &quot;cat&quot;\" /></p>\n"
        );
    }
}
