//! Canonical Markdown output.
//!
//! Blocks are separated by one blank line. Headings become ATX, code blocks
//! become fenced, bullets become `-`, ordered leaders use `.` and count up
//! from the list's start. Nested content is indented four spaces. Reference
//! definitions are re-emitted at the end of the document, so rendering the
//! output of this renderer again reproduces it.

use unicode_width::UnicodeWidthStr;

use super::Render;
use crate::parser::ReferenceRegistry;
use crate::syntax::{Alignment, CodeBlock, InlineCode, Link, List, ListItem, Node, Table};

const NESTED_INDENT: &str = "    ";

pub struct MarkdownRenderer<'a> {
    references: &'a ReferenceRegistry,
}

impl<'a> MarkdownRenderer<'a> {
    pub fn new(references: &'a ReferenceRegistry) -> Self {
        Self { references }
    }

    /// Render block children separated by blank lines.
    fn render_blocks(&mut self, blocks: &[Node]) -> String {
        let rendered: Vec<String> = blocks
            .iter()
            .map(|block| {
                let mut out = String::new();
                self.render_node(block, &mut out);
                out
            })
            .filter(|block| !block.is_empty())
            .collect();
        rendered.join("\n")
    }

    fn inline(&mut self, node: &Node) -> String {
        let mut out = String::new();
        self.render_children(node, &mut out);
        out
    }

    fn render_document(&mut self, node: &Node, out: &mut String) {
        let mut body = self.render_blocks(&node.children());
        let definitions = self.definitions();
        if !definitions.is_empty() {
            if !body.is_empty() {
                body.push('\n');
            }
            body.push_str(&definitions);
        }
        out.push_str(&body);
    }

    fn definitions(&self) -> String {
        let mut out = String::new();
        for def in self.references.iter() {
            out.push('[');
            out.push_str(&def.label);
            out.push_str("]: ");
            out.push_str(&destination(&def.url));
            if let Some(title) = &def.title {
                out.push(' ');
                out.push_str(&quoted_title(title));
            }
            out.push('\n');
        }
        out
    }

    fn render_code_block(&mut self, code: &CodeBlock, out: &mut String) {
        let content = code.content();
        let info = code.info().unwrap_or_default();
        // Backtick fences can't carry backticks in their info string
        let fence_char = if info.contains('`') { '~' } else { '`' };
        let longest = content
            .lines()
            .map(|line| line.trim_start().chars().take_while(|&c| c == fence_char).count())
            .max()
            .unwrap_or(0);
        let fence = fence_char.to_string().repeat(longest.max(2) + 1);

        out.push_str(&fence);
        out.push_str(&info);
        out.push('\n');
        out.push_str(&content);
        out.push_str(&fence);
        out.push('\n');
    }

    fn render_list(&mut self, list: &List, node: &Node, out: &mut String) {
        let mut number = list.start().unwrap_or(1);
        for child in node.children() {
            match &child {
                Node::ListItem(item) => {
                    let marker = if list.ordered() {
                        format!("{number}.")
                    } else {
                        "-".to_string()
                    };
                    number += 1;
                    out.push_str(&self.render_item(item, &marker));
                }
                other => {
                    let mut nested = String::new();
                    self.render_node(other, &mut nested);
                    out.push_str(&indent(&nested, NESTED_INDENT));
                }
            }
        }
    }

    fn render_item(&mut self, item: &ListItem, marker: &str) -> String {
        let node = Node::ListItem(item.clone());
        let body = if item.is_loose() {
            self.render_blocks(&node.children())
        } else {
            let mut text = self.inline(&node);
            text.push('\n');
            text
        };

        let mut lines = body.lines();
        let mut out = String::new();
        match lines.next() {
            Some(first) if !first.is_empty() => {
                out.push_str(marker);
                out.push(' ');
                out.push_str(first);
            }
            _ => out.push_str(marker),
        }
        out.push('\n');
        let rest: Vec<&str> = lines.collect();
        if !rest.is_empty() {
            out.push_str(&indent(&(rest.join("\n") + "\n"), NESTED_INDENT));
        }
        out
    }

    fn render_table(&mut self, table: &Table, out: &mut String) {
        let alignments = table.alignments();
        let columns = table.column_count();

        let mut header: Option<Vec<String>> = None;
        if let Some(row) = table.header() {
            header = Some(
                row.cells()
                    .map(|cell| self.inline(&Node::TableCell(cell)))
                    .collect(),
            );
        }
        let rows: Vec<Vec<String>> = table
            .rows()
            .map(|row| {
                row.cells()
                    .map(|cell| self.inline(&Node::TableCell(cell)))
                    .collect()
            })
            .collect();

        let mut widths = vec![3; columns];
        for row in header.iter().chain(rows.iter()) {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.width());
            }
        }
        let align_of = |i: usize| alignments.get(i).copied().unwrap_or_default();

        if let Some(header) = &header {
            push_row(out, header, &widths, align_of);
            let delimiters: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, &w)| match align_of(i) {
                    Alignment::Left => "-".repeat(w),
                    Alignment::Center => format!(":{}:", "-".repeat(w - 2)),
                    Alignment::Right => format!("{}:", "-".repeat(w - 1)),
                })
                .collect();
            out.push_str("| ");
            out.push_str(&delimiters.join(" | "));
            out.push_str(" |\n");
        }
        for row in &rows {
            push_row(out, row, &widths, align_of);
        }
    }

    fn render_link(&mut self, link: &Link, node: &Node, out: &mut String) {
        out.push('[');
        self.render_children(node, out);
        out.push(']');
        match link.label() {
            Some(label) => {
                out.push('[');
                out.push_str(&label);
                out.push(']');
            }
            None => push_inline_target(out, &link.destination().unwrap_or_default(), link.title()),
        }
    }
}

fn push_inline_target(out: &mut String, dest: &str, title: Option<String>) {
    out.push('(');
    out.push_str(&destination(dest));
    if let Some(title) = title {
        out.push(' ');
        out.push_str(&quoted_title(&title));
    }
    out.push(')');
}

fn push_row(
    out: &mut String,
    cells: &[String],
    widths: &[usize],
    align_of: impl Fn(usize) -> Alignment,
) {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, &width)| {
            let cell = cells.get(i).map_or("", String::as_str);
            let gap = width.saturating_sub(cell.width());
            match align_of(i) {
                Alignment::Left => format!("{cell}{}", " ".repeat(gap)),
                Alignment::Right => format!("{}{cell}", " ".repeat(gap)),
                Alignment::Center => {
                    let left = gap / 2;
                    format!("{}{cell}{}", " ".repeat(left), " ".repeat(gap - left))
                }
            }
        })
        .collect();
    out.push_str("| ");
    out.push_str(&padded.join(" | "));
    out.push_str(" |\n");
}

/// Prefix every non-empty line.
fn indent(text: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        if !line.is_empty() {
            out.push_str(prefix);
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        if line.is_empty() {
            out.push('>');
        } else {
            out.push_str("> ");
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

/// Bare destination, or `<...>` when it would not survive bare.
fn destination(dest: &str) -> String {
    let balanced = dest.matches('(').count() == dest.matches(')').count();
    if dest.is_empty() || !balanced || dest.contains(char::is_whitespace) {
        format!("<{dest}>")
    } else {
        dest.to_string()
    }
}

fn quoted_title(title: &str) -> String {
    format!("\"{}\"", title.replace('"', "\\\""))
}

fn code_span(code: &InlineCode) -> String {
    let content = code.content();
    let fence = "`".repeat(code.backticks());
    let pad = content.starts_with('`')
        || content.ends_with('`')
        || (content.starts_with(' ') && content.ends_with(' ') && !content.trim().is_empty());
    if pad {
        format!("{fence} {content} {fence}")
    } else {
        format!("{fence}{content}{fence}")
    }
}

impl Render for MarkdownRenderer<'_> {
    fn render_node(&mut self, node: &Node, out: &mut String) {
        match node {
            Node::Document(_) => self.render_document(node, out),
            Node::Heading(heading) => {
                out.push_str(&"#".repeat(heading.level()));
                let text = self.inline(node);
                if !text.is_empty() {
                    out.push(' ');
                    out.push_str(&text);
                }
                out.push('\n');
            }
            Node::Quote(_) => {
                let inner = self.render_blocks(&node.children());
                out.push_str(&quote(&inner));
            }
            Node::Paragraph(_) => {
                out.push_str(&self.inline(node));
                out.push('\n');
            }
            Node::CodeBlock(code) => self.render_code_block(code, out),
            Node::List(list) => self.render_list(list, node, out),
            Node::ListItem(item) => out.push_str(&self.render_item(item, "-")),
            Node::Table(table) => self.render_table(table, out),
            Node::TableRow(_) => {
                let cells: Vec<String> = node.children().iter().map(|c| self.inline(c)).collect();
                let widths: Vec<usize> = cells.iter().map(|c| c.width().max(3)).collect();
                push_row(out, &cells, &widths, |_| Alignment::Left);
            }
            Node::TableCell(_) => out.push_str(&self.inline(node)),
            Node::ThematicBreak(_) => out.push_str("---\n"),
            Node::HtmlBlock(html) => out.push_str(&html.content()),
            Node::Strong(strong) => {
                let marker = strong.marker().unwrap_or_else(|| "**".to_string());
                out.push_str(&marker);
                self.render_children(node, out);
                out.push_str(&marker);
            }
            Node::Emphasis(emphasis) => {
                let marker = emphasis.marker().unwrap_or_else(|| "*".to_string());
                out.push_str(&marker);
                self.render_children(node, out);
                out.push_str(&marker);
            }
            Node::Strikethrough(_) => {
                out.push_str("~~");
                self.render_children(node, out);
                out.push_str("~~");
            }
            Node::InlineCode(code) => out.push_str(&code_span(code)),
            Node::Link(link) => self.render_link(link, node, out),
            Node::Image(image) => {
                out.push_str("![");
                out.push_str(&image.alt());
                out.push(']');
                match image.label() {
                    Some(label) => {
                        out.push('[');
                        out.push_str(&label);
                        out.push(']');
                    }
                    None => push_inline_target(
                        out,
                        &image.source().unwrap_or_default(),
                        image.title(),
                    ),
                }
            }
            Node::AutoLink(auto) => {
                out.push('<');
                out.push_str(&auto.target());
                out.push('>');
            }
            Node::Escape(escape) => {
                if let Some(ch) = escape.character() {
                    out.push('\\');
                    out.push(ch);
                }
            }
            Node::HtmlSpan(html) => out.push_str(&html.content()),
            Node::RawText(token) => out.push_str(token.text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::parser::parse;
    use similar_asserts::assert_eq;

    fn markdown(input: &str) -> String {
        let (tree, references) = parse(input, &Config::default());
        let root = Node::cast(tree).unwrap();
        MarkdownRenderer::new(&references).render(&root)
    }

    #[test]
    fn test_setext_becomes_atx() {
        assert_eq!(markdown("Title\n=====\n\nBody"), "# Title\n\nBody\n");
    }

    #[test]
    fn test_indented_code_becomes_fenced() {
        assert_eq!(markdown("    let x = 1;\n"), "```\nlet x = 1;\n```\n");
    }

    #[test]
    fn test_fence_outgrows_content_backticks() {
        assert_eq!(
            markdown("~~~md\n```\ninner\n```\n~~~\n"),
            "````md\n```\ninner\n```\n````\n"
        );
    }

    #[test]
    fn test_list_markers_normalized() {
        assert_eq!(
            markdown("* a\n    + b\n* c\n\n3) x\n4) y\n"),
            "- a\n    - b\n- c\n\n3. x\n4. y\n"
        );
    }

    #[test]
    fn test_loose_item_indents_blocks() {
        assert_eq!(
            markdown("- a\n\n    second\n- b\n"),
            "- a\n\n    second\n- b\n"
        );
    }

    #[test]
    fn test_table_padding() {
        assert_eq!(
            markdown("|a|bb|\n|:-:|-:|\n|ccccc|d|\n"),
            "|   a   |  bb |\n| :---: | --: |\n| ccccc |   d |\n"
        );
    }

    #[test]
    fn test_quote_prefixes_every_line() {
        assert_eq!(markdown("> a\n>\n> > b\n"), "> a\n>\n> > b\n");
    }

    #[test]
    fn test_references_reemitted_at_end() {
        assert_eq!(
            markdown("[foo]: /url 'A title'\n\nSee [foo].\n"),
            "See [foo][foo].\n\n[foo]: /url \"A title\"\n"
        );
    }

    #[test]
    fn test_inline_spans() {
        assert_eq!(
            markdown("__a__ _b_ ~~c~~ `` d`e `` [l](</a b> \"t\") \\* <x@y.z>"),
            "__a__ _b_ ~~c~~ ``d`e`` [l](</a b> \"t\") \\* <x@y.z>\n"
        );
    }
}
