//! Span-level tokenizer.
//!
//! Runs over the block tree and replaces the raw text of every inline
//! container (paragraphs, heading content, table cells, tight list items)
//! with span nodes. Matches from all scanners are combined into one forest:
//! sorted by start (longest first), each match nests inside the previous one
//! when it lies within that match's inner range and is dropped when it
//! overlaps it otherwise.

use std::cmp::Reverse;
use std::ops::Range;

use crate::config::{Config, Extensions, InlineMode};
use crate::parser::block_parser::ReferenceRegistry;
use crate::parser::block_parser::utils::emit_text;
use crate::syntax::{SyntaxKind, SyntaxNode};
use rowan::GreenNodeBuilder;

mod code_spans;
pub mod core_tokens;
mod delimiters;
pub(crate) mod escapes;
mod html_spans;
pub mod links;
mod simple;
mod strikethrough;


use code_spans::emit_code_span;
use core_tokens::{CoreKind, CoreMatch, RawKind, RawSpan, resolve_core_tokens, scan_raw_spans};
use escapes::emit_escape;
use html_spans::{emit_autolink, emit_inline_html};
pub use links::LinkTarget;
use simple::tokenize_simple;
use strikethrough::find_strikethrough;

/// Everything the span scanners read. Built once per parse.
#[derive(Debug, Clone, Copy)]
pub struct InlineContext<'a> {
    pub extensions: &'a Extensions,
    pub references: &'a ReferenceRegistry,
    pub max_depth: usize,
    pub mode: InlineMode,
}

impl<'a> InlineContext<'a> {
    pub fn new(config: &'a Config, references: &'a ReferenceRegistry) -> Self {
        Self {
            extensions: &config.extensions,
            references,
            max_depth: config.nesting_depth(),
            mode: config.inline_mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SpanKind {
    Escape(char),
    Code { content: String, backticks: usize },
    AutoLink(String),
    Html,
    Strong,
    Emphasis,
    Strikethrough,
    Link(LinkTarget),
    Image(LinkTarget),
}

/// A candidate span. Raw spans have an empty inner range, so nothing nests in them.
#[derive(Debug, Clone)]
struct SpanMatch {
    kind: SpanKind,
    range: Range<usize>,
    inner: Range<usize>,
}

impl From<RawSpan> for SpanMatch {
    fn from(raw: RawSpan) -> Self {
        let kind = match raw.kind {
            RawKind::Escape(ch) => SpanKind::Escape(ch),
            RawKind::Code { content, backticks } => SpanKind::Code { content, backticks },
            RawKind::AutoLink(target) => SpanKind::AutoLink(target),
            RawKind::Html => SpanKind::Html,
        };
        Self {
            kind,
            inner: raw.range.start..raw.range.start,
            range: raw.range,
        }
    }
}

impl From<CoreMatch> for SpanMatch {
    fn from(m: CoreMatch) -> Self {
        let kind = match m.kind {
            CoreKind::Strong => SpanKind::Strong,
            CoreKind::Emphasis => SpanKind::Emphasis,
            CoreKind::Link(target) => SpanKind::Link(target),
            CoreKind::Image(target) => SpanKind::Image(target),
        };
        Self {
            kind,
            range: m.start..m.end,
            inner: m.inner,
        }
    }
}

#[derive(Debug)]
struct SpanNode {
    span: SpanMatch,
    children: Vec<SpanNode>,
}

/// Collect every match in `text` and arrange them into a forest.
fn collect_spans(text: &str, ctx: &InlineContext) -> Vec<SpanNode> {
    let raw = scan_raw_spans(text, ctx.extensions);
    let raw_ranges: Vec<Range<usize>> = raw.iter().map(|span| span.range.clone()).collect();

    let mut spans: Vec<SpanMatch> = raw.into_iter().map(SpanMatch::from).collect();
    spans.extend(
        resolve_core_tokens(text, ctx, &raw_ranges)
            .into_iter()
            .map(SpanMatch::from),
    );
    if ctx.extensions.strikethrough {
        spans.extend(
            find_strikethrough(text, &raw_ranges)
                .into_iter()
                .map(|range| SpanMatch {
                    kind: SpanKind::Strikethrough,
                    inner: range.start + 2..range.end - 2,
                    range,
                }),
        );
    }

    build_forest(spans)
}

fn build_forest(mut spans: Vec<SpanMatch>) -> Vec<SpanNode> {
    spans.sort_by_key(|s| (s.range.start, Reverse(s.range.end)));

    let mut roots = Vec::new();
    let mut open: Vec<SpanNode> = Vec::new();

    for span in spans {
        while open
            .last()
            .is_some_and(|top| span.range.start >= top.span.range.end)
        {
            if let Some(done) = open.pop() {
                attach(done, &mut open, &mut roots);
            }
        }

        let fits = open.last().is_none_or(|top| {
            top.span.inner.start <= span.range.start && span.range.end <= top.span.inner.end
        });
        if fits {
            open.push(SpanNode {
                span,
                children: Vec::new(),
            });
        } else {
            log::trace!("Dropping overlapping span at {:?}", span.range);
        }
    }

    while let Some(done) = open.pop() {
        attach(done, &mut open, &mut roots);
    }
    roots
}

fn attach(node: SpanNode, open: &mut [SpanNode], roots: &mut Vec<SpanNode>) {
    match open.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

/// Tokenize `text` into span nodes at the builder's current position.
pub fn tokenize_inline(
    builder: &mut GreenNodeBuilder<'static>,
    text: &str,
    ctx: &InlineContext,
    depth: usize,
) {
    match ctx.mode {
        InlineMode::Simple => tokenize_simple(builder, text, ctx, depth),
        InlineMode::DelimiterStack => {
            let forest = collect_spans(text, ctx);
            emit_nodes(builder, text, 0..text.len(), &forest, ctx, depth);
        }
    }
}

/// Emit `nodes` and the text gaps between them within `range`.
fn emit_nodes(
    builder: &mut GreenNodeBuilder<'static>,
    text: &str,
    range: Range<usize>,
    nodes: &[SpanNode],
    ctx: &InlineContext,
    depth: usize,
) {
    let mut pos = range.start;
    for node in nodes {
        emit_text(builder, &text[pos..node.span.range.start]);
        emit_span(builder, text, node, ctx, depth);
        pos = node.span.range.end;
    }
    emit_text(builder, &text[pos..range.end]);
}

fn emit_children(
    builder: &mut GreenNodeBuilder<'static>,
    text: &str,
    node: &SpanNode,
    ctx: &InlineContext,
    depth: usize,
) {
    let inner = node.span.inner.clone();
    if depth >= ctx.max_depth {
        log::debug!("Inline nesting limit reached at {:?}", inner);
        emit_text(builder, &text[inner]);
    } else {
        emit_nodes(builder, text, inner, &node.children, ctx, depth);
    }
}

fn emit_span(
    builder: &mut GreenNodeBuilder<'static>,
    text: &str,
    node: &SpanNode,
    ctx: &InlineContext,
    depth: usize,
) {
    let SpanMatch { kind, range, inner } = &node.span;
    match kind {
        SpanKind::Escape(ch) => emit_escape(builder, *ch),
        SpanKind::Code { content, backticks } => emit_code_span(builder, content, *backticks),
        SpanKind::AutoLink(target) => emit_autolink(builder, target),
        SpanKind::Html => emit_inline_html(builder, &text[range.clone()]),
        SpanKind::Strong | SpanKind::Emphasis | SpanKind::Strikethrough => {
            let (node_kind, marker_kind) = match kind {
                SpanKind::Strong => (SyntaxKind::STRONG, SyntaxKind::STRONG_MARKER),
                SpanKind::Emphasis => (SyntaxKind::EMPHASIS, SyntaxKind::EMPHASIS_MARKER),
                _ => (SyntaxKind::STRIKETHROUGH, SyntaxKind::STRIKETHROUGH_MARKER),
            };
            builder.start_node(node_kind.into());
            builder.token(marker_kind.into(), &text[range.start..inner.start]);
            emit_children(builder, text, node, ctx, depth + 1);
            builder.token(marker_kind.into(), &text[inner.end..range.end]);
            builder.finish_node();
        }
        SpanKind::Link(target) => {
            builder.start_node(SyntaxKind::LINK.into());
            builder.token(SyntaxKind::LINK_START.into(), "[");
            builder.start_node(SyntaxKind::LINK_TEXT.into());
            emit_children(builder, text, node, ctx, depth + 1);
            builder.finish_node(); // LINK_TEXT
            builder.token(SyntaxKind::LINK_TEXT_END.into(), "]");
            emit_link_target(builder, target);
            builder.finish_node(); // LINK
        }
        SpanKind::Image(target) => {
            builder.start_node(SyntaxKind::IMAGE.into());
            builder.token(SyntaxKind::IMAGE_START.into(), "![");
            let alt = plain_text(text, inner.clone(), &node.children);
            if !alt.is_empty() {
                builder.token(SyntaxKind::IMAGE_ALT.into(), &alt);
            }
            builder.token(SyntaxKind::IMAGE_ALT_END.into(), "]");
            emit_link_target(builder, target);
            builder.finish_node(); // IMAGE
        }
    }
}

fn emit_link_target(builder: &mut GreenNodeBuilder<'static>, target: &LinkTarget) {
    match target {
        LinkTarget::Inline { dest, title } => {
            builder.token(SyntaxKind::LINK_DEST_START.into(), "(");
            if !dest.is_empty() {
                builder.token(SyntaxKind::LINK_DEST.into(), dest);
            }
            if let Some(title) = title {
                builder.token(SyntaxKind::LINK_TITLE.into(), title);
            }
            builder.token(SyntaxKind::LINK_DEST_END.into(), ")");
        }
        LinkTarget::Reference { label } => {
            builder.token(SyntaxKind::LINK_LABEL.into(), label);
        }
    }
}

/// Image alt text: markup dropped, escapes and code kept as their text.
fn plain_text(text: &str, range: Range<usize>, nodes: &[SpanNode]) -> String {
    let mut out = String::new();
    let mut pos = range.start;
    for node in nodes {
        out.push_str(&text[pos..node.span.range.start]);
        match &node.span.kind {
            SpanKind::Escape(ch) => out.push(*ch),
            SpanKind::Code { content, .. } => out.push_str(content),
            SpanKind::AutoLink(target) => out.push_str(target),
            SpanKind::Html => {}
            _ => out.push_str(&plain_text(text, node.span.inner.clone(), &node.children)),
        }
        pos = node.span.range.end;
    }
    out.push_str(&text[pos..range.end]);
    out
}

/// The InlineParser takes the block tree and rebuilds it with span nodes in
/// place of the raw text of every inline container.
pub struct InlineParser<'a> {
    root: SyntaxNode,
    context: InlineContext<'a>,
}

impl<'a> InlineParser<'a> {
    pub fn new(
        root: SyntaxNode,
        config: &'a Config,
        reference_registry: &'a ReferenceRegistry,
    ) -> Self {
        Self {
            root,
            context: InlineContext::new(config, reference_registry),
        }
    }

    pub fn parse(self) -> SyntaxNode {
        let mut builder = GreenNodeBuilder::new();
        self.copy_node_to_builder(&mut builder, &self.root);
        SyntaxNode::new_root(builder.finish())
    }

    /// Copy a node and its children to the builder, tokenizing inline text.
    fn copy_node_to_builder(&self, builder: &mut GreenNodeBuilder<'static>, node: &SyntaxNode) {
        builder.start_node(node.kind().into());
        let inline = node.kind().is_inline_container();

        for child in node.children_with_tokens() {
            match child {
                rowan::NodeOrToken::Node(n) => self.copy_node_to_builder(builder, &n),
                rowan::NodeOrToken::Token(t) if inline && t.kind() == SyntaxKind::TEXT => {
                    tokenize_inline(builder, t.text(), &self.context, 0);
                }
                rowan::NodeOrToken::Token(t) => builder.token(t.kind().into(), t.text()),
            }
        }

        builder.finish_node();
    }
}

/// Tokenize a single string as the content of a paragraph.
#[cfg(test)]
pub(crate) fn parse_inline_text(text: &str, config: &Config) -> SyntaxNode {
    let references = ReferenceRegistry::new();
    let ctx = InlineContext::new(config, &references);
    let mut builder = GreenNodeBuilder::new();
    builder.start_node(SyntaxKind::PARAGRAPH.into());
    tokenize_inline(&mut builder, text, &ctx, 0);
    builder.finish_node();
    SyntaxNode::new_root(builder.finish())
}
