//! Block-level tokenizer.
//!
//! Normalized lines accumulate in a buffer that is flushed on blank lines.
//! A flushed buffer first loses any leading reference definitions, then is
//! classified by the first matcher that accepts it, in priority order:
//! heading, quote, code, thematic break, list, table, HTML block. Anything
//! else is a paragraph. Quotes and loose list items are tokenized recursively.

use crate::config::Config;
use crate::syntax::{SyntaxKind, SyntaxNode};
use rowan::GreenNodeBuilder;

mod blockquotes;
pub(crate) mod code_blocks;
pub(crate) mod headings;
mod horizontal_rules;
mod html_blocks;
mod lists;
pub mod reference_definitions;
mod tables;
pub(crate) mod utils;

use super::normalize::normalize_lines;
use blockquotes::{strip_quote_markers, try_parse_blockquote_marker};
use code_blocks::{
    FenceInfo, emit_fenced_code_block, emit_indented_code_block, is_closing_fence,
    is_indented_code, try_parse_fence_open,
};
use headings::{
    emit_atx_heading, emit_setext_heading, try_parse_atx_heading, try_parse_setext_underline,
};
use horizontal_rules::{emit_horizontal_rule, try_parse_horizontal_rule};
use html_blocks::{emit_html_block, try_parse_html_block_start};
use lists::{ListEntry, ListItemDraft, split_items, try_parse_list_marker};
pub use reference_definitions::{ReferenceDefinition, ReferenceRegistry, normalize_label};
use reference_definitions::peel_reference_definitions;
use tables::{emit_table, is_pipe_table};
use utils::{emit_text, join_paragraph_lines, leading_indent};

/// Classification of a flushed buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BlockKind {
    AtxHeading(usize),
    SetextHeading,
    Quote,
    FencedCode(FenceInfo),
    IndentedCode,
    ThematicBreak,
    List,
    Table,
    HtmlBlock,
    Paragraph,
}

pub struct BlockParser<'a> {
    lines: Vec<String>,
    builder: GreenNodeBuilder<'static>,
    reference_registry: ReferenceRegistry,
    config: &'a Config,
}

impl<'a> BlockParser<'a> {
    /// Lines may carry their trailing `\n` / `\r\n` or not.
    pub fn new<S: AsRef<str>>(lines: &[S], config: &'a Config) -> Self {
        Self {
            lines: lines.iter().map(|l| l.as_ref().to_string()).collect(),
            builder: GreenNodeBuilder::new(),
            reference_registry: ReferenceRegistry::new(),
            config,
        }
    }

    pub fn parse(mut self) -> (SyntaxNode, ReferenceRegistry) {
        log::debug!("Starting block parse of {} line(s)", self.lines.len());

        let lines = std::mem::take(&mut self.lines);
        self.builder.start_node(SyntaxKind::DOCUMENT.into());
        self.tokenize(&lines, 0);
        self.builder.finish_node(); // DOCUMENT

        let tree = SyntaxNode::new_root(self.builder.finish());
        (tree, self.reference_registry)
    }

    /// Tokenize a line stream into blocks at the builder's current position.
    fn tokenize<S: AsRef<str>>(&mut self, lines: &[S], depth: usize) {
        let lines = normalize_lines(lines, self.config.extensions.fenced_code);
        let mut buffer: Vec<String> = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                if self.list_continues(&buffer, &lines[i + 1..]) {
                    buffer.push(String::new());
                } else {
                    self.flush(&mut buffer, depth);
                }
                continue;
            }

            // ATX headings match as soon as they are seen
            if self.config.extensions.atx_headings
                && try_parse_atx_heading(line).is_some()
                && !self.in_open_fence(&buffer)
            {
                self.flush(&mut buffer, depth);
            }

            buffer.push(line.clone());
        }

        self.flush(&mut buffer, depth);
    }

    /// A blank line keeps a list buffer open when the next non-blank line is
    /// indented continuation or another leader of the same kind.
    fn list_continues(&self, buffer: &[String], rest: &[String]) -> bool {
        let Some(first) = buffer.first() else {
            return false;
        };
        if self.classify(buffer) != BlockKind::List {
            return false;
        }
        let Some((marker, _)) = try_parse_list_marker(first) else {
            return false;
        };
        let Some(next) = rest.iter().find(|l| !l.is_empty()) else {
            return false;
        };

        if leading_indent(next) >= 4 {
            return true;
        }
        matches!(try_parse_list_marker(next), Some((next_marker, _)) if next_marker.same_kind(&marker))
    }

    fn in_open_fence(&self, buffer: &[String]) -> bool {
        if !self.config.extensions.fenced_code {
            return false;
        }
        match buffer.first().and_then(|l| try_parse_fence_open(l)) {
            Some(fence) => !buffer[1..].iter().any(|l| is_closing_fence(l, &fence)),
            None => false,
        }
    }

    fn can_nest(&self, depth: usize) -> bool {
        depth + 1 < self.config.nesting_depth()
    }

    fn flush(&mut self, buffer: &mut Vec<String>, depth: usize) {
        if buffer.is_empty() {
            return;
        }
        let mut lines = std::mem::take(buffer);
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        let start = if self.config.extensions.reference_definitions {
            peel_reference_definitions(&lines, &mut self.reference_registry)
        } else {
            0
        };
        let lines = &lines[start..];
        if lines.is_empty() {
            return;
        }

        let kind = self.classify(lines);
        log::debug!(
            "Flushing {} line(s) at depth {} as {:?}",
            lines.len(),
            depth,
            kind
        );
        self.emit(kind, lines, depth);
    }

    fn classify(&self, lines: &[String]) -> BlockKind {
        let ext = &self.config.extensions;
        let Some(first) = lines.first() else {
            return BlockKind::Paragraph;
        };

        if ext.atx_headings
            && lines.len() == 1
            && let Some(level) = try_parse_atx_heading(first)
        {
            return BlockKind::AtxHeading(level);
        }
        if ext.setext_headings
            && lines.len() >= 2
            && try_parse_setext_underline(&lines[lines.len() - 1]).is_some()
            && self.classify(&lines[..lines.len() - 1]) == BlockKind::Paragraph
        {
            return BlockKind::SetextHeading;
        }
        if ext.block_quotes && try_parse_blockquote_marker(first).is_some() {
            return BlockKind::Quote;
        }
        if ext.fenced_code
            && let Some(fence) = try_parse_fence_open(first)
        {
            return BlockKind::FencedCode(fence);
        }
        if ext.indented_code && is_indented_code(lines) {
            return BlockKind::IndentedCode;
        }
        if ext.thematic_breaks && lines.len() == 1 && try_parse_horizontal_rule(first).is_some() {
            return BlockKind::ThematicBreak;
        }
        if ext.lists && leading_indent(first) < 4 && try_parse_list_marker(first).is_some() {
            return BlockKind::List;
        }
        if ext.tables && is_pipe_table(lines) {
            return BlockKind::Table;
        }
        if ext.html_blocks && try_parse_html_block_start(first).is_some() {
            return BlockKind::HtmlBlock;
        }
        BlockKind::Paragraph
    }

    fn emit(&mut self, kind: BlockKind, lines: &[String], depth: usize) {
        match kind {
            BlockKind::AtxHeading(level) => emit_atx_heading(&mut self.builder, &lines[0], level),
            BlockKind::SetextHeading => {
                if let Some((underline, text)) = lines.split_last() {
                    emit_setext_heading(&mut self.builder, &join_paragraph_lines(text), underline);
                }
            }
            BlockKind::Quote => self.emit_quote(lines, depth),
            BlockKind::FencedCode(fence) => emit_fenced_code_block(&mut self.builder, lines, &fence),
            BlockKind::IndentedCode => emit_indented_code_block(&mut self.builder, lines),
            BlockKind::ThematicBreak => emit_horizontal_rule(&mut self.builder, &lines[0]),
            BlockKind::List => self.emit_list(lines, depth),
            BlockKind::Table => emit_table(&mut self.builder, lines),
            BlockKind::HtmlBlock => emit_html_block(&mut self.builder, lines),
            BlockKind::Paragraph => self.emit_paragraph(lines),
        }
    }

    fn emit_paragraph(&mut self, lines: &[String]) {
        self.builder.start_node(SyntaxKind::PARAGRAPH.into());
        emit_text(&mut self.builder, &join_paragraph_lines(lines));
        self.builder.finish_node(); // PARAGRAPH
    }

    fn emit_quote(&mut self, lines: &[String], depth: usize) {
        let inner = strip_quote_markers(lines);
        self.builder.start_node(SyntaxKind::BLOCKQUOTE.into());
        if self.can_nest(depth) {
            self.tokenize(&inner, depth + 1);
        } else {
            log::debug!("Quote at depth {} exceeds nesting limit", depth);
            self.emit_paragraph(&inner);
        }
        self.builder.finish_node(); // BLOCKQUOTE
    }

    fn emit_list(&mut self, lines: &[String], depth: usize) {
        let allow_nested = self.can_nest(depth);
        self.builder.start_node(SyntaxKind::LIST.into());
        for entry in split_items(lines, allow_nested) {
            match entry {
                ListEntry::Item(draft) => self.emit_list_item(&draft, depth),
                ListEntry::Nested(group) => self.emit_list(&group, depth + 1),
            }
        }
        self.builder.finish_node(); // LIST
    }

    fn emit_list_item(&mut self, draft: &ListItemDraft, depth: usize) {
        self.builder.start_node(SyntaxKind::LIST_ITEM.into());
        self.builder
            .token(SyntaxKind::LIST_MARKER.into(), &draft.marker.text());

        let content = draft.content_lines();
        if draft.has_blocks() && self.can_nest(depth) {
            self.tokenize(content, depth + 1);
        } else {
            emit_text(&mut self.builder, &join_paragraph_lines(content));
        }
        self.builder.finish_node(); // LIST_ITEM
    }
}
