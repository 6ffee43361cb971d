//! Regex fallback tokenizer.
//!
//! Tries strong, emphasis, code, strikethrough and link patterns at the start
//! of the remaining text; when none matches there, the text up to the
//! earliest match of any pattern is emitted as-is. There are no flanking
//! rules, escapes or references, so `a * b * c` becomes emphasis.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::InlineContext;
use super::code_spans::emit_code_span;
use crate::config::Extensions;
use crate::parser::block_parser::utils::emit_text;
use crate::syntax::SyntaxKind;
use rowan::GreenNodeBuilder;

static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*|__(.+?)__").unwrap());
static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*|_(.+?)_").unwrap());
static CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
static STRIKETHROUGH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~~(.+?)~~").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.+?)\]\((.+?)\)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SimpleKind {
    Strong,
    Emphasis,
    Code,
    Strikethrough,
    Link,
}

/// Tried in this order at each position.
const PATTERNS: [SimpleKind; 5] = [
    SimpleKind::Strong,
    SimpleKind::Emphasis,
    SimpleKind::Code,
    SimpleKind::Strikethrough,
    SimpleKind::Link,
];

impl SimpleKind {
    fn regex(self) -> &'static Regex {
        match self {
            Self::Strong => &*STRONG,
            Self::Emphasis => &*EMPHASIS,
            Self::Code => &*CODE,
            Self::Strikethrough => &*STRIKETHROUGH,
            Self::Link => &*LINK,
        }
    }

    fn enabled(self, ext: &Extensions) -> bool {
        match self {
            Self::Strong | Self::Emphasis => ext.emphasis,
            Self::Code => ext.code_spans,
            Self::Strikethrough => ext.strikethrough,
            Self::Link => ext.links,
        }
    }
}

pub(crate) fn tokenize_simple(
    builder: &mut GreenNodeBuilder<'static>,
    text: &str,
    ctx: &InlineContext,
    depth: usize,
) {
    let mut pos = 0;
    while pos < text.len() {
        let rest = &text[pos..];

        // Leftmost match wins; ties go to the earlier pattern
        let best = PATTERNS
            .iter()
            .filter(|kind| kind.enabled(ctx.extensions))
            .filter_map(|&kind| kind.regex().captures(rest).map(|caps| (kind, caps)))
            .min_by_key(|(_, caps)| caps.get(0).map_or(usize::MAX, |m| m.start()));

        let Some((kind, caps)) = best else {
            emit_text(builder, rest);
            break;
        };
        let Some(whole) = caps.get(0) else {
            emit_text(builder, rest);
            break;
        };

        emit_text(builder, &rest[..whole.start()]);
        emit_match(builder, kind, &caps, ctx, depth);
        pos += whole.end();
    }
}

fn emit_match(
    builder: &mut GreenNodeBuilder<'static>,
    kind: SimpleKind,
    caps: &Captures,
    ctx: &InlineContext,
    depth: usize,
) {
    let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1).or_else(|| caps.get(2))) else {
        return;
    };
    let open = &whole.as_str()[..inner.start() - whole.start()];

    match kind {
        SimpleKind::Code => emit_code_span(builder, inner.as_str(), 1),
        SimpleKind::Strong | SimpleKind::Emphasis | SimpleKind::Strikethrough => {
            let (node_kind, marker_kind) = match kind {
                SimpleKind::Strong => (SyntaxKind::STRONG, SyntaxKind::STRONG_MARKER),
                SimpleKind::Emphasis => (SyntaxKind::EMPHASIS, SyntaxKind::EMPHASIS_MARKER),
                _ => (SyntaxKind::STRIKETHROUGH, SyntaxKind::STRIKETHROUGH_MARKER),
            };
            builder.start_node(node_kind.into());
            builder.token(marker_kind.into(), open);
            emit_children(builder, inner.as_str(), ctx, depth + 1);
            builder.token(marker_kind.into(), open);
            builder.finish_node();
        }
        SimpleKind::Link => {
            builder.start_node(SyntaxKind::LINK.into());
            builder.token(SyntaxKind::LINK_START.into(), "[");
            builder.start_node(SyntaxKind::LINK_TEXT.into());
            emit_children(builder, inner.as_str(), ctx, depth + 1);
            builder.finish_node(); // LINK_TEXT
            builder.token(SyntaxKind::LINK_TEXT_END.into(), "]");
            builder.token(SyntaxKind::LINK_DEST_START.into(), "(");
            if let Some(dest) = caps.get(2) {
                builder.token(SyntaxKind::LINK_DEST.into(), dest.as_str());
            }
            builder.token(SyntaxKind::LINK_DEST_END.into(), ")");
            builder.finish_node(); // LINK
        }
    }
}

fn emit_children(
    builder: &mut GreenNodeBuilder<'static>,
    text: &str,
    ctx: &InlineContext,
    depth: usize,
) {
    if depth >= ctx.max_depth {
        emit_text(builder, text);
    } else {
        tokenize_simple(builder, text, ctx, depth);
    }
}
