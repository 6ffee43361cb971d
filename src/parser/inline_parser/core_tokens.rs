//! Emphasis, strong, link and image matches.
//!
//! A single left-to-right pass pushes delimiter runs and brackets onto a
//! stack. Each `]` looks for a link or image target; the whole stack is
//! resolved for emphasis at the end. Raw spans (escapes, code spans,
//! autolinks, inline HTML) are found first and skipped, so nothing inside
//! them ever pairs.

use std::cmp::Reverse;
use std::ops::Range;

use super::InlineContext;
use super::code_spans::try_parse_code_span;
use super::delimiters::{Delimiter, DelimiterKind, EmphasisMatch, process_emphasis};
use super::escapes::try_parse_escape;
use super::html_spans::{try_parse_autolink, try_parse_inline_html};
use super::links::{LinkTarget, try_parse_link_target};
use crate::config::Extensions;

/// What a [`CoreMatch`] produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreKind {
    Strong,
    Emphasis,
    Link(LinkTarget),
    Image(LinkTarget),
}

/// A resolved span. `start..end` covers the markers; `inner` is the text
/// between them (the link text for links and images).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreMatch {
    pub kind: CoreKind,
    pub start: usize,
    pub end: usize,
    pub inner: Range<usize>,
}

impl From<EmphasisMatch> for CoreMatch {
    fn from(em: EmphasisMatch) -> Self {
        Self {
            kind: if em.level == 2 {
                CoreKind::Strong
            } else {
                CoreKind::Emphasis
            },
            start: em.start,
            end: em.end,
            inner: em.content_start..em.content_end,
        }
    }
}

/// An opaque span found before delimiter scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RawKind {
    Escape(char),
    Code { content: String, backticks: usize },
    AutoLink(String),
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawSpan {
    pub kind: RawKind,
    pub range: Range<usize>,
}

/// Find escapes, code spans, autolinks and inline HTML, left to right.
pub(crate) fn scan_raw_spans(text: &str, extensions: &Extensions) -> Vec<RawSpan> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let rest = &text[pos..];
        match bytes[pos] {
            b'\\' if extensions.escapes => {
                if let Some(ch) = try_parse_escape(rest) {
                    let end = pos + 1 + ch.len_utf8();
                    spans.push(RawSpan {
                        kind: RawKind::Escape(ch),
                        range: pos..end,
                    });
                    pos = end;
                    continue;
                }
            }
            b'`' if extensions.code_spans => {
                if let Some((len, content, backticks)) = try_parse_code_span(rest) {
                    spans.push(RawSpan {
                        kind: RawKind::Code {
                            content: content.to_string(),
                            backticks,
                        },
                        range: pos..pos + len,
                    });
                    pos += len;
                } else {
                    // An unmatched run is literal as a whole
                    pos += rest.bytes().take_while(|&b| b == b'`').count();
                }
                continue;
            }
            b'<' => {
                if extensions.autolinks
                    && let Some((len, target)) = try_parse_autolink(rest)
                {
                    spans.push(RawSpan {
                        kind: RawKind::AutoLink(target.to_string()),
                        range: pos..pos + len,
                    });
                    pos += len;
                    continue;
                }
                if extensions.html_spans
                    && let Some(len) = try_parse_inline_html(rest)
                {
                    spans.push(RawSpan {
                        kind: RawKind::Html,
                        range: pos..pos + len,
                    });
                    pos += len;
                    continue;
                }
            }
            _ => {}
        }
        pos += rest.chars().next().map_or(1, char::len_utf8);
    }

    spans
}

/// Find strong, emphasis, link and image matches in `content`.
/// Results are sorted by start, longest first.
pub fn find_core_tokens(content: &str, ctx: &InlineContext) -> Vec<CoreMatch> {
    let raw: Vec<Range<usize>> = scan_raw_spans(content, ctx.extensions)
        .into_iter()
        .map(|span| span.range)
        .collect();
    resolve_core_tokens(content, ctx, &raw)
}

/// Like [`find_core_tokens`], with the raw spans already known.
pub(crate) fn resolve_core_tokens(
    content: &str,
    ctx: &InlineContext,
    raw: &[Range<usize>],
) -> Vec<CoreMatch> {
    let ext = ctx.extensions;
    let bytes = content.as_bytes();
    let mut stack: Vec<Delimiter> = Vec::new();
    let mut matches: Vec<CoreMatch> = Vec::new();
    let mut raw_spans = raw.iter().peekable();
    let mut pos = 0;

    while pos < bytes.len() {
        if let Some(span) = raw_spans.peek()
            && span.start <= pos
        {
            pos = pos.max(span.end);
            raw_spans.next();
            continue;
        }

        match bytes[pos] {
            b'*' | b'_' if ext.emphasis => {
                let start = pos;
                while pos < bytes.len() && bytes[pos] == bytes[start] {
                    pos += 1;
                }
                stack.push(Delimiter::emphasis(content, start, pos));
            }
            b'!' if ext.images && bytes.get(pos + 1) == Some(&b'[') => {
                stack.push(Delimiter::bracket(DelimiterKind::ImageBracket, pos, pos + 2));
                pos += 2;
            }
            b'[' if ext.links => {
                stack.push(Delimiter::bracket(DelimiterKind::Bracket, pos, pos + 1));
                pos += 1;
            }
            b']' => {
                pos = find_link_image(content, ctx, &mut stack, &mut matches, pos);
            }
            _ => pos += content[pos..].chars().next().map_or(1, char::len_utf8),
        }
    }

    matches.extend(process_emphasis(&mut stack, 0).into_iter().map(CoreMatch::from));
    matches.sort_by_key(|m| (m.start, Reverse(m.end)));
    matches
}

/// Handle a `]` at `pos`. Returns the position to continue scanning from.
fn find_link_image(
    content: &str,
    ctx: &InlineContext,
    stack: &mut Vec<Delimiter>,
    matches: &mut Vec<CoreMatch>,
    pos: usize,
) -> usize {
    let Some(k) = stack.iter().rposition(|d| d.kind.is_bracket()) else {
        return pos + 1;
    };
    if !stack[k].active {
        stack.remove(k);
        return pos + 1;
    }

    let opener = stack[k].clone();
    let text = &content[opener.end..pos];
    let Some((target, end)) = try_parse_link_target(content, pos + 1, text, ctx.references)
    else {
        stack.remove(k);
        return pos + 1;
    };

    // Emphasis inside the link text is settled before the brackets go
    matches.extend(process_emphasis(stack, k + 1).into_iter().map(CoreMatch::from));
    stack.truncate(k);

    let is_image = opener.kind == DelimiterKind::ImageBracket;
    log::trace!(
        "{} at {}..{}",
        if is_image { "Image" } else { "Link" },
        opener.start,
        end
    );
    matches.push(CoreMatch {
        kind: if is_image {
            CoreKind::Image(target)
        } else {
            CoreKind::Link(target)
        },
        start: opener.start,
        end,
        inner: opener.end..pos,
    });

    // Links may not contain other links
    if !is_image {
        for delim in stack.iter_mut() {
            if delim.kind == DelimiterKind::Bracket {
                delim.active = false;
            }
        }
    }

    end
}
