//! Link and image targets.
//!
//! After the closing `]` of link text, the target is one of:
//! - inline: `(dest "title")`, `(<dest>)`, `()`
//! - full reference: `[label]`
//! - collapsed reference: `[]`
//! - shortcut reference: nothing, the link text itself is the label
//!
//! Reference forms only match when the label is defined.

use super::escapes::unescape;
use crate::parser::block_parser::ReferenceRegistry;

/// Where a link or image points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Inline { dest: String, title: Option<String> },
    Reference { label: String },
}

/// Try to parse a link target right after the closing `]`.
/// `pos` is the byte offset following `]`; `text` is the raw link text.
/// Returns the target and the end offset of the whole link.
pub(crate) fn try_parse_link_target(
    content: &str,
    pos: usize,
    text: &str,
    references: &ReferenceRegistry,
) -> Option<(LinkTarget, usize)> {
    let rest = &content[pos..];

    if let Some((len, dest, title)) = try_parse_inline_target(rest) {
        return Some((LinkTarget::Inline { dest, title }, pos + len));
    }

    if let Some((len, label)) = try_parse_label(rest) {
        // Full or collapsed reference; a well-formed but undefined label
        // also rules out the shortcut form.
        let label = if label.trim().is_empty() { text } else { label };
        return references.contains(label).then(|| {
            (
                LinkTarget::Reference {
                    label: label.to_string(),
                },
                pos + len,
            )
        });
    }

    if references.contains(text) {
        return Some((
            LinkTarget::Reference {
                label: text.to_string(),
            },
            pos,
        ));
    }

    None
}

/// Parse `(dest "title")` at the start of `text`.
/// Returns (total_len, destination, title).
fn try_parse_inline_target(text: &str) -> Option<(usize, String, Option<String>)> {
    let bytes = text.as_bytes();
    if bytes.first() != Some(&b'(') {
        return None;
    }
    let mut pos = skip_spaces(bytes, 1);

    let dest = if bytes.get(pos) == Some(&b'<') {
        let start = pos + 1;
        let mut end = start;
        while end < bytes.len() && !matches!(bytes[end], b'>' | b'<' | b'\n') {
            if bytes[end] == b'\\' && end + 1 < bytes.len() {
                end += 1;
            }
            end += 1;
        }
        if bytes.get(end) != Some(&b'>') {
            return None;
        }
        pos = end + 1;
        &text[start..end]
    } else {
        let start = pos;
        let mut depth = 0usize;
        while pos < bytes.len() {
            match bytes[pos] {
                b if b <= b' ' => break,
                b'\\' if pos + 1 < bytes.len() => pos += 1,
                b'(' => depth += 1,
                b')' if depth == 0 => break,
                b')' => depth -= 1,
                _ => {}
            }
            pos += 1;
        }
        if depth != 0 {
            return None;
        }
        &text[start..pos]
    };

    let before_title = pos;
    pos = skip_spaces(bytes, pos);

    let mut title = None;
    if pos > before_title
        && let Some(&open) = bytes.get(pos)
        && matches!(open, b'"' | b'\'' | b'(')
    {
        let close = if open == b'(' { b')' } else { open };
        let start = pos + 1;
        let mut end = start;
        while end < bytes.len() && bytes[end] != close {
            if open == b'(' && bytes[end] == b'(' {
                return None;
            }
            if bytes[end] == b'\\' && end + 1 < bytes.len() {
                end += 1;
            }
            end += 1;
        }
        if end >= bytes.len() {
            return None;
        }
        title = Some(unescape(&text[start..end]));
        pos = skip_spaces(bytes, end + 1);
    }

    if bytes.get(pos) != Some(&b')') {
        return None;
    }
    Some((pos + 1, unescape(dest), title))
}

/// Parse a `[label]` at the start of `text`. Labels may not contain
/// unescaped brackets. Returns (total_len, label).
fn try_parse_label(text: &str) -> Option<(usize, &str)> {
    let bytes = text.as_bytes();
    if bytes.first() != Some(&b'[') {
        return None;
    }
    let mut pos = 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b']' => return Some((pos + 1, &text[1..pos])),
            b'[' => return None,
            _ => pos += 1,
        }
    }
    None
}

fn skip_spaces(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && matches!(bytes[pos], b' ' | b'\t' | b'\n') {
        pos += 1;
    }
    pos
}
