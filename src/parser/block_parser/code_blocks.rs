//! Fenced and indented code blocks.

use crate::parser::normalize::FENCED_BLANK_PAD;
use crate::syntax::SyntaxKind;
use rowan::GreenNodeBuilder;

use super::utils::{leading_indent, strip_indent, strip_leading_spaces};

/// Information about a detected code fence opening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FenceInfo {
    pub fence_char: char,
    pub fence_count: usize,
    pub info_string: String,
}

/// Try to detect a fenced code block opening from content.
/// Returns fence info if this is a valid fence opening.
pub(crate) fn try_parse_fence_open(content: &str) -> Option<FenceInfo> {
    let trimmed = strip_leading_spaces(content);

    // Check for fence opening (``` or ~~~)
    let fence_char = match trimmed.chars().next()? {
        c @ ('`' | '~') => c,
        _ => return None,
    };
    let fence_count = trimmed.chars().take_while(|&c| c == fence_char).count();
    if fence_count < 3 {
        return None;
    }

    let info_string = trimmed[fence_count..].trim();
    // A backtick info string can't contain backticks (that's an inline code span)
    if fence_char == '`' && info_string.contains('`') {
        return None;
    }

    Some(FenceInfo {
        fence_char,
        fence_count,
        info_string: info_string.to_string(),
    })
}

/// Check if a line is a valid closing fence for the given fence info.
pub(crate) fn is_closing_fence(content: &str, fence: &FenceInfo) -> bool {
    let trimmed = strip_leading_spaces(content);

    if !trimmed.starts_with(fence.fence_char) {
        return false;
    }

    let closing_count = trimmed
        .chars()
        .take_while(|&c| c == fence.fence_char)
        .count();

    if closing_count < fence.fence_count {
        return false;
    }

    // Only whitespace after the closing fence
    trimmed[closing_count..].trim().is_empty()
}

/// Emit a fenced code block from a buffer whose first line opens the fence.
/// A missing closing fence runs the block to the end of the buffer.
pub(crate) fn emit_fenced_code_block(
    builder: &mut GreenNodeBuilder<'static>,
    lines: &[String],
    fence: &FenceInfo,
) {
    let indent = lines.first().map(|l| leading_indent(l)).unwrap_or(0);
    let fence_text = fence.fence_char.to_string().repeat(fence.fence_count);

    builder.start_node(SyntaxKind::CODE_BLOCK.into());
    builder.token(SyntaxKind::CODE_FENCE_MARKER.into(), &fence_text);
    if !fence.info_string.is_empty() {
        builder.token(SyntaxKind::CODE_INFO.into(), &fence.info_string);
    }

    let mut content = String::new();
    let mut closing: Option<&str> = None;
    for line in lines.iter().skip(1) {
        if is_closing_fence(line, fence) {
            closing = Some(line.trim());
            break;
        }
        // Content lines lose as much indentation as the opening fence had
        let line = if line.trim().is_empty() {
            line.strip_suffix(FENCED_BLANK_PAD).unwrap_or(line)
        } else {
            line
        };
        content.push_str(strip_indent(line, indent));
        content.push('\n');
    }

    if !content.is_empty() {
        builder.token(SyntaxKind::CODE_CONTENT.into(), &content);
    }
    if let Some(closing) = closing {
        builder.token(SyntaxKind::CODE_FENCE_MARKER.into(), closing);
    } else {
        log::debug!("Fence {} left open; closing at end of block", fence_text);
    }
    builder.finish_node(); // CODE_BLOCK
}

/// A buffer is indented code when every non-blank line has 4+ leading spaces.
pub(crate) fn is_indented_code(lines: &[String]) -> bool {
    lines.iter().any(|l| !l.trim().is_empty())
        && lines
            .iter()
            .all(|l| l.trim().is_empty() || leading_indent(l) >= 4)
}

pub(crate) fn emit_indented_code_block(builder: &mut GreenNodeBuilder<'static>, lines: &[String]) {
    let mut content = String::new();
    for line in lines {
        content.push_str(strip_indent(line, 4));
        content.push('\n');
    }

    builder.start_node(SyntaxKind::CODE_BLOCK.into());
    builder.token(SyntaxKind::CODE_CONTENT.into(), &content);
    builder.finish_node(); // CODE_BLOCK
}
