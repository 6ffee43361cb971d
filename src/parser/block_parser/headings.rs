//! ATX and setext heading parsing utilities.

use crate::syntax::SyntaxKind;
use rowan::GreenNodeBuilder;

use super::utils::emit_text;

/// Try to parse an ATX heading from content, returns heading level (1-6) if found.
pub(crate) fn try_parse_atx_heading(content: &str) -> Option<usize> {
    let trimmed = content.trim_start();

    // Must start with 1-6 # characters
    let hash_count = trimmed.chars().take_while(|&c| c == '#').count();
    if hash_count == 0 || hash_count > 6 {
        return None;
    }

    // After hashes, must be end of line or space
    let after_hashes = &trimmed[hash_count..];
    if !after_hashes.is_empty() && !after_hashes.starts_with(' ') {
        return None;
    }

    // Check leading spaces (max 3)
    let leading_spaces = content.len() - trimmed.len();
    if leading_spaces > 3 {
        return None;
    }

    Some(hash_count)
}

/// Heading text with the optional closing `#` sequence removed.
pub(crate) fn atx_heading_text(content: &str, level: usize) -> &str {
    let text = content.trim_start()[level..].trim();
    let without_hashes = text.trim_end_matches('#');
    if without_hashes.is_empty() {
        return "";
    }
    // Closing sequence must be preceded by a space
    if without_hashes.len() != text.len() && without_hashes.ends_with(' ') {
        without_hashes.trim_end()
    } else {
        text
    }
}

/// Emit an ATX heading node to the builder.
pub(crate) fn emit_atx_heading(builder: &mut GreenNodeBuilder<'static>, content: &str, level: usize) {
    builder.start_node(SyntaxKind::HEADING.into());
    builder.token(SyntaxKind::HEADING_MARKER.into(), &"#".repeat(level));
    builder.start_node(SyntaxKind::HEADING_CONTENT.into());
    emit_text(builder, atx_heading_text(content, level));
    builder.finish_node(); // HEADING_CONTENT
    builder.finish_node(); // HEADING
}

/// Setext underline: a run of `=` or of `-`, up to 3 spaces indent, trailing spaces allowed.
/// Returns the level (1 for `=`, 2 for `-`).
pub(crate) fn try_parse_setext_underline(line: &str) -> Option<usize> {
    let leading = line.len() - line.trim_start_matches(' ').len();
    if leading > 3 {
        return None;
    }
    let trimmed = line.trim();
    let first = trimmed.chars().next()?;
    if !matches!(first, '=' | '-') || !trimmed.chars().all(|c| c == first) {
        return None;
    }
    Some(if first == '=' { 1 } else { 2 })
}

/// Emit a setext heading from its text lines and underline.
pub(crate) fn emit_setext_heading(
    builder: &mut GreenNodeBuilder<'static>,
    text: &str,
    underline: &str,
) {
    builder.start_node(SyntaxKind::HEADING.into());
    builder.start_node(SyntaxKind::HEADING_CONTENT.into());
    emit_text(builder, text);
    builder.finish_node(); // HEADING_CONTENT
    builder.token(SyntaxKind::SETEXT_UNDERLINE.into(), underline.trim());
    builder.finish_node(); // HEADING
}
