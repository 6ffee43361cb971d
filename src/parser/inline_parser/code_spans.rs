/// Parsing for inline code spans (`code`)
use crate::syntax::SyntaxKind;
use rowan::GreenNodeBuilder;

/// Try to parse a code span starting at the current position.
/// Returns (total_len, code_content, backtick_count) if successful.
pub(crate) fn try_parse_code_span(text: &str) -> Option<(usize, &str, usize)> {
    // Count opening backticks
    let opening_backticks = text.bytes().take_while(|&b| b == b'`').count();
    if opening_backticks == 0 {
        return None;
    }

    let rest = &text[opening_backticks..];

    // Look for matching closing backticks
    let mut pos = 0;
    while pos < rest.len() {
        if rest[pos..].starts_with('`') {
            let closing_backticks = rest[pos..].bytes().take_while(|&b| b == b'`').count();

            if closing_backticks == opening_backticks {
                let after_close = opening_backticks + pos + closing_backticks;
                return Some((after_close, strip_padding(&rest[..pos]), opening_backticks));
            }
            // Skip these backticks and continue searching
            pos += closing_backticks;
        } else {
            // Move to next character (handle UTF-8 properly)
            pos += rest[pos..].chars().next()?.len_utf8();
        }
    }

    // No matching close found
    None
}

/// One leading and one trailing space are removed when both are present,
/// unless the content is only spaces.
fn strip_padding(content: &str) -> &str {
    if content.len() >= 2
        && content.starts_with(' ')
        && content.ends_with(' ')
        && !content.bytes().all(|b| b == b' ')
    {
        &content[1..content.len() - 1]
    } else {
        content
    }
}

/// Emit a code span node to the builder.
pub(crate) fn emit_code_span(
    builder: &mut GreenNodeBuilder<'static>,
    content: &str,
    backtick_count: usize,
) {
    builder.start_node(SyntaxKind::INLINE_CODE.into());

    let fence = "`".repeat(backtick_count);
    builder.token(SyntaxKind::CODE_SPAN_MARKER.into(), &fence);
    builder.token(SyntaxKind::CODE_CONTENT.into(), content);
    builder.token(SyntaxKind::CODE_SPAN_MARKER.into(), &fence);

    builder.finish_node();
}
