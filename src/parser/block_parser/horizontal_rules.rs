//! Thematic break parsing utilities.

use crate::syntax::SyntaxKind;
use rowan::GreenNodeBuilder;

use super::utils::leading_indent;

/// Try to parse a thematic break from a line.
///
/// A thematic break is 3 or more `*`, `-`, or `_` characters,
/// optionally separated by spaces.
pub(crate) fn try_parse_horizontal_rule(line: &str) -> Option<char> {
    if leading_indent(line) > 3 {
        return None;
    }
    let trimmed = line.trim();

    // Must have at least 3 characters
    if trimmed.len() < 3 {
        return None;
    }

    // Determine which character is being used
    let rule_char = trimmed.chars().next()?;
    if !matches!(rule_char, '*' | '-' | '_') {
        return None;
    }

    // Check that the line only contains the rule character and spaces
    let mut count = 0;
    for ch in trimmed.chars() {
        match ch {
            c if c == rule_char => count += 1,
            ' ' => continue,
            _ => return None,
        }
    }

    // Must have at least 3 of the rule character
    if count >= 3 { Some(rule_char) } else { None }
}

/// Emit a thematic break node to the builder.
pub(crate) fn emit_horizontal_rule(builder: &mut GreenNodeBuilder<'static>, line: &str) {
    builder.start_node(SyntaxKind::THEMATIC_BREAK.into());
    builder.token(SyntaxKind::THEMATIC_BREAK_MARKER.into(), line.trim());
    builder.finish_node();
}
