//! Backslash escapes.
//!
//! A backslash followed by an ASCII punctuation character produces that
//! character literally. Any other backslash is ordinary text.

use crate::syntax::SyntaxKind;
use rowan::GreenNodeBuilder;

/// Try to parse an escape at the start of `text`.
/// Returns the escaped character; the sequence is always two bytes long.
pub(crate) fn try_parse_escape(text: &str) -> Option<char> {
    let mut chars = text.chars();
    if chars.next()? != '\\' {
        return None;
    }
    chars.next().filter(|c| c.is_ascii_punctuation())
}

pub(crate) fn emit_escape(builder: &mut GreenNodeBuilder<'static>, ch: char) {
    builder.start_node(SyntaxKind::ESCAPE.into());
    builder.token(SyntaxKind::BACKSLASH.into(), "\\");
    builder.token(SyntaxKind::ESCAPED_CHAR.into(), ch.encode_utf8(&mut [0; 4]));
    builder.finish_node();
}

/// Resolve backslash escapes in link destinations, titles and definitions.
pub(crate) fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&next) = chars.peek()
            && next.is_ascii_punctuation()
        {
            out.push(next);
            chars.next();
            continue;
        }
        out.push(c);
    }
    out
}
