//! Autolinks (`<scheme:target>`, `<user@host>`) and raw inline HTML.
//!
//! Both are opaque: delimiters inside them never pair.

use std::sync::LazyLock;

use regex::Regex;

use crate::syntax::SyntaxKind;
use rowan::GreenNodeBuilder;

static URI_AUTOLINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<([A-Za-z][A-Za-z0-9+.-]{1,31}:[^\s<>]*)>").unwrap());

static EMAIL_AUTOLINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^<([A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*)>",
    )
    .unwrap()
});

static INLINE_HTML: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?:<[A-Za-z][A-Za-z0-9-]*(?:\s+[A-Za-z_:][A-Za-z0-9_.:-]*(?:\s*=\s*(?:[^\s"'=<>`]+|'[^']*'|"[^"]*"))?)*\s*/?>|</[A-Za-z][A-Za-z0-9-]*\s*>|<!--(?:[^-]|-[^-])*?-->)"#,
    )
    .unwrap()
});

/// Try to parse an autolink at the start of `text`.
/// Returns (total_len, target).
pub(crate) fn try_parse_autolink(text: &str) -> Option<(usize, &str)> {
    if !text.starts_with('<') {
        return None;
    }
    let caps = URI_AUTOLINK
        .captures(text)
        .or_else(|| EMAIL_AUTOLINK.captures(text))?;
    let whole = caps.get(0)?;
    let target = caps.get(1)?;
    Some((whole.end(), target.as_str()))
}

/// Try to parse an open tag, closing tag or comment at the start of `text`.
/// Returns the length of the raw HTML.
pub(crate) fn try_parse_inline_html(text: &str) -> Option<usize> {
    if !text.starts_with('<') {
        return None;
    }
    INLINE_HTML.find(text).map(|m| m.end())
}

pub(crate) fn emit_autolink(builder: &mut GreenNodeBuilder<'static>, target: &str) {
    builder.start_node(SyntaxKind::AUTO_LINK.into());
    builder.token(SyntaxKind::AUTO_LINK_MARKER.into(), "<");
    builder.token(SyntaxKind::TEXT.into(), target);
    builder.token(SyntaxKind::AUTO_LINK_MARKER.into(), ">");
    builder.finish_node();
}

pub(crate) fn emit_inline_html(builder: &mut GreenNodeBuilder<'static>, html: &str) {
    builder.start_node(SyntaxKind::HTML_SPAN.into());
    builder.token(SyntaxKind::HTML_CONTENT.into(), html);
    builder.finish_node();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_autolink() {
        assert_eq!(
            try_parse_autolink("<https://example.com> after"),
            Some((21, "https://example.com"))
        );
        assert_eq!(
            try_parse_autolink("<irc://host/chan>"),
            Some((17, "irc://host/chan"))
        );
    }

    #[test]
    fn test_scheme_length_bounds() {
        assert_eq!(try_parse_autolink("<a:b>"), None);
        let long = format!("<{}:x>", "a".repeat(33));
        assert_eq!(try_parse_autolink(&long), None);
    }

    #[test]
    fn test_email_autolink() {
        assert_eq!(
            try_parse_autolink("<user@example.com>"),
            Some((18, "user@example.com"))
        );
        assert_eq!(try_parse_autolink("<user@>"), None);
    }

    #[test]
    fn test_autolink_rejects_spaces() {
        assert_eq!(try_parse_autolink("<https://a b>"), None);
    }

    #[test]
    fn test_inline_html() {
        assert_eq!(try_parse_inline_html("<span class=\"x\">text"), Some(16));
        assert_eq!(try_parse_inline_html("</span> rest"), Some(7));
        assert_eq!(try_parse_inline_html("<br/>"), Some(5));
        assert_eq!(try_parse_inline_html("<!-- note --> x"), Some(13));
        assert_eq!(try_parse_inline_html("< span>"), None);
        assert_eq!(try_parse_inline_html("a <b>"), None);
    }
}
