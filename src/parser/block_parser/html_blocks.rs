//! HTML block parsing utilities.

use std::sync::LazyLock;

use regex::Regex;

use crate::syntax::SyntaxKind;
use rowan::GreenNodeBuilder;

use super::utils::strip_leading_spaces;

/// Block-level HTML tag names from CommonMark.
/// These tags start an HTML block when found at the start of a line.
const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "base",
    "basefont",
    "blockquote",
    "body",
    "caption",
    "center",
    "col",
    "colgroup",
    "dd",
    "details",
    "dialog",
    "dir",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "frame",
    "frameset",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "head",
    "header",
    "hr",
    "html",
    "iframe",
    "legend",
    "li",
    "link",
    "main",
    "menu",
    "menuitem",
    "nav",
    "noframes",
    "ol",
    "optgroup",
    "option",
    "p",
    "param",
    "pre",
    "script",
    "section",
    "source",
    "style",
    "summary",
    "table",
    "tbody",
    "td",
    "textarea",
    "tfoot",
    "th",
    "thead",
    "title",
    "tr",
    "track",
    "ul",
];

/// A complete open or closing tag alone on its line.
static LONE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?:<[A-Za-z][A-Za-z0-9-]*(?:\s+[A-Za-z_:][A-Za-z0-9_.:-]*(?:\s*=\s*(?:[^\s"'=<>`]+|'[^']*'|"[^"]*"))?)*\s*/?>|</[A-Za-z][A-Za-z0-9-]*\s*>)\s*$"#,
    )
    .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HtmlBlockType {
    /// HTML comment: <!-- ... -->
    Comment,
    /// Processing instruction: <? ... ?>
    ProcessingInstruction,
    /// Declaration: <!DOCTYPE ...>
    Declaration,
    /// CDATA section: <![CDATA[ ... ]]>
    CData,
    /// Block-level tag, opening or closing
    BlockTag { tag_name: String },
    /// Any other complete tag alone on its line
    LoneTag,
}

/// Opening constructs recognized by prefix alone, tried in order.
const PREFIXES: [(&str, HtmlBlockType); 3] = [
    ("<!--", HtmlBlockType::Comment),
    ("<?", HtmlBlockType::ProcessingInstruction),
    ("<![CDATA[", HtmlBlockType::CData),
];

/// Classify the first line of a buffer as an HTML block opening.
pub(crate) fn try_parse_html_block_start(content: &str) -> Option<HtmlBlockType> {
    let line = strip_leading_spaces(content);
    let rest = line.strip_prefix('<')?;

    if let Some((_, kind)) = PREFIXES.iter().find(|(prefix, _)| line.starts_with(prefix)) {
        return Some(kind.clone());
    }
    if rest
        .strip_prefix('!')
        .and_then(|decl| decl.chars().next())
        .is_some_and(|c| c.is_ascii_alphabetic())
    {
        return Some(HtmlBlockType::Declaration);
    }

    match tag_name(rest) {
        Some(name) if BLOCK_TAGS.contains(&name.as_str()) => {
            Some(HtmlBlockType::BlockTag { tag_name: name })
        }
        _ if LONE_TAG.is_match(line) => Some(HtmlBlockType::LoneTag),
        _ => None,
    }
}

/// Lowercased name of the tag opening `rest` (the text after `<`).
fn tag_name(rest: &str) -> Option<String> {
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    let end = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    let name = &rest[..end];
    let terminated = rest[end..]
        .chars()
        .next()
        .is_none_or(|c| c.is_whitespace() || c == '>' || c == '/');
    if !terminated || !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    Some(name.to_ascii_lowercase())
}

/// Emit the whole buffer as one raw HTML block.
pub(crate) fn emit_html_block(builder: &mut GreenNodeBuilder<'static>, lines: &[String]) {
    let mut content = String::new();
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    builder.start_node(SyntaxKind::HTML_BLOCK.into());
    builder.token(SyntaxKind::HTML_CONTENT.into(), &content);
    builder.finish_node();
}
