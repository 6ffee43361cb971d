//! Syntax kinds and language definition for the Markdown tree.

use rowan::Language;

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // Tokens
    TEXT = 0,
    BACKSLASH,             // \ (for escaping)
    ESCAPED_CHAR,          // The escaped character
    HEADING_MARKER,        // leading ###
    SETEXT_UNDERLINE,      // ===== or -----
    LIST_MARKER,           // - + * 1. 1)
    CODE_FENCE_MARKER,     // ``` or ~~~
    CODE_INFO,             // info string after the opening fence
    CODE_CONTENT,          // raw code (blocks and spans)
    THEMATIC_BREAK_MARKER, // --- or *** or ___
    TABLE_DELIMITER,       // |:---|:---:|
    HTML_CONTENT,          // raw html (blocks and spans)
    EMPHASIS_MARKER,       // * or _
    STRONG_MARKER,         // ** or __
    STRIKETHROUGH_MARKER,  // ~~
    CODE_SPAN_MARKER,      // ` or `` ...
    LINK_START,            // [
    LINK_TEXT_END,         // ]
    LINK_DEST_START,       // (
    LINK_DEST,             // url
    LINK_TITLE,            // "title"
    LINK_DEST_END,         // )
    LINK_LABEL,            // [label] of a reference link
    IMAGE_START,           // ![
    IMAGE_ALT,             // alt text, flattened
    IMAGE_ALT_END,         // ]
    AUTO_LINK_MARKER,      // < and >

    // Block nodes
    DOCUMENT,
    HEADING,
    HEADING_CONTENT,
    BLOCKQUOTE,
    PARAGRAPH,
    CODE_BLOCK,
    LIST,
    LIST_ITEM,
    TABLE,
    TABLE_HEADER,
    TABLE_ROW,
    TABLE_CELL,
    THEMATIC_BREAK,
    HTML_BLOCK,

    // Span nodes
    STRONG,
    EMPHASIS,
    STRIKETHROUGH,
    INLINE_CODE,
    LINK,
    LINK_TEXT,
    IMAGE,
    AUTO_LINK,
    ESCAPE,
    HTML_SPAN,
}

impl SyntaxKind {
    /// The variant with the highest discriminant. `kind_from_raw` trusts this
    /// bound, so it must move whenever a variant is appended to the enum.
    const LAST: SyntaxKind = SyntaxKind::HTML_SPAN;

    pub fn is_block(self) -> bool {
        (SyntaxKind::DOCUMENT as u16..=SyntaxKind::HTML_BLOCK as u16).contains(&(self as u16))
            && !matches!(
                self,
                SyntaxKind::HEADING_CONTENT
                    | SyntaxKind::TABLE_HEADER
                    | SyntaxKind::TABLE_ROW
                    | SyntaxKind::TABLE_CELL
                    | SyntaxKind::LIST_ITEM
            )
    }

    /// Kinds whose children are produced by the inline parser.
    pub fn is_inline_container(self) -> bool {
        matches!(
            self,
            SyntaxKind::PARAGRAPH
                | SyntaxKind::HEADING_CONTENT
                | SyntaxKind::TABLE_CELL
                | SyntaxKind::LIST_ITEM
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkdownLanguage {}

impl Language for MarkdownLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::LAST as u16);
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<MarkdownLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<MarkdownLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<MarkdownLanguage>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_kind_round_trips() {
        let raw = rowan::SyntaxKind(SyntaxKind::LAST as u16);
        assert_eq!(MarkdownLanguage::kind_from_raw(raw), SyntaxKind::HTML_SPAN);
        assert_eq!(
            MarkdownLanguage::kind_to_raw(SyntaxKind::DOCUMENT),
            rowan::SyntaxKind(SyntaxKind::DOCUMENT as u16)
        );
    }
}
