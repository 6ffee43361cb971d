//! Closed view over every node kind, for renderers and tree walks.

use super::*;

/// One node of the parsed document.
///
/// Helper nodes (`HEADING_CONTENT`, `TABLE_HEADER`, `LINK_TEXT`) and marker
/// tokens are not part of this view; their content is flattened into the
/// owning node's `children()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Document(DocumentNode),
    Heading(Heading),
    Quote(Quote),
    Paragraph(Paragraph),
    CodeBlock(CodeBlock),
    List(List),
    ListItem(ListItem),
    Table(Table),
    TableRow(TableRow),
    TableCell(TableCell),
    ThematicBreak(ThematicBreak),
    HtmlBlock(HtmlBlock),
    Strong(Strong),
    Emphasis(Emphasis),
    Strikethrough(Strikethrough),
    InlineCode(InlineCode),
    Link(Link),
    Image(Image),
    AutoLink(AutoLink),
    Escape(EscapeSequence),
    HtmlSpan(HtmlSpan),
    RawText(SyntaxToken),
}

impl Node {
    /// Casts a syntax node; `None` for helper kinds.
    pub fn cast(syntax: SyntaxNode) -> Option<Self> {
        let node = match syntax.kind() {
            SyntaxKind::DOCUMENT => Node::Document(DocumentNode::cast(syntax)?),
            SyntaxKind::HEADING => Node::Heading(Heading::cast(syntax)?),
            SyntaxKind::BLOCKQUOTE => Node::Quote(Quote::cast(syntax)?),
            SyntaxKind::PARAGRAPH => Node::Paragraph(Paragraph::cast(syntax)?),
            SyntaxKind::CODE_BLOCK => Node::CodeBlock(CodeBlock::cast(syntax)?),
            SyntaxKind::LIST => Node::List(List::cast(syntax)?),
            SyntaxKind::LIST_ITEM => Node::ListItem(ListItem::cast(syntax)?),
            SyntaxKind::TABLE => Node::Table(Table::cast(syntax)?),
            SyntaxKind::TABLE_ROW => Node::TableRow(TableRow::cast(syntax)?),
            SyntaxKind::TABLE_CELL => Node::TableCell(TableCell::cast(syntax)?),
            SyntaxKind::THEMATIC_BREAK => Node::ThematicBreak(ThematicBreak::cast(syntax)?),
            SyntaxKind::HTML_BLOCK => Node::HtmlBlock(HtmlBlock::cast(syntax)?),
            SyntaxKind::STRONG => Node::Strong(Strong::cast(syntax)?),
            SyntaxKind::EMPHASIS => Node::Emphasis(Emphasis::cast(syntax)?),
            SyntaxKind::STRIKETHROUGH => Node::Strikethrough(Strikethrough::cast(syntax)?),
            SyntaxKind::INLINE_CODE => Node::InlineCode(InlineCode::cast(syntax)?),
            SyntaxKind::LINK => Node::Link(Link::cast(syntax)?),
            SyntaxKind::IMAGE => Node::Image(Image::cast(syntax)?),
            SyntaxKind::AUTO_LINK => Node::AutoLink(AutoLink::cast(syntax)?),
            SyntaxKind::ESCAPE => Node::Escape(EscapeSequence::cast(syntax)?),
            SyntaxKind::HTML_SPAN => Node::HtmlSpan(HtmlSpan::cast(syntax)?),
            _ => return None,
        };
        Some(node)
    }

    /// Casts a tree element; text tokens become `RawText`, markers are skipped.
    pub fn cast_element(element: SyntaxElement) -> Option<Self> {
        match element {
            rowan::NodeOrToken::Node(node) => Self::cast(node),
            rowan::NodeOrToken::Token(token) if token.kind() == SyntaxKind::TEXT => {
                Some(Node::RawText(token))
            }
            rowan::NodeOrToken::Token(_) => None,
        }
    }

    /// Underlying syntax node; `None` for raw text.
    pub fn syntax(&self) -> Option<&SyntaxNode> {
        let node = match self {
            Node::Document(n) => n.syntax(),
            Node::Heading(n) => n.syntax(),
            Node::Quote(n) => n.syntax(),
            Node::Paragraph(n) => n.syntax(),
            Node::CodeBlock(n) => n.syntax(),
            Node::List(n) => n.syntax(),
            Node::ListItem(n) => n.syntax(),
            Node::Table(n) => n.syntax(),
            Node::TableRow(n) => n.syntax(),
            Node::TableCell(n) => n.syntax(),
            Node::ThematicBreak(n) => n.syntax(),
            Node::HtmlBlock(n) => n.syntax(),
            Node::Strong(n) => n.syntax(),
            Node::Emphasis(n) => n.syntax(),
            Node::Strikethrough(n) => n.syntax(),
            Node::InlineCode(n) => n.syntax(),
            Node::Link(n) => n.syntax(),
            Node::Image(n) => n.syntax(),
            Node::AutoLink(n) => n.syntax(),
            Node::Escape(n) => n.syntax(),
            Node::HtmlSpan(n) => n.syntax(),
            Node::RawText(_) => return None,
        };
        Some(node)
    }

    pub fn kind(&self) -> SyntaxKind {
        match self {
            Node::RawText(token) => token.kind(),
            other => other
                .syntax()
                .map(|n| n.kind())
                .unwrap_or(SyntaxKind::TEXT),
        }
    }

    /// Parent node in the closed view, skipping helper nodes.
    pub fn parent(&self) -> Option<Node> {
        let start = match self {
            Node::RawText(token) => token.parent(),
            other => other.syntax().and_then(|n| n.parent()),
        }?;
        start.ancestors().find_map(Node::cast)
    }

    /// Ordered children. Leaf kinds return an empty vector.
    pub fn children(&self) -> Vec<Node> {
        let container = match self {
            Node::CodeBlock(_)
            | Node::ThematicBreak(_)
            | Node::HtmlBlock(_)
            | Node::InlineCode(_)
            | Node::Image(_)
            | Node::AutoLink(_)
            | Node::Escape(_)
            | Node::HtmlSpan(_)
            | Node::RawText(_) => return Vec::new(),
            Node::Heading(h) => match h.content() {
                Some(content) => content.syntax().clone(),
                None => return Vec::new(),
            },
            Node::Link(l) => match l.text() {
                Some(text) => text.syntax().clone(),
                None => return Vec::new(),
            },
            Node::Table(t) => {
                return t
                    .header()
                    .into_iter()
                    .chain(t.rows())
                    .map(Node::TableRow)
                    .collect();
            }
            other => match other.syntax() {
                Some(node) => node.clone(),
                None => return Vec::new(),
            },
        };
        container
            .children_with_tokens()
            .filter_map(Node::cast_element)
            .collect()
    }

    /// Raw text of a `RawText` node.
    pub fn text(&self) -> Option<String> {
        match self {
            Node::RawText(token) => Some(token.text().to_string()),
            _ => None,
        }
    }
}
