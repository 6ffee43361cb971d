//! Structural properties of parsed documents, checked through the public API.

use sprig::syntax::{
    Alignment, AstNode, CodeBlock, EscapeSequence, Link, List, SyntaxKind, Table,
};
use sprig::{Config, Document, Node, parse, parse_lines, render_markdown};

fn paragraph_children(doc: &Document) -> Vec<Node> {
    match doc.blocks().as_slice() {
        [paragraph @ Node::Paragraph(_)] => paragraph.children(),
        other => panic!("expected one paragraph, got {other:?}"),
    }
}

fn kinds(nodes: &[Node]) -> Vec<SyntaxKind> {
    nodes.iter().map(Node::kind).collect()
}

const CORPUS: &[&str] = &[
    "# Title\n\nSome *emphasis*, **strong** and `code`.\n\n> A quote\n> with lazy\ncontinuation\n\n- one\n- two\n    - nested\n- three\n\n1. first\n2. second\n\n| a | b |\n|:--|--:|\n| 1 | 2 |\n\n```rust\nfn main() {}\n```\n\n---\n\nSee [the docs][docs] and <https://example.com>.\n\n[docs]: https://example.com/docs \"Docs\"\n",
    "Title\n=====\n\n    indented code\n\n<div>\n<p>raw</p>\n</div>\n\nText with \\*escapes\\* and ~~strike~~.\n",
    "- a\n\n    second paragraph\n- b\n\n> outer\n>\n> > inner\n",
    "An ![image *alt*](/img.png \"Title\") and [link](/url 'T') <me@example.com>.\n",
    "3) three\n* not the same list\n\n+ x\n    10. y\n    11. z\n",
];

#[test]
fn markdown_rendering_is_idempotent() {
    for input in CORPUS {
        let once = render_markdown(&parse(input));
        let twice = render_markdown(&parse(&once));
        similar_asserts::assert_eq!(once, twice, "input:\n{}", input);
    }
}

#[test]
fn sibling_emphasis() {
    let children = paragraph_children(&parse("*a* *b*"));
    assert_eq!(
        kinds(&children),
        vec![SyntaxKind::EMPHASIS, SyntaxKind::TEXT, SyntaxKind::EMPHASIS]
    );
}

#[test]
fn double_delimiters_are_strong() {
    let children = paragraph_children(&parse("**a**"));
    assert_eq!(kinds(&children), vec![SyntaxKind::STRONG]);
}

#[test]
fn triple_delimiters_nest_emphasis_in_strong() {
    let children = paragraph_children(&parse("***a***"));
    let [strong @ Node::Strong(_)] = children.as_slice() else {
        panic!("expected strong, got {children:?}");
    };
    let inner = strong.children();
    let [emphasis @ Node::Emphasis(_)] = inner.as_slice() else {
        panic!("expected emphasis, got {inner:?}");
    };
    let text: Vec<_> = emphasis.children().iter().filter_map(Node::text).collect();
    assert_eq!(text, ["a"]);
}

#[test]
fn emphasis_never_spans_intraword_stars() {
    let doc = parse("*a*b*c*");
    let spans: Vec<String> = doc
        .root()
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::EMPHASIS)
        .map(|n| n.to_string())
        .collect();
    assert!(!spans.iter().any(|s| s == "*a*b*c*"));
}

#[test]
fn nested_list_from_lines() {
    let doc = parse_lines(
        &["- item 1\n", "    - nested\n", "- item 2\n"],
        &Config::default(),
    );
    let blocks = doc.blocks();
    let [Node::List(list)] = blocks.as_slice() else {
        panic!("expected one list, got {blocks:?}");
    };
    let children = Node::List(list.clone()).children();
    assert_eq!(
        kinds(&children),
        vec![SyntaxKind::LIST_ITEM, SyntaxKind::LIST, SyntaxKind::LIST_ITEM]
    );
    let Node::List(nested) = &children[1] else {
        panic!("expected nested list");
    };
    assert_eq!(nested.items().count(), 1);
    assert_eq!(
        list.items().count(),
        2,
        "nested items don't count toward the outer list"
    );
}

#[test]
fn table_alignment_reaches_body_cells() {
    let doc = parse("| l | c | r |\n|:--|:-:|--:|\n| 1 | 2 | 3 |\n| 4 | 5 | 6 |\n");
    let table = doc.root().descendants().find_map(Table::cast).unwrap();
    for row in table.rows() {
        let aligns: Vec<_> = row.cells().map(|c| c.alignment()).collect();
        assert_eq!(
            aligns,
            vec![Alignment::Left, Alignment::Center, Alignment::Right]
        );
    }
}

#[test]
fn fenced_code_is_never_tokenized() {
    let input = "```\n*not emphasis* [not](link) `x`\n# not heading\n```\n";
    let doc = parse(input);
    let code = doc.root().descendants().find_map(CodeBlock::cast).unwrap();
    assert_eq!(code.content(), "*not emphasis* [not](link) `x`\n# not heading\n");
    assert_eq!(code.syntax().children().count(), 0);
}

#[test]
fn forward_reference_resolves() {
    let doc = parse("Read [the guide][guide].\n\n[guide]: /guide \"Guide\"\n");
    let link = doc.root().descendants().find_map(Link::cast).unwrap();
    assert_eq!(link.label().as_deref(), Some("guide"));
    assert_eq!(
        doc.link_target(&link),
        Some(("/guide".to_string(), Some("Guide".to_string())))
    );
}

#[test]
fn escaped_star_is_one_escape() {
    let children = paragraph_children(&parse(r"\*"));
    let [Node::Escape(escape)] = children.as_slice() else {
        panic!("expected a single escape, got {children:?}");
    };
    assert_eq!(escape.character(), Some('*'));
    assert!(EscapeSequence::can_cast(escape.syntax().kind()));
}

#[test]
fn parent_links_reach_the_document() {
    let doc = parse("> - [x](/y)");
    let link = doc.root().descendants().find_map(Link::cast).unwrap();
    let top = std::iter::successors(Some(Node::Link(link)), Node::parent).last();
    assert!(matches!(top, Some(Node::Document(_))));
}

#[test]
fn lists_inside_blocks_are_typed() {
    let doc = parse("> 2. two\n> 3. three\n");
    let list = doc.root().descendants().find_map(List::cast).unwrap();
    assert!(list.ordered());
    assert_eq!(list.start(), Some(2));
}
