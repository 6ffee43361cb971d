use crate::config::{Config, Extensions};
use crate::parser::block_parser::tests::helpers::{
    assert_block_kinds, child_kinds, find_all, find_first, parse_blocks, parse_blocks_with,
    token_text,
};
use crate::syntax::{AstNode, CodeBlock, Heading, SyntaxKind};

#[test]
fn paragraphs_split_on_blank_lines() {
    assert_block_kinds(
        "Paragraph 1\n\n\n\nParagraph 2\n",
        &[SyntaxKind::PARAGRAPH, SyntaxKind::PARAGRAPH],
    );
}

#[test]
fn paragraph_lines_are_joined() {
    let tree = parse_blocks("first line\n   second line  \nthird\n");
    let para = find_first(&tree, SyntaxKind::PARAGRAPH).unwrap();
    assert_eq!(para.to_string(), "first line second line third");
}

#[test]
fn empty_input_has_no_blocks() {
    assert_block_kinds("", &[]);
    assert_block_kinds("\n\n   \n", &[]);
}

#[test]
fn atx_heading_flushes_without_blank_line() {
    assert_block_kinds(
        "text before\n# Heading\ntext after\n",
        &[
            SyntaxKind::PARAGRAPH,
            SyntaxKind::HEADING,
            SyntaxKind::PARAGRAPH,
        ],
    );
}

#[test]
fn atx_heading_level_and_text() {
    let tree = parse_blocks("### Third level ###\n");
    let heading = Heading::cast(find_first(&tree, SyntaxKind::HEADING).unwrap()).unwrap();
    assert_eq!(heading.level(), 3);
    assert_eq!(heading.text(), "Third level");
    assert!(!heading.is_setext());
}

#[test]
fn hashes_without_space_are_text() {
    assert_block_kinds("#hashtag\n", &[SyntaxKind::PARAGRAPH]);
}

#[test]
fn setext_headings() {
    let tree = parse_blocks("Title\n=====\n\nSubtitle\nover two lines\n---\n");
    let headings: Vec<_> = find_all(&tree, SyntaxKind::HEADING)
        .into_iter()
        .filter_map(Heading::cast)
        .collect();
    assert_eq!(headings.len(), 2);
    assert_eq!(headings[0].level(), 1);
    assert_eq!(headings[0].text(), "Title");
    assert_eq!(headings[1].level(), 2);
    assert_eq!(headings[1].text(), "Subtitle over two lines");
    assert!(headings[1].is_setext());
}

#[test]
fn lone_dashes_are_thematic_break() {
    assert_block_kinds(
        "para\n\n---\n\n* * *\n",
        &[
            SyntaxKind::PARAGRAPH,
            SyntaxKind::THEMATIC_BREAK,
            SyntaxKind::THEMATIC_BREAK,
        ],
    );
}

#[test]
fn quote_is_tokenized_recursively() {
    let tree = parse_blocks("> # Inside\n> some text\n> more text\n");
    let quote = find_first(&tree, SyntaxKind::BLOCKQUOTE).unwrap();
    assert_eq!(
        child_kinds(&quote),
        vec![SyntaxKind::HEADING, SyntaxKind::PARAGRAPH]
    );
}

#[test]
fn quote_keeps_lazy_lines() {
    let tree = parse_blocks("> quoted\nlazy continuation\n");
    let quote = find_first(&tree, SyntaxKind::BLOCKQUOTE).unwrap();
    let para = find_first(&quote, SyntaxKind::PARAGRAPH).unwrap();
    assert_eq!(para.to_string(), "quoted lazy continuation");
}

#[test]
fn nested_quotes() {
    let tree = parse_blocks("> outer\n>\n> > inner\n");
    let quotes = find_all(&tree, SyntaxKind::BLOCKQUOTE);
    assert_eq!(quotes.len(), 2);
    assert_eq!(
        child_kinds(&quotes[0]),
        vec![SyntaxKind::PARAGRAPH, SyntaxKind::BLOCKQUOTE]
    );
}

#[test]
fn quote_depth_ceiling_becomes_paragraph() {
    let config = Config::builder().max_nesting_depth(2).build().unwrap();
    let tree = parse_blocks_with(">>> deep\n", &config);
    let quotes = find_all(&tree, SyntaxKind::BLOCKQUOTE);
    assert_eq!(quotes.len(), 2);
    let para = find_first(&quotes[1], SyntaxKind::PARAGRAPH).unwrap();
    assert_eq!(para.to_string(), "> deep");
}

#[test]
fn fenced_code_is_not_tokenized() {
    let input = "```rust\nlet x = *a*;\n\n# not a heading\n```\n";
    let tree = parse_blocks(input);
    assert_eq!(child_kinds(&tree), vec![SyntaxKind::CODE_BLOCK]);

    let code = CodeBlock::cast(find_first(&tree, SyntaxKind::CODE_BLOCK).unwrap()).unwrap();
    assert!(code.is_fenced());
    assert_eq!(code.language().as_deref(), Some("rust"));
    assert_eq!(code.content(), "let x = *a*;\n\n# not a heading\n");
    assert!(find_first(&tree, SyntaxKind::HEADING).is_none());
}

#[test]
fn fence_interrupts_paragraph() {
    assert_block_kinds(
        "text\n~~~\ncode\n~~~\nmore text\n",
        &[
            SyntaxKind::PARAGRAPH,
            SyntaxKind::CODE_BLOCK,
            SyntaxKind::PARAGRAPH,
        ],
    );
}

#[test]
fn unclosed_fence_runs_to_end() {
    let tree = parse_blocks("```\ncode\n\nstill code\n");
    assert_eq!(child_kinds(&tree), vec![SyntaxKind::CODE_BLOCK]);
    assert_eq!(
        token_text(&tree, SyntaxKind::CODE_CONTENT).as_deref(),
        Some("code\n\nstill code\n")
    );
}

#[test]
fn fenced_whitespace_lines_are_kept() {
    let tree = parse_blocks("```\na\n \nb\n\nc\n```\n");
    assert_eq!(child_kinds(&tree), vec![SyntaxKind::CODE_BLOCK]);
    assert_eq!(
        token_text(&tree, SyntaxKind::CODE_CONTENT).as_deref(),
        Some("a\n \nb\n\nc\n")
    );
}

#[test]
fn fenced_whitespace_lines_are_kept_inside_quotes() {
    let tree = parse_blocks("> ```\n>\n>  \n> ```\n");
    assert_eq!(
        token_text(&tree, SyntaxKind::CODE_CONTENT).as_deref(),
        Some("\n \n")
    );
}

#[test]
fn closing_fence_needs_opening_length() {
    let tree = parse_blocks("````\n```\n````\n");
    assert_eq!(
        token_text(&tree, SyntaxKind::CODE_CONTENT).as_deref(),
        Some("```\n")
    );
}

#[test]
fn indented_code() {
    let tree = parse_blocks("    fn main() {}\n      indented\n");
    let code = CodeBlock::cast(find_first(&tree, SyntaxKind::CODE_BLOCK).unwrap()).unwrap();
    assert!(!code.is_fenced());
    assert_eq!(code.content(), "fn main() {}\n  indented\n");
}

#[test]
fn tabs_expand_to_indented_code() {
    assert_block_kinds("\tcode\n", &[SyntaxKind::CODE_BLOCK]);
}

#[test]
fn html_block_is_opaque() {
    let tree = parse_blocks("<div>\n*not emphasis*\n</div>\n");
    assert_eq!(child_kinds(&tree), vec![SyntaxKind::HTML_BLOCK]);
    assert_eq!(
        token_text(&tree, SyntaxKind::HTML_CONTENT).as_deref(),
        Some("<div>\n*not emphasis*\n</div>\n")
    );
}

#[test]
fn reference_definitions_emit_no_node() {
    let lines = ["[foo]: /url \"Title\"\n", "\n", "Text\n"];
    let (tree, registry) =
        crate::parser::block_parser::BlockParser::new(&lines, &Config::default()).parse();
    assert_eq!(child_kinds(&tree), vec![SyntaxKind::PARAGRAPH]);
    let def = registry.get("FOO").unwrap();
    assert_eq!(def.url, "/url");
    assert_eq!(def.title.as_deref(), Some("Title"));
}

#[test]
fn definitions_peeled_before_paragraph() {
    let lines = ["[a]: /a\n", "[b]: /b\n", "Paragraph text\n"];
    let (tree, registry) =
        crate::parser::block_parser::BlockParser::new(&lines, &Config::default()).parse();
    assert_eq!(child_kinds(&tree), vec![SyntaxKind::PARAGRAPH]);
    assert_eq!(registry.len(), 2);
}

#[test]
fn disabled_kinds_fall_back_to_paragraph() {
    let config = Config::builder()
        .extensions(Extensions {
            atx_headings: false,
            block_quotes: false,
            ..Extensions::default()
        })
        .build()
        .unwrap();
    let tree = parse_blocks_with("# not heading\n\n> not quote\n", &config);
    assert_eq!(
        child_kinds(&tree),
        vec![SyntaxKind::PARAGRAPH, SyntaxKind::PARAGRAPH]
    );
}

#[test]
fn crlf_line_endings() {
    assert_block_kinds(
        "# Title\r\n\r\nBody\r\n",
        &[SyntaxKind::HEADING, SyntaxKind::PARAGRAPH],
    );
}
