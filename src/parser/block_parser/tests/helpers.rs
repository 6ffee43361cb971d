use crate::config::Config;
use crate::parser::block_parser::BlockParser;
use crate::parser::block_parser::utils::split_lines;
use crate::syntax::{SyntaxKind, SyntaxNode};

pub fn parse_blocks(input: &str) -> SyntaxNode {
    parse_blocks_with(input, &Config::default())
}

pub fn parse_blocks_with(input: &str, config: &Config) -> SyntaxNode {
    let lines = split_lines(input);
    let (tree, _registry) = BlockParser::new(&lines, config).parse();
    tree
}

pub fn find_first(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    node.descendants().find(|n| n.kind() == kind)
}

/// Descendants of `kind` strictly below `node`.
pub fn find_all(node: &SyntaxNode, kind: SyntaxKind) -> Vec<SyntaxNode> {
    node.descendants()
        .skip(1)
        .filter(|n| n.kind() == kind)
        .collect()
}

pub fn child_kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
    node.children().map(|n| n.kind()).collect()
}

pub fn assert_block_kinds(input: &str, expected: &[SyntaxKind]) {
    let document = parse_blocks(input);
    let actual = child_kinds(&document);
    assert_eq!(
        actual, expected,
        "Block kinds did not match for input:\n{}",
        input
    );
}

/// Text of the first token of `kind` below `node`.
pub fn token_text(node: &SyntaxNode, kind: SyntaxKind) -> Option<String> {
    node.descendants_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| t.kind() == kind)
        .map(|t| t.text().to_string())
}

/// Count direct children of a specific kind
pub fn count_children(node: &SyntaxNode, kind: SyntaxKind) -> usize {
    node.children().filter(|n| n.kind() == kind).count()
}
