//! Parser module containing the normalizer, block and inline parsers.

use crate::config::Config;
use crate::syntax::SyntaxNode;

pub mod block_parser;
pub mod inline_parser;
pub mod normalize;

// Re-export commonly used types
pub use block_parser::{BlockParser, ReferenceDefinition, ReferenceRegistry, normalize_label};
pub use inline_parser::{InlineContext, InlineParser, tokenize_inline};

/// Parses a line stream into a syntax tree and its reference table.
///
/// Runs the block parser over the whole document first, so that the inline
/// pass sees every reference definition, including ones that appear after
/// their use.
pub fn parse_lines<S: AsRef<str>>(lines: &[S], config: &Config) -> (SyntaxNode, ReferenceRegistry) {
    let (block_tree, reference_registry) = BlockParser::new(lines, config).parse();
    let tree = InlineParser::new(block_tree, config, &reference_registry).parse();
    (tree, reference_registry)
}

/// Parses a document string into a syntax tree and its reference table.
///
/// # Examples
///
/// ```rust
/// use sprig::{Config, parser::parse};
///
/// let (tree, _refs) = parse("# Heading\n\nParagraph text.", &Config::default());
/// println!("{:#?}", tree);
/// ```
pub fn parse(input: &str, config: &Config) -> (SyntaxNode, ReferenceRegistry) {
    let lines = block_parser::utils::split_lines(input);
    parse_lines(&lines, config)
}
