//! Table AST node wrappers.

use super::ast::{ast_node, support};
use super::{AstNode, SyntaxKind, SyntaxNode};

/// Column alignment from a table delimiter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Parses a delimiter row such as `|:---|:---:|---:|` into column alignments.
pub fn parse_alignments(delimiter_row: &str) -> Vec<Alignment> {
    let trimmed = delimiter_row.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner
        .split('|')
        .map(|column| {
            let column = column.trim();
            match (column.starts_with(':'), column.ends_with(':') && column.len() > 1) {
                (true, true) => Alignment::Center,
                (false, true) => Alignment::Right,
                _ => Alignment::Left,
            }
        })
        .collect()
}

ast_node!(Table, TABLE);

impl Table {
    /// Column alignments; empty when the table has no delimiter row.
    pub fn alignments(&self) -> Vec<Alignment> {
        support::token(&self.0, SyntaxKind::TABLE_DELIMITER)
            .map(|t| parse_alignments(t.text()))
            .unwrap_or_default()
    }

    /// Header row, present when a delimiter row followed the first line.
    pub fn header(&self) -> Option<TableRow> {
        self.0
            .children()
            .find(|child| child.kind() == SyntaxKind::TABLE_HEADER)
            .and_then(|header| support::child(&header))
    }

    /// Body rows, excluding the header.
    pub fn rows(&self) -> impl Iterator<Item = TableRow> + '_ {
        support::children(&self.0)
    }

    /// Widest row, counting the header.
    pub fn column_count(&self) -> usize {
        self.header()
            .into_iter()
            .chain(self.rows())
            .map(|row| row.cells().count())
            .max()
            .unwrap_or(0)
            .max(self.alignments().len())
    }
}

ast_node!(TableRow, TABLE_ROW);

impl TableRow {
    pub fn cells(&self) -> impl Iterator<Item = TableCell> + '_ {
        support::children(&self.0)
    }

    pub fn is_header(&self) -> bool {
        self.0
            .parent()
            .is_some_and(|p| p.kind() == SyntaxKind::TABLE_HEADER)
    }
}

ast_node!(TableCell, TABLE_CELL);

impl TableCell {
    /// Position of this cell within its row.
    pub fn column(&self) -> usize {
        self.0
            .siblings(rowan::Direction::Prev)
            .filter(|s| s.kind() == SyntaxKind::TABLE_CELL)
            .count()
            .saturating_sub(1)
    }

    /// Owning table, reached through parent links.
    pub fn table(&self) -> Option<Table> {
        self.0.ancestors().find_map(Table::cast)
    }

    /// Alignment of this cell's column; columns past the delimiter row are left-aligned.
    pub fn alignment(&self) -> Alignment {
        self.table()
            .and_then(|table| table.alignments().get(self.column()).copied())
            .unwrap_or_default()
    }
}
