//! Pipe tables.
//!
//! Every line of the buffer starts and ends with `|`. A second line made only
//! of `-`, `:`, `|` and spaces is the delimiter row: it turns the first line
//! into the header and carries the column alignments.

use crate::syntax::SyntaxKind;
use rowan::GreenNodeBuilder;

use super::utils::emit_text;

/// True when every line is wrapped in pipes.
pub(crate) fn is_pipe_table(lines: &[String]) -> bool {
    !lines.is_empty()
        && lines.iter().all(|line| {
            let t = line.trim();
            t.len() >= 2 && t.starts_with('|') && t.ends_with('|')
        })
}

/// A delimiter row such as `|:---|---:|`.
pub(crate) fn is_delimiter_row(line: &str) -> bool {
    let t = line.trim();
    t.contains('-') && t.chars().all(|c| matches!(c, '-' | ':' | '|' | ' '))
}

/// Split a row into trimmed cells on unescaped pipes.
/// The outer pipes are removed; `\|` stays in the cell text.
pub(crate) fn split_cells(row: &str) -> Vec<&str> {
    let t = row.trim();
    let inner = t.strip_prefix('|').unwrap_or(t);
    let inner = match inner.strip_suffix('|') {
        Some(rest) if !rest.ends_with('\\') => rest,
        _ => inner,
    };

    let mut cells = Vec::new();
    let bytes = inner.as_bytes();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'|' => {
                cells.push(inner[start..i].trim());
                start = i + 1;
                i += 1;
            }
            _ => i += 1,
        }
    }
    cells.push(inner[start.min(inner.len())..].trim());
    cells
}

pub(crate) fn emit_table(builder: &mut GreenNodeBuilder<'static>, lines: &[String]) {
    builder.start_node(SyntaxKind::TABLE.into());

    let has_header = lines.len() >= 2 && is_delimiter_row(&lines[1]);
    let mut body_start = 0;
    if has_header {
        builder.start_node(SyntaxKind::TABLE_HEADER.into());
        emit_row(builder, &lines[0]);
        builder.finish_node(); // TABLE_HEADER
        builder.token(SyntaxKind::TABLE_DELIMITER.into(), lines[1].trim());
        body_start = 2;
    }

    for line in &lines[body_start..] {
        emit_row(builder, line);
    }

    builder.finish_node(); // TABLE
}

fn emit_row(builder: &mut GreenNodeBuilder<'static>, line: &str) {
    builder.start_node(SyntaxKind::TABLE_ROW.into());
    for cell in split_cells(line) {
        builder.start_node(SyntaxKind::TABLE_CELL.into());
        emit_text(builder, cell);
        builder.finish_node(); // TABLE_CELL
    }
    builder.finish_node(); // TABLE_ROW
}
