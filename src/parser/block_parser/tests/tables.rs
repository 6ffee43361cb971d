use crate::parser::block_parser::tests::helpers::{child_kinds, find_first, parse_blocks};
use crate::syntax::{Alignment, AstNode, SyntaxKind, Table};

fn first_table(input: &str) -> Table {
    let tree = parse_blocks(input);
    Table::cast(find_first(&tree, SyntaxKind::TABLE).unwrap()).unwrap()
}

#[test]
fn header_and_body_rows() {
    let table = first_table("| a | b |\n|---|---|\n| 1 | 2 |\n| 3 | 4 |\n");
    let header = table.header().unwrap();
    assert!(header.is_header());
    let header_text: Vec<_> = header.cells().map(|c| c.syntax().to_string()).collect();
    assert_eq!(header_text, ["a", "b"]);

    let rows: Vec<_> = table.rows().collect();
    assert_eq!(rows.len(), 2);
    assert!(!rows[0].is_header());
    let last: Vec<_> = rows[1].cells().map(|c| c.syntax().to_string()).collect();
    assert_eq!(last, ["3", "4"]);
    assert_eq!(table.column_count(), 2);
}

#[test]
fn alignment_reaches_every_body_cell() {
    let table = first_table("| l | c | r |\n|:--|:-:|--:|\n| 1 | 2 | 3 |\n| 4 | 5 | 6 |\n");
    assert_eq!(
        table.alignments(),
        vec![Alignment::Left, Alignment::Center, Alignment::Right]
    );
    for row in table.rows() {
        let aligns: Vec<_> = row.cells().map(|c| c.alignment()).collect();
        assert_eq!(aligns, [Alignment::Left, Alignment::Center, Alignment::Right]);
    }
}

#[test]
fn table_without_delimiter_row() {
    let table = first_table("| a |\n| b |\n");
    assert!(table.header().is_none());
    assert!(table.alignments().is_empty());
    assert_eq!(table.rows().count(), 2);
    let cell = table.rows().next().unwrap().cells().next().unwrap();
    assert_eq!(cell.alignment(), Alignment::Left);
}

#[test]
fn escaped_pipe_stays_in_cell() {
    let table = first_table("| a \\| b | c |\n");
    let cells: Vec<_> = table
        .rows()
        .next()
        .unwrap()
        .cells()
        .map(|c| c.syntax().to_string())
        .collect();
    assert_eq!(cells, ["a \\| b", "c"]);
}

#[test]
fn unpiped_line_is_paragraph() {
    let tree = parse_blocks("| a | b |\nplain line\n");
    assert_eq!(child_kinds(&tree), vec![SyntaxKind::PARAGRAPH]);
}

#[test]
fn rows_keep_their_own_width() {
    let table = first_table("| a | b |\n|---|---|\n| 1 |\n| 1 | 2 | 3 |\n");
    let widths: Vec<_> = table.rows().map(|r| r.cells().count()).collect();
    assert_eq!(widths, [1, 3]);
    assert_eq!(table.column_count(), 3);
}
