//! Terminal-friendly views of a [`TableData`].

use crate::extract::TableData;

/// Render a table as a GitHub-flavored markdown table.
///
/// Pipes inside cells are escaped so they don't split columns.
pub fn to_markdown(table: &TableData) -> String {
    let col_count = table.column_count();
    if col_count == 0 {
        return String::new();
    }

    let mut md = String::new();
    push_row(&mut md, &table.headers, col_count);

    // Separator row
    md.push('|');
    for _ in 0..col_count {
        md.push_str(" --- |");
    }
    md.push('\n');

    for row in &table.rows {
        push_row(&mut md, row, col_count);
    }

    md
}

fn push_row(md: &mut String, cells: &[String], col_count: usize) {
    md.push('|');
    for col in 0..col_count {
        let cell = cells.get(col).map_or("", String::as_str);
        md.push(' ');
        md.push_str(&cell.replace('|', "\\|"));
        md.push_str(" |");
    }
    md.push('\n');
}
