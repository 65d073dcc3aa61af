//! Table finalization: empty-column removal, header classification and
//! reattachment of non-table text.

use super::types::TableData;

/// Remove columns that are blank in every row, padding ragged rows first.
pub fn drop_empty_columns(rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let keep: Vec<bool> = (0..width)
        .map(|col| {
            rows.iter()
                .any(|row| row.get(col).is_some_and(|cell| !cell.trim().is_empty()))
        })
        .collect();

    rows.into_iter()
        .map(|mut row| {
            row.resize(width, String::new());
            row.into_iter()
                .zip(&keep)
                .filter_map(|(cell, &kept)| kept.then_some(cell))
                .collect()
        })
        .collect()
}

/// Turn a raw grid into a [`TableData`] with a classified header.
///
/// - An all-numeric (or blank) first row means there is no header: generic
///   `Col A`, `Col B`, … labels are synthesized and every row is data.
/// - A blank top-left cell above a labelled row with repeated values (year
///   sub-headers under spanning group labels) merges rows 0 and 1 into one
///   compound header.
/// - Otherwise row 0 is the header.
pub fn finalize_rows(rows: Vec<Vec<String>>) -> TableData {
    let rows = drop_empty_columns(rows);
    let width = rows.first().map_or(0, Vec::len);
    if width == 0 {
        return TableData::default();
    }

    if rows[0].iter().all(|cell| is_numeric_or_blank(cell)) {
        tracing::debug!(width, "numeric first row, synthesizing headers");
        return TableData {
            headers: (0..width).map(column_label).collect(),
            rows,
        };
    }

    if rows.len() >= 3 && is_sub_header(&rows[0], &rows[1]) {
        tracing::debug!(width, "merging two-row compound header");
        let headers = compound_header(&rows[0], &rows[1]);
        return TableData {
            headers,
            rows: rows.into_iter().skip(2).collect(),
        };
    }

    let mut iter = rows.into_iter();
    let headers = iter.next().unwrap_or_default();
    TableData {
        headers,
        rows: iter.collect(),
    }
}

/// Re-run finalization over an existing table.
///
/// A table that already went through [`finalize_rows`] comes back unchanged.
pub fn finalize_table(table: TableData) -> TableData {
    let mut grid = Vec::with_capacity(table.rows.len() + 1);
    if !table.headers.is_empty() {
        grid.push(table.headers);
    }
    grid.extend(table.rows);
    finalize_rows(grid)
}

/// Append lines of non-table text below the table's own rows.
///
/// Each line fills the first cell; the remaining cells stay blank.
pub fn add_non_table_text<I>(table: &mut TableData, lines: I)
where
    I: IntoIterator<Item = String>,
{
    let mut lines = lines.into_iter().filter(|line| !line.trim().is_empty()).peekable();
    if lines.peek().is_none() {
        return;
    }
    let width = table.column_count().max(1);
    table.pad_to(width);
    for line in lines {
        let mut row = vec![String::new(); width];
        row[0] = line;
        table.rows.push(row);
    }
}

/// Whether a cell is blank or reads as a number (currency, separators,
/// percent signs and accounting parentheses allowed).
pub fn is_numeric_or_blank(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.is_empty() || is_numeric(trimmed)
}

fn is_numeric(cell: &str) -> bool {
    let digits: String = cell
        .chars()
        .filter(|&c| !matches!(c, ',' | ' ' | '$' | '€' | '£' | '¥' | '%' | '(' | ')' | '+'))
        .collect();
    digits.chars().any(|c| c.is_ascii_digit()) && digits.parse::<f64>().is_ok()
}

fn is_sub_header(first: &[String], second: &[String]) -> bool {
    let Some(second_lead) = second.first().map(|c| c.trim()) else {
        return false;
    };
    let first_lead_blank = first.first().is_none_or(|c| c.trim().is_empty());
    first_lead_blank
        && !second_lead.is_empty()
        && !is_numeric(second_lead)
        && has_repeated_value(second)
}

fn has_repeated_value(row: &[String]) -> bool {
    let filled: Vec<&str> = row.iter().map(|c| c.trim()).filter(|c| !c.is_empty()).collect();
    filled
        .iter()
        .enumerate()
        .any(|(idx, cell)| filled[idx + 1..].contains(cell))
}

/// Combine a spanning group row with its sub-header row.
///
/// Group labels carry rightward over blank cells so every sub-header picks
/// up the group it sits under ("Revenue 2023", "Revenue 2024").
fn compound_header(first: &[String], second: &[String]) -> Vec<String> {
    let mut group = "";
    first
        .iter()
        .zip(second)
        .map(|(top, sub)| {
            let top = top.trim();
            if !top.is_empty() {
                group = top;
            }
            let sub = sub.trim();
            match (group.is_empty(), sub.is_empty()) {
                (true, _) => sub.to_string(),
                (false, true) => group.to_string(),
                (false, false) => format!("{group} {sub}"),
            }
        })
        .collect()
}

/// Spreadsheet-style generic column label: `Col A` … `Col Z`, `Col AA`, …
pub fn column_label(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.reverse();
    format!("Col {}", letters.into_iter().collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| (*c).to_string()).collect()
    }

    #[test]
    fn empty_columns_are_removed() {
        let rows = vec![row(&["a", "", "b"]), row(&["c", "", ""])];
        assert_eq!(drop_empty_columns(rows), vec![row(&["a", "b"]), row(&["c", ""])]);
    }

    #[test]
    fn ragged_rows_are_padded() {
        let rows = vec![row(&["a", "b", "c"]), row(&["d"])];
        assert_eq!(drop_empty_columns(rows)[1], row(&["d", "", ""]));
    }

    #[test]
    fn first_row_becomes_header() {
        let table = finalize_rows(vec![row(&["Name", "Age"]), row(&["Alice", "30"])]);
        assert_eq!(table.headers, row(&["Name", "Age"]));
        assert_eq!(table.rows, vec![row(&["Alice", "30"])]);
    }

    #[test]
    fn numeric_first_row_synthesizes_labels() {
        let table = finalize_rows(vec![row(&["1", "$2,000", ""]), row(&["3", "4", "5"])]);
        assert_eq!(table.headers, row(&["Col A", "Col B", "Col C"]));
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn sub_header_rows_merge() {
        let table = finalize_rows(vec![
            row(&["", "Revenue", "", "Cost", ""]),
            row(&["Region", "2023", "2024", "2023", "2024"]),
            row(&["North", "10", "12", "4", "5"]),
        ]);
        assert_eq!(
            table.headers,
            row(&["Region", "Revenue 2023", "Revenue 2024", "Cost 2023", "Cost 2024"])
        );
        assert_eq!(table.rows, vec![row(&["North", "10", "12", "4", "5"])]);
    }

    #[test]
    fn sub_header_needs_repeated_values() {
        let table = finalize_rows(vec![
            row(&["", "Revenue", "Cost"]),
            row(&["Region", "2023", "2024"]),
            row(&["North", "10", "12"]),
        ]);
        assert_eq!(table.headers, row(&["", "Revenue", "Cost"]));
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn finalize_is_idempotent() {
        let inputs = vec![
            vec![row(&["Name", "", "Age"]), row(&["Alice", "", "30"])],
            vec![row(&["1", "2"]), row(&["3", "4"])],
            vec![
                row(&["", "Revenue", "", "Cost", ""]),
                row(&["Region", "2023", "2024", "2023", "2024"]),
                row(&["North", "10", "12", "4", "5"]),
            ],
        ];
        for grid in inputs {
            let once = finalize_rows(grid);
            let twice = finalize_table(once.clone());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn empty_grid_is_empty_table() {
        assert!(finalize_rows(Vec::new()).is_empty());
        assert!(finalize_rows(vec![row(&["", ""])]).is_empty());
    }

    #[test]
    fn non_table_text_fills_first_cell() {
        let mut table = finalize_rows(vec![row(&["A", "B"]), row(&["1", "2"])]);
        add_non_table_text(&mut table, vec!["Footnote text".to_string(), "  ".to_string()]);
        assert_eq!(table.rows.last(), Some(&row(&["Footnote text", ""])));
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn numeric_detection() {
        assert!(is_numeric_or_blank("  "));
        assert!(is_numeric_or_blank("(1,234.50)"));
        assert!(is_numeric_or_blank("-12%"));
        assert!(!is_numeric_or_blank("Q2"));
        assert!(!is_numeric_or_blank("-"));
    }

    #[test]
    fn column_labels_roll_over() {
        assert_eq!(column_label(0), "Col A");
        assert_eq!(column_label(25), "Col Z");
        assert_eq!(column_label(26), "Col AA");
    }
}
