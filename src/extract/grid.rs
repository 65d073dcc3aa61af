//! Cell assignment and wrapped-row merging.

use super::types::PositionedItem;

/// Index of the column an X coordinate falls into.
///
/// Linear scan for the first boundary `x` is less than; anything past the
/// last boundary lands in the rightmost bucket.
pub fn column_index(x: f32, boundaries: &[f32]) -> usize {
    boundaries
        .iter()
        .position(|&b| x < b)
        .unwrap_or(boundaries.len())
}

/// Place every item of every row into a cell.
///
/// Rows must already be sorted left-to-right. Items sharing a cell are joined
/// with a single space. Each output row has `boundaries.len() + 1` cells.
pub fn assign_to_grid(rows: &[Vec<PositionedItem>], boundaries: &[f32]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| {
            let mut cells = vec![String::new(); boundaries.len() + 1];
            for item in row {
                let text = item.text.trim();
                if text.is_empty() {
                    continue;
                }
                let cell = &mut cells[column_index(item.x, boundaries)];
                if !cell.is_empty() {
                    cell.push(' ');
                }
                cell.push_str(text);
            }
            cells
        })
        .collect()
}

/// Fold wrapped rows into the row they continue.
///
/// A row continues the current base row when it has at least one filled
/// cell, at least half its cells are blank, and every filled cell sits under
/// a cell the base row already filled. Continuations are appended with a
/// space; several consecutive continuations all fold into the same base.
///
/// Half blank is enough, not a strict majority: a two-column wrap such as
/// `["", "000"]` under `["Revenue", "100"]` must fold, and so does a
/// four-column row with two filled cells.
pub fn merge_wrapped(rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let original = rows.len();
    let mut merged: Vec<Vec<String>> = Vec::with_capacity(original);
    let mut iter = rows.into_iter().peekable();

    while let Some(mut base) = iter.next() {
        while let Some(continuation) = iter.next_if(|next| is_continuation(&base, next)) {
            for (cell, extra) in base.iter_mut().zip(continuation) {
                if !extra.is_empty() {
                    cell.push(' ');
                    cell.push_str(&extra);
                }
            }
        }
        merged.push(base);
    }

    let folded = original - merged.len();
    if folded > 0 {
        tracing::debug!(folded, "merged continuation rows");
    }
    merged
}

fn is_continuation(base: &[String], row: &[String]) -> bool {
    let filled: Vec<usize> = row
        .iter()
        .enumerate()
        .filter(|(_, cell)| !cell.is_empty())
        .map(|(idx, _)| idx)
        .collect();
    if filled.is_empty() {
        return false;
    }
    let blank = row.len() - filled.len();
    if blank * 2 < row.len() {
        return false;
    }
    filled
        .iter()
        .all(|&idx| base.get(idx).is_some_and(|cell| !cell.is_empty()))
}
