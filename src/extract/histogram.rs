//! Column detection from gaps in the horizontal density of text starts.
//!
//! Used when a page has no usable rulings. The algorithm:
//!
//! 1. Group items into visual rows
//! 2. Histogram item X-start positions into narrow bins
//! 3. Runs of empty bins wider than a column gap become boundaries
//! 4. Rows touching enough distinct columns form the table body
//!
//! Rows above and below the body are kept aside as non-table text.

use std::collections::BTreeSet;
use std::ops::Range;

use super::finalize::{add_non_table_text, finalize_rows};
use super::grid::{assign_to_grid, column_index, merge_wrapped};
use super::rows::group_rows;
use super::types::{joined_text, PageStats, PositionedItem, TableData};
use crate::config::Thresholds;

/// Upper bound on histogram bins; wider spreads read as a single column.
const MAX_BINS: usize = 65_536;

/// Rows of a page plus the columns and table body found in them.
#[derive(Debug, Clone)]
pub struct HistogramLayout {
    pub rows: Vec<Vec<PositionedItem>>,
    /// Column boundaries, empty when the page reads as a single column.
    pub boundaries: Vec<f32>,
    /// Contiguous row span from the first to the last tabular row.
    pub body: Option<Range<usize>>,
}

impl HistogramLayout {
    /// Analyze a page's items.
    pub fn analyze(items: &[PositionedItem], stats: PageStats, thresholds: &Thresholds) -> Self {
        let rows = group_rows(items, stats, thresholds);
        let boundaries = column_boundaries(items, stats, thresholds).unwrap_or_default();
        let body = table_body(&rows, &boundaries, thresholds.min_table_columns);
        tracing::debug!(
            rows = rows.len(),
            columns = boundaries.len() + 1,
            body = ?body,
            "histogram layout"
        );
        Self {
            rows,
            boundaries,
            body,
        }
    }

    /// Build the table, reattaching surrounding text unless `tables_only`.
    ///
    /// Without a table body every row becomes a one-cell row, or nothing at
    /// all when only tables are wanted.
    pub fn into_table(self, tables_only: bool) -> TableData {
        let Some(body) = self.body else {
            if tables_only {
                return TableData::default();
            }
            let lines = self.rows.iter().map(|row| vec![joined_text(row)]).collect();
            return finalize_rows(lines);
        };

        let grid = assign_to_grid(&self.rows[body.clone()], &self.boundaries);
        let mut table = finalize_rows(merge_wrapped(grid));
        if !tables_only {
            let outside = self.rows[..body.start]
                .iter()
                .chain(&self.rows[body.end..])
                .map(|row| joined_text(row));
            add_non_table_text(&mut table, outside);
        }
        table
    }
}

/// Find column boundaries from empty runs in the X-start histogram.
///
/// Returns `None` when the page should be read as a single column: starts
/// too tightly spread, no qualifying gap, or more boundaries than
/// `max_column_boundaries` (OCR noise).
pub fn column_boundaries(
    items: &[PositionedItem],
    stats: PageStats,
    thresholds: &Thresholds,
) -> Option<Vec<f32>> {
    let starts: Vec<f32> = items.iter().map(|i| i.x).filter(|x| x.is_finite()).collect();
    let min_x = starts.iter().copied().reduce(f32::min)?;
    let max_x = starts.iter().copied().reduce(f32::max)?;
    let mean_height = stats.mean_height;

    if max_x - min_x < thresholds.single_column_spread * mean_height {
        tracing::trace!(spread = max_x - min_x, "starts too close, single column");
        return None;
    }

    let bin_width = (thresholds.bin_width_factor * mean_height).max(thresholds.min_bin_width);
    let span_bins = ((max_x - min_x) / bin_width).floor();
    if !span_bins.is_finite() || span_bins >= MAX_BINS as f32 {
        tracing::debug!(
            spread = max_x - min_x,
            bin_width,
            "start spread needs too many bins, treating page as single column"
        );
        return None;
    }
    let bin_count = span_bins as usize + 1;
    let mut counts = vec![0_usize; bin_count];
    for x in &starts {
        let idx = (((x - min_x) / bin_width) as usize).min(bin_count - 1);
        counts[idx] += 1;
    }

    let min_run = ((thresholds.column_gap * mean_height / bin_width).ceil() as usize).max(1);
    let mut boundaries = Vec::new();
    let mut run_start: Option<usize> = None;
    for (idx, &count) in counts.iter().enumerate() {
        match (count, run_start) {
            (0, None) => run_start = Some(idx),
            (0, Some(_)) => {}
            (_, Some(start)) => {
                if idx - start >= min_run {
                    boundaries.push(min_x + (start + idx) as f32 / 2.0 * bin_width);
                }
                run_start = None;
            }
            (_, None) => {}
        }
    }

    if boundaries.len() > thresholds.max_column_boundaries {
        tracing::debug!(
            found = boundaries.len(),
            limit = thresholds.max_column_boundaries,
            "too many column boundaries, treating page as single column"
        );
        return None;
    }
    if boundaries.is_empty() {
        return None;
    }
    Some(boundaries)
}

/// Span from the first to the last row touching `min_columns` columns.
fn table_body(
    rows: &[Vec<PositionedItem>],
    boundaries: &[f32],
    min_columns: usize,
) -> Option<Range<usize>> {
    if boundaries.is_empty() {
        return None;
    }
    let is_table_row = |row: &Vec<PositionedItem>| {
        let touched: BTreeSet<usize> = row.iter().map(|i| column_index(i.x, boundaries)).collect();
        touched.len() >= min_columns
    };
    let first = rows.iter().position(is_table_row)?;
    let last = rows.iter().rposition(is_table_row)?;
    Some(first..last + 1)
}
