//! Table detection from ruling lines.
//!
//! Vertical rulings long enough to be column separators are clustered into
//! column boundaries; horizontal rulings spanning the table give row bands.
//! Pages without usable rulings produce [`RuledOutcome::NoTable`] so the
//! caller can take the histogram path instead.

use super::cluster::cluster;
use super::finalize::{add_non_table_text, finalize_rows};
use super::grid::{assign_to_grid, column_index, merge_wrapped};
use super::rows::group_rows;
use super::types::{joined_text, PageLines, PageStats, PositionedItem, TableData};
use crate::config::Thresholds;

/// Result of the ruling-based locator.
#[derive(Debug, Clone)]
pub enum RuledOutcome {
    Table(RuledTable),
    NoTable(NoTableReason),
}

/// Why the rulings did not describe a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoTableReason {
    /// Fewer than two vertical rulings on the page.
    TooFewVerticals,
    /// Fewer than two column boundaries survived filtering and clustering.
    TooFewBoundaries,
}

/// Raw grid read from a ruled table.
#[derive(Debug, Clone)]
pub struct RuledTable {
    /// One row per band, `boundaries.len() + 1` cells each.
    pub grid: Vec<Vec<String>>,
    /// Column boundaries from clustered vertical rulings.
    pub boundaries: Vec<f32>,
    /// Top of the table box.
    pub top: f32,
    /// Bottom of the table box.
    pub bottom: f32,
    /// Items outside the table box.
    pub outside: Vec<PositionedItem>,
}

impl RuledTable {
    /// Finalize the grid into a table.
    ///
    /// Returns `None` when fewer than two columns hold any text, which tells
    /// the caller the rulings were decorative and the histogram should decide.
    pub fn finalize(
        self,
        stats: PageStats,
        thresholds: &Thresholds,
        tables_only: bool,
    ) -> Option<TableData> {
        let mut table = finalize_rows(merge_wrapped(self.grid));
        if table.column_count() <= 1 {
            return None;
        }
        if !tables_only {
            let rows = group_rows(&self.outside, stats, thresholds);
            add_non_table_text(&mut table, rows.iter().map(|row| joined_text(row)));
        }
        Some(table)
    }
}

#[derive(Debug, Clone, Copy)]
struct TableBox {
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
}

impl TableBox {
    fn contains(&self, item: &PositionedItem) -> bool {
        item.x >= self.left
            && item.right() <= self.right
            && item.y >= self.top
            && item.bottom() <= self.bottom
    }
}

/// Locate a table from the page's rulings.
pub fn locate(
    items: &[PositionedItem],
    lines: &PageLines,
    stats: PageStats,
    thresholds: &Thresholds,
) -> RuledOutcome {
    if lines.vertical.len() < 2 {
        return RuledOutcome::NoTable(NoTableReason::TooFewVerticals);
    }

    // Rough vertical extent: horizontal rulings widened by the verticals so
    // rows above the first horizontal rule stay inside.
    let (top, bottom) = lines
        .horizontal
        .iter()
        .chain(&lines.vertical)
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(top, bottom), line| {
            (top.min(line.min_y()), bottom.max(line.max_y()))
        });
    let extent = bottom - top;

    let min_vertical = thresholds.ruling_min_fraction * extent;
    let column_xs: Vec<f32> = lines
        .vertical
        .iter()
        .filter(|line| line.height() >= min_vertical)
        .map(|line| line.mid_x())
        .collect();
    let boundaries = cluster(&column_xs, thresholds.ruling_cluster_distance);
    tracing::debug!(
        verticals = lines.vertical.len(),
        long = column_xs.len(),
        boundaries = boundaries.len(),
        "clustered vertical rulings"
    );
    let (Some(&first), Some(&last)) = (boundaries.first(), boundaries.last()) else {
        return RuledOutcome::NoTable(NoTableReason::TooFewBoundaries);
    };
    if boundaries.len() < 2 {
        return RuledOutcome::NoTable(NoTableReason::TooFewBoundaries);
    }

    let min_horizontal = thresholds.ruling_min_fraction * (last - first);
    let horizontals: Vec<_> = lines
        .horizontal
        .iter()
        .filter(|line| {
            line.width() >= min_horizontal && line.max_x() >= first && line.min_x() <= last
        })
        .collect();

    let table_box = TableBox {
        left: horizontals.iter().map(|l| l.min_x()).fold(first, f32::min),
        right: horizontals.iter().map(|l| l.max_x()).fold(last, f32::max),
        top,
        bottom,
    };
    let (inside, outside): (Vec<PositionedItem>, Vec<PositionedItem>) =
        items.iter().cloned().partition(|item| table_box.contains(item));

    let row_ys: Vec<f32> = horizontals.iter().map(|line| line.mid_y()).collect();
    let row_bounds = cluster(&row_ys, thresholds.ruling_cluster_distance);
    let rows = if row_bounds.len() >= 2 {
        bucket_rows(inside, &row_bounds, stats, thresholds)
    } else {
        group_rows(&inside, stats, thresholds)
    };

    RuledOutcome::Table(RuledTable {
        grid: assign_to_grid(&rows, &boundaries),
        boundaries,
        top: table_box.top,
        bottom: table_box.bottom,
        outside,
    })
}

/// Bucket items into the bands between horizontal rulings.
///
/// Within a band, items are laid out as visual lines top-to-bottom so text
/// wrapped inside a cell keeps its reading order.
fn bucket_rows(
    items: Vec<PositionedItem>,
    row_bounds: &[f32],
    stats: PageStats,
    thresholds: &Thresholds,
) -> Vec<Vec<PositionedItem>> {
    let mut bands: Vec<Vec<PositionedItem>> = vec![Vec::new(); row_bounds.len() + 1];
    for item in items {
        bands[column_index(item.center_y(), row_bounds)].push(item);
    }
    bands
        .into_iter()
        .filter(|band| !band.is_empty())
        .map(|band| group_rows(&band, stats, thresholds).concat())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::types::PageLine;

    fn item(text: &str, x: f32, y: f32) -> PositionedItem {
        PositionedItem {
            text: text.into(),
            x,
            y,
            width: 30.0,
            height: 10.0,
            page: 1,
        }
    }

    fn vline(x: f32, y1: f32, y2: f32) -> PageLine {
        PageLine { x1: x, y1, x2: x, y2 }
    }

    fn hline(y: f32, x1: f32, x2: f32) -> PageLine {
        PageLine { x1, y1: y, x2, y2: y }
    }

    fn locate_default(items: &[PositionedItem], lines: &PageLines) -> RuledOutcome {
        locate(items, lines, PageStats::from_items(items), &Thresholds::default())
    }

    #[test]
    fn single_vertical_is_not_a_table() {
        let lines = PageLines {
            horizontal: vec![hline(10.0, 0.0, 100.0)],
            vertical: vec![vline(50.0, 0.0, 100.0)],
        };
        assert!(matches!(
            locate_default(&[], &lines),
            RuledOutcome::NoTable(NoTableReason::TooFewVerticals)
        ));
    }

    #[test]
    fn coincident_verticals_collapse_to_one_boundary() {
        let lines = PageLines {
            horizontal: Vec::new(),
            vertical: vec![vline(50.0, 0.0, 100.0), vline(51.0, 0.0, 100.0)],
        };
        assert!(matches!(
            locate_default(&[], &lines),
            RuledOutcome::NoTable(NoTableReason::TooFewBoundaries)
        ));
    }

    #[test]
    fn short_verticals_are_ignored() {
        let lines = PageLines {
            horizontal: vec![hline(0.0, 0.0, 300.0), hline(200.0, 0.0, 300.0)],
            vertical: vec![vline(100.0, 0.0, 200.0), vline(200.0, 90.0, 100.0)],
        };
        assert!(matches!(
            locate_default(&[], &lines),
            RuledOutcome::NoTable(NoTableReason::TooFewBoundaries)
        ));
    }

    #[test]
    fn bordered_grid_reads_cells() {
        let items = vec![
            item("Item", 10.0, 10.0),
            item("Qty", 110.0, 10.0),
            item("Pen", 10.0, 40.0),
            item("4", 110.0, 40.0),
            item("Ink", 10.0, 70.0),
            item("2", 110.0, 70.0),
            item("Page 1", 10.0, 150.0),
        ];
        let lines = PageLines {
            horizontal: vec![
                hline(0.0, 0.0, 200.0),
                hline(30.0, 0.0, 200.0),
                hline(60.0, 0.0, 200.0),
                hline(90.0, 0.0, 200.0),
            ],
            vertical: vec![
                vline(0.0, 0.0, 90.0),
                vline(100.0, 0.0, 90.0),
                vline(200.0, 0.0, 90.0),
            ],
        };
        let stats = PageStats::from_items(&items);
        let RuledOutcome::Table(ruled) = locate(&items, &lines, stats, &Thresholds::default())
        else {
            panic!("expected a ruled table");
        };
        assert_eq!(ruled.boundaries.len(), 3);
        assert_eq!(ruled.outside.len(), 1);
        assert!((ruled.bottom - 90.0).abs() < 1e-4);

        let table = ruled
            .clone()
            .finalize(stats, &Thresholds::default(), false)
            .unwrap();
        assert_eq!(table.headers, vec!["Item", "Qty"]);
        assert_eq!(table.rows, vec![vec!["Pen", "4"], vec!["Ink", "2"], vec!["Page 1", ""]]);

        let only = ruled.finalize(stats, &Thresholds::default(), true).unwrap();
        assert_eq!(only.rows.len(), 2);
    }

    #[test]
    fn wrapped_cell_text_keeps_reading_order() {
        let items = vec![
            item("Period", 10.0, 10.0),
            item("Amount", 110.0, 10.0),
            item("Q2", 20.0, 40.0),
            item("2024", 10.0, 52.0),
            item("100", 110.0, 40.0),
        ];
        let lines = PageLines {
            horizontal: vec![hline(0.0, 0.0, 200.0), hline(30.0, 0.0, 200.0), hline(70.0, 0.0, 200.0)],
            vertical: vec![vline(0.0, 0.0, 70.0), vline(100.0, 0.0, 70.0), vline(200.0, 0.0, 70.0)],
        };
        let stats = PageStats::from_items(&items);
        let RuledOutcome::Table(ruled) = locate(&items, &lines, stats, &Thresholds::default())
        else {
            panic!("expected a ruled table");
        };
        let table = ruled.finalize(stats, &Thresholds::default(), true).unwrap();
        assert_eq!(table.rows, vec![vec!["Q2 2024", "100"]]);
    }

    #[test]
    fn single_filled_column_defers_to_histogram() {
        let items = vec![item("alpha", 10.0, 10.0), item("beta", 10.0, 40.0)];
        let lines = PageLines {
            horizontal: Vec::new(),
            vertical: vec![vline(0.0, 0.0, 60.0), vline(100.0, 0.0, 60.0)],
        };
        let stats = PageStats::from_items(&items);
        let RuledOutcome::Table(ruled) = locate(&items, &lines, stats, &Thresholds::default())
        else {
            panic!("expected a ruled table");
        };
        assert!(ruled.finalize(stats, &Thresholds::default(), false).is_none());
    }
}
