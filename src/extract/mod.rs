//! Table and text reconstruction from positioned page text.
//!
//! Two strategies converge on one [`TableData`] shape:
//!
//! | Strategy | Used when | Module |
//! |----------|-----------|--------|
//! | Ruling lines | ≥ 2 rulings and the result has > 1 column | [`ruled`] |
//! | Start-position histogram | everything else | [`histogram`] |
//!
//! Plain-text reconstruction ([`document`]) runs independently over the
//! same items. Every function here is a pure, synchronous transformation of
//! one page; nothing fails, degenerate input just yields a smaller result.
//!
//! # Example
//!
//! ```rust
//! use pagegrid::extract::{build_table_data, ExtractOptions, PositionedItem};
//!
//! let cell = |text: &str, x: f32, y: f32| PositionedItem {
//!     text: text.into(),
//!     x,
//!     y,
//!     width: 30.0,
//!     height: 10.0,
//!     page: 1,
//! };
//! let items = vec![
//!     cell("Name", 0.0, 0.0), cell("Q1", 100.0, 0.0), cell("Q2", 200.0, 0.0),
//!     cell("North", 0.0, 20.0), cell("10", 100.0, 20.0), cell("12", 200.0, 20.0),
//! ];
//! let table = build_table_data(&items, None, &ExtractOptions::default());
//! assert_eq!(table.headers, vec!["Name", "Q1", "Q2"]);
//! assert_eq!(table.rows, vec![vec!["North", "10", "12"]]);
//! ```

pub mod cluster;
pub mod document;
pub mod finalize;
pub mod grid;
pub mod histogram;
pub mod region;
pub mod rows;
pub mod ruled;
pub mod types;

pub use document::{build_document_lines, lines_to_plain_text, DocLine};
pub use histogram::HistogramLayout;
pub use region::filter_items;
pub use ruled::{NoTableReason, RuledOutcome, RuledTable};
pub use types::{CropRegion, PageLine, PageLines, PageStats, PositionedItem, TableData};

use crate::config::Thresholds;

/// Caller preferences for one extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    pub thresholds: Thresholds,
    /// Leave out text that is not part of the detected table.
    pub tables_only: bool,
}

/// Rebuild one page's items as a table.
///
/// Tries the ruling-based locator when at least two rulings exist and falls
/// back to histogram column detection when it finds no table or only a
/// single column.
pub fn build_table_data(
    items: &[PositionedItem],
    lines: Option<&PageLines>,
    options: &ExtractOptions,
) -> TableData {
    if items.is_empty() {
        return TableData::default();
    }
    let stats = PageStats::from_items(items);
    let thresholds = &options.thresholds;

    if let Some(lines) = lines.filter(|lines| lines.len() >= 2) {
        match ruled::locate(items, lines, stats, thresholds) {
            RuledOutcome::Table(ruled) => {
                if let Some(table) = ruled.finalize(stats, thresholds, options.tables_only) {
                    tracing::debug!(columns = table.column_count(), "using ruled table");
                    return table;
                }
                tracing::debug!("ruled table has a single column, falling back to histogram");
            }
            RuledOutcome::NoTable(reason) => {
                tracing::debug!(?reason, "no ruled table, falling back to histogram");
            }
        }
    }

    HistogramLayout::analyze(items, stats, thresholds).into_table(options.tables_only)
}

/// Rebuild one page's items as reading-order plain text.
pub fn extract_page_text(items: &[PositionedItem], thresholds: &Thresholds) -> String {
    let stats = PageStats::from_items(items);
    let lines = build_document_lines(items, stats, thresholds);
    lines_to_plain_text(&lines, stats, thresholds)
}
