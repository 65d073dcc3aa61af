//! Multi-page compilation.
//!
//! Pages are independent, so each one is extracted on the rayon pool; the
//! results are stitched back together strictly in ascending page order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::Thresholds;
use crate::extract::{
    build_table_data, extract_page_text, filter_items, CropRegion, ExtractOptions, PageLines,
    PositionedItem, TableData,
};

/// Everything extracted from one page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageInput {
    pub page: u32,
    #[serde(default)]
    pub items: Vec<PositionedItem>,
    #[serde(default)]
    pub lines: Option<PageLines>,
}

fn sorted_pages(pages: &[PageInput]) -> Vec<&PageInput> {
    let mut sorted: Vec<&PageInput> = pages.iter().collect();
    sorted.sort_by_key(|page| page.page);
    sorted
}

/// Extract a table from every page and stack them top to bottom.
///
/// Narrower page tables are padded to the widest one. The first non-empty
/// page supplies the headers; each later page is preceded by a blank
/// separator row and, when its header differs, its own header row.
pub fn compile_tables(
    pages: &[PageInput],
    regions: &[CropRegion],
    options: &ExtractOptions,
) -> TableData {
    let tables: Vec<TableData> = sorted_pages(pages)
        .par_iter()
        .map(|page| {
            let items = filter_items(&page.items, page.page, regions);
            build_table_data(&items, page.lines.as_ref(), options)
        })
        .collect();

    let width = tables.iter().map(TableData::column_count).max().unwrap_or(0);
    let mut tables = tables.into_iter().filter(|table| !table.is_empty());
    let Some(mut compiled) = tables.next() else {
        return TableData::default();
    };
    compiled.pad_to(width);

    for mut table in tables {
        table.pad_to(width);
        compiled.rows.push(vec![String::new(); width]);
        if table.headers != compiled.headers {
            compiled.rows.push(table.headers);
        }
        compiled.rows.extend(table.rows);
    }

    tracing::debug!(
        pages = pages.len(),
        columns = width,
        rows = compiled.rows.len(),
        "compiled page tables"
    );
    compiled
}

/// Extract plain text from every page, joined by blank lines.
pub fn compile_document(
    pages: &[PageInput],
    regions: &[CropRegion],
    thresholds: &Thresholds,
) -> String {
    let texts: Vec<String> = sorted_pages(pages)
        .par_iter()
        .map(|page| {
            let items = filter_items(&page.items, page.page, regions);
            extract_page_text(&items, thresholds)
        })
        .collect();

    texts
        .into_iter()
        .filter(|text| !text.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
