//! Reading-order plain text reconstruction.
//!
//! # Pipeline
//!
//! ```text
//! items → visual lines (row grouping) → proportional spacing → paragraphs
//! ```

use super::rows::group_rows;
use super::types::{mean_height, PageStats, PositionedItem};
use crate::config::Thresholds;

/// One visual line of text, items sorted left-to-right.
#[derive(Debug, Clone)]
pub struct DocLine {
    /// Top of the line's highest item.
    pub y: f32,
    pub items: Vec<PositionedItem>,
}

impl DocLine {
    fn mean_height(&self) -> f32 {
        mean_height(&self.items)
    }
}

/// Group a page's items into reading-order lines.
pub fn build_document_lines(
    items: &[PositionedItem],
    stats: PageStats,
    thresholds: &Thresholds,
) -> Vec<DocLine> {
    group_rows(items, stats, thresholds)
        .into_iter()
        .map(|items| DocLine {
            y: items.iter().map(|i| i.y).fold(f32::INFINITY, f32::min),
            items,
        })
        .collect()
}

/// Serialize lines to monospace plain text.
///
/// Inter-word gaps become `round(gap / (space_width × mean height))`
/// spaces, at least one. A vertical step larger than `paragraph_gap` times
/// the previous line's mean height inserts a blank line.
pub fn lines_to_plain_text(lines: &[DocLine], stats: PageStats, thresholds: &Thresholds) -> String {
    let space_unit = thresholds.space_width * stats.mean_height;
    let mut output = String::new();

    for (idx, line) in lines.iter().enumerate() {
        if idx > 0 {
            let prev = &lines[idx - 1];
            output.push('\n');
            if line.y - prev.y > thresholds.paragraph_gap * prev.mean_height() {
                output.push('\n');
            }
        }
        render_line(&mut output, line, space_unit);
    }

    output
}

fn render_line(output: &mut String, line: &DocLine, space_unit: f32) {
    let mut prev_end: Option<f32> = None;
    for item in &line.items {
        let text = item.text.trim();
        if text.is_empty() {
            continue;
        }
        if let Some(end) = prev_end {
            output.push_str(&" ".repeat(space_count(item.x - end, space_unit)));
        }
        output.push_str(text);
        prev_end = Some(item.right());
    }
}

/// Widest run of spaces emitted for a single gap.
const MAX_SPACES: usize = 200;

fn space_count(gap: f32, space_unit: f32) -> usize {
    if space_unit <= 0.0 || !gap.is_finite() {
        return 1;
    }
    ((gap / space_unit).round() as usize).clamp(1, MAX_SPACES)
}
