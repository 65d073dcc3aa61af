//! Visual row grouping by vertical proximity.

use std::cmp::Ordering;

use super::types::{PageStats, PositionedItem};
use crate::config::Thresholds;

/// Bucket items into visual rows, top-to-bottom.
///
/// Items are sorted by Y; a new row starts whenever an item's Y differs from
/// the current row's reference Y (its first member) by more than
/// `row_tolerance × mean height`. Each row is then sorted left-to-right.
///
/// Assumes a roughly uniform font size: a large title sitting close above
/// small body text can land in the same row.
pub fn group_rows(
    items: &[PositionedItem],
    stats: PageStats,
    thresholds: &Thresholds,
) -> Vec<Vec<PositionedItem>> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| a.y.total_cmp(&b.y).then(compare_x(a, b)));

    let tolerance = thresholds.row_tolerance * stats.mean_height;
    let mut rows: Vec<Vec<PositionedItem>> = Vec::new();
    let mut iter = sorted.into_iter();
    let Some(first) = iter.next() else {
        return rows;
    };
    let mut reference_y = first.y;
    let mut current = vec![first];

    for item in iter {
        if (item.y - reference_y).abs() > tolerance {
            rows.push(finish_row(std::mem::take(&mut current)));
            reference_y = item.y;
        }
        current.push(item);
    }
    rows.push(finish_row(current));

    rows
}

fn finish_row(mut row: Vec<PositionedItem>) -> Vec<PositionedItem> {
    row.sort_by(compare_x);
    row
}

fn compare_x(a: &PositionedItem, b: &PositionedItem) -> Ordering {
    a.x.total_cmp(&b.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(text: &str, x: f32, y: f32) -> PositionedItem {
        PositionedItem {
            text: text.into(),
            x,
            y,
            width: 20.0,
            height: 10.0,
            page: 1,
        }
    }

    fn group(items: &[PositionedItem]) -> Vec<Vec<PositionedItem>> {
        group_rows(items, PageStats::from_items(items), &Thresholds::default())
    }

    fn texts(row: &[PositionedItem]) -> Vec<&str> {
        row.iter().map(|i| i.text.as_str()).collect()
    }

    #[test]
    fn empty_input_has_no_rows() {
        assert!(group(&[]).is_empty());
    }

    #[test]
    fn items_within_tolerance_share_a_row() {
        // 0.6 × 10 = 6 units of tolerance.
        let items = vec![item("b", 50.0, 102.0), item("a", 10.0, 100.0), item("c", 90.0, 105.0)];
        let rows = group(&items);
        assert_eq!(rows.len(), 1);
        assert_eq!(texts(&rows[0]), vec!["a", "b", "c"]);
    }

    #[test]
    fn items_beyond_tolerance_start_new_rows() {
        let items = vec![item("second", 10.0, 120.0), item("first", 10.0, 100.0)];
        let rows = group(&items);
        assert_eq!(rows.len(), 2);
        assert_eq!(texts(&rows[0]), vec!["first"]);
        assert_eq!(texts(&rows[1]), vec!["second"]);
    }

    #[test]
    fn reference_is_the_first_member_of_the_row() {
        // 100 → 105 joins, 105 → 110 would join if compared to the last
        // member, but 110 is 10 away from the reference.
        let items = vec![item("a", 0.0, 100.0), item("b", 30.0, 105.0), item("c", 60.0, 110.0)];
        let rows = group(&items);
        assert_eq!(rows.len(), 2);
        assert_eq!(texts(&rows[1]), vec!["c"]);
    }

    #[test]
    fn row_count_never_exceeds_item_count_and_rows_are_sorted() {
        let items: Vec<PositionedItem> = (0..25)
            .map(|i| item(&i.to_string(), ((i * 37) % 200) as f32, ((i * 13) % 90) as f32))
            .collect();
        let rows = group(&items);
        assert!(rows.len() <= items.len());
        assert_eq!(rows.iter().map(Vec::len).sum::<usize>(), items.len());
        for row in &rows {
            assert!(row.windows(2).all(|w| w[0].x <= w[1].x));
        }
    }
}
