//! Crop-region filtering, applied before any layout analysis.

use super::types::{CropRegion, PositionedItem};

/// Whether an item on `page` survives the crop regions.
///
/// Pages without regions keep everything. Otherwise the item's center must
/// fall inside (bounds inclusive) some region on that page. Partially
/// covered items are never clipped.
///
/// The page comes from the caller rather than `item.page`, which defaults
/// to 0 when a bundle leaves it out.
pub fn item_in_regions(item: &PositionedItem, page: u32, regions: &[CropRegion]) -> bool {
    let mut on_page = regions.iter().filter(|r| r.page == page).peekable();
    if on_page.peek().is_none() {
        return true;
    }
    let (cx, cy) = (item.center_x(), item.center_y());
    on_page.any(|region| region.contains(cx, cy))
}

/// Keep the items of `page` that pass [`item_in_regions`].
pub fn filter_items(
    items: &[PositionedItem],
    page: u32,
    regions: &[CropRegion],
) -> Vec<PositionedItem> {
    if !regions.iter().any(|r| r.page == page) {
        return items.to_vec();
    }
    let kept: Vec<PositionedItem> = items
        .iter()
        .filter(|item| item_in_regions(item, page, regions))
        .cloned()
        .collect();
    tracing::debug!(page, before = items.len(), after = kept.len(), "applied crop regions");
    kept
}
