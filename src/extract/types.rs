//! Shared types for the extraction pipeline.
//!
//! Coordinates are page-space units with Y increasing downward. Items,
//! rulings and regions are produced upstream (text-layer reader, OCR, ruling
//! detector, UI) and are read-only here.

use serde::{Deserialize, Serialize};

/// A run of text with its page-space bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedItem {
    pub text: String,
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Page number the item was read from.
    #[serde(default)]
    pub page: u32,
}

impl PositionedItem {
    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// A straight ruling segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageLine {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl PageLine {
    pub fn min_x(&self) -> f32 {
        self.x1.min(self.x2)
    }

    pub fn max_x(&self) -> f32 {
        self.x1.max(self.x2)
    }

    pub fn min_y(&self) -> f32 {
        self.y1.min(self.y2)
    }

    pub fn max_y(&self) -> f32 {
        self.y1.max(self.y2)
    }

    /// Horizontal span, used as the length of a horizontal ruling.
    pub fn width(&self) -> f32 {
        (self.x2 - self.x1).abs()
    }

    /// Vertical span, used as the length of a vertical ruling.
    pub fn height(&self) -> f32 {
        (self.y2 - self.y1).abs()
    }

    pub fn mid_x(&self) -> f32 {
        (self.x1 + self.x2) / 2.0
    }

    pub fn mid_y(&self) -> f32 {
        (self.y1 + self.y2) / 2.0
    }
}

/// Rulings already split by orientation by the detector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLines {
    #[serde(default)]
    pub horizontal: Vec<PageLine>,
    #[serde(default)]
    pub vertical: Vec<PageLine>,
}

impl PageLines {
    pub fn len(&self) -> usize {
        self.horizontal.len() + self.vertical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A user-drawn rectangle restricting extraction on one page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub page: u32,
}

impl CropRegion {
    /// Inclusive point containment.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// A rectangular table: every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Widen the table to `width` columns with blank cells.
    pub fn pad_to(&mut self, width: usize) {
        if self.headers.len() < width {
            self.headers.resize(width, String::new());
        }
        for row in &mut self.rows {
            if row.len() < width {
                row.resize(width, String::new());
            }
        }
    }
}

/// Per-page statistics computed once and threaded through every stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageStats {
    /// Mean item height; zero for an empty page.
    pub mean_height: f32,
}

impl PageStats {
    pub fn from_items(items: &[PositionedItem]) -> Self {
        Self {
            mean_height: mean_height(items),
        }
    }
}

/// Arithmetic mean of item heights, zero when there are none.
pub fn mean_height<'a, I>(items: I) -> f32
where
    I: IntoIterator<Item = &'a PositionedItem>,
{
    let (sum, count) = items
        .into_iter()
        .fold((0.0_f32, 0_usize), |(sum, count), item| (sum + item.height, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f32
    }
}

/// Join the text of items left-to-right with single spaces.
pub fn joined_text(items: &[PositionedItem]) -> String {
    items
        .iter()
        .map(|item| item.text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
