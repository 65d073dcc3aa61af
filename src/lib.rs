//! `pagegrid` - Table and document reconstruction from positioned page text
//!
//! # Features
//!
//! - **Ruled tables**: column and row boundaries from ruling lines
//! - **Unruled tables**: columns discovered from gaps in text start positions
//! - **Wrapped rows**: continuation rows folded into the row they extend
//! - **Headers**: numeric, plain and two-row compound headers classified by shape
//! - **Plain text**: reading-order lines and paragraphs with proportional spacing
//! - **Crop regions**: extraction restricted to user-drawn rectangles
//!
//! # Example
//!
//! ```rust
//! use pagegrid::{compile_tables, ExtractOptions, PageInput, PositionedItem};
//!
//! let item = |text: &str, x: f32, y: f32| PositionedItem {
//!     text: text.into(),
//!     x,
//!     y,
//!     width: 30.0,
//!     height: 10.0,
//!     page: 1,
//! };
//! let page = PageInput {
//!     page: 1,
//!     items: vec![
//!         item("Year", 0.0, 0.0), item("Sales", 100.0, 0.0), item("Cost", 200.0, 0.0),
//!         item("2024", 0.0, 20.0), item("90", 100.0, 20.0), item("40", 200.0, 20.0),
//!     ],
//!     lines: None,
//! };
//! let table = compile_tables(&[page], &[], &ExtractOptions::default());
//! assert_eq!(table.headers, vec!["Year", "Sales", "Cost"]);
//! ```

pub mod compile;
pub mod config;
pub mod error;
pub mod extract;
pub mod input;
pub mod render;

pub use compile::{compile_document, compile_tables, PageInput};
pub use config::Thresholds;
pub use error::{PagegridError, Result};
pub use extract::{
    build_table_data, extract_page_text, CropRegion, ExtractOptions, PageLine, PageLines,
    PositionedItem, TableData,
};
pub use input::PageBundle;

/// Version of pagegrid
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
