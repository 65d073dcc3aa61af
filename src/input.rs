//! JSON page bundles handed over by the text extractor / OCR stage.
//!
//! ```json
//! {
//!   "pages": [
//!     {
//!       "page": 1,
//!       "items": [{ "text": "Name", "x": 10, "y": 20, "width": 30, "height": 10, "page": 1 }],
//!       "lines": { "horizontal": [], "vertical": [] }
//!     }
//!   ],
//!   "regions": []
//! }
//! ```

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compile::PageInput;
use crate::error::Result;
use crate::extract::CropRegion;

/// Pages plus the crop regions drawn over them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageBundle {
    #[serde(default)]
    pub pages: Vec<PageInput>,
    #[serde(default)]
    pub regions: Vec<CropRegion>,
}

impl PageBundle {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read a bundle from a file, or from stdin when `path` is `-`.
    pub fn load(path: &Path) -> Result<Self> {
        if path == Path::new("-") {
            return Self::from_reader(std::io::stdin().lock());
        }
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }
}
