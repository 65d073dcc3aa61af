//! Error types for the fallible edges of the crate.
//!
//! Extraction itself never fails: sparse or degenerate geometry yields a
//! smaller result. Only configuration and input loading can error.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading thresholds or page bundles.
#[derive(Error, Debug)]
pub enum PagegridError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("threshold `{name}` must be positive, got {value}")]
    InvalidThreshold { name: &'static str, value: f32 },
}

pub type Result<T> = std::result::Result<T, PagegridError>;
