//! Heuristic thresholds loaded from `~/.config/pagegrid/thresholds.toml`.
//!
//! Every multiplier applied to the page's mean item height lives here so a
//! document class can be tuned without touching the extraction code.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PagegridError, Result};

/// Tunable constants for row grouping, column detection and text layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Thresholds {
    /// Items whose Y differs from the row reference by more than
    /// `row_tolerance × mean height` start a new row.
    pub row_tolerance: f32,
    /// Rulings shorter than this fraction of the table extent are ignored.
    pub ruling_min_fraction: f32,
    /// Distance (page units) under which ruling positions are merged.
    pub ruling_cluster_distance: f32,
    /// X-start spreads below `single_column_spread × mean height` are one column.
    pub single_column_spread: f32,
    /// Histogram bin width as a multiple of mean height.
    pub bin_width_factor: f32,
    /// Lower bound on the histogram bin width (page units).
    pub min_bin_width: f32,
    /// Minimum empty run, as a multiple of mean height, that separates columns.
    pub column_gap: f32,
    /// More candidate boundaries than this means noise, not a table.
    pub max_column_boundaries: usize,
    /// A row must touch this many distinct columns to count as tabular.
    pub min_table_columns: usize,
    /// Vertical gap, as a multiple of the line's mean height, that breaks a paragraph.
    pub paragraph_gap: f32,
    /// Width of one output space as a multiple of mean height.
    pub space_width: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            row_tolerance: 0.6,
            ruling_min_fraction: 0.25,
            ruling_cluster_distance: 3.0,
            single_column_spread: 3.0,
            bin_width_factor: 0.3,
            min_bin_width: 2.0,
            column_gap: 0.8,
            max_column_boundaries: 30,
            min_table_columns: 3,
            paragraph_gap: 1.8,
            space_width: 0.4,
        }
    }
}

impl Thresholds {
    /// Parse thresholds from a TOML string. Missing keys keep their defaults.
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self> {
        let thresholds: Self = toml::from_str(content).map_err(|source| PagegridError::Config {
            path: origin.to_path_buf(),
            source,
        })?;
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Load thresholds from an explicit file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content, path)
    }

    /// Load thresholds from the user config directory.
    ///
    /// Returns the defaults if the file doesn't exist.
    pub fn load_default() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Reject multipliers that would collapse every threshold to zero.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("row_tolerance", self.row_tolerance),
            ("ruling_cluster_distance", self.ruling_cluster_distance),
            ("bin_width_factor", self.bin_width_factor),
            ("min_bin_width", self.min_bin_width),
            ("column_gap", self.column_gap),
            ("paragraph_gap", self.paragraph_gap),
            ("space_width", self.space_width),
        ];
        for (name, value) in checks {
            if value.is_nan() || value <= 0.0 {
                return Err(PagegridError::InvalidThreshold { name, value });
            }
        }
        if self.ruling_min_fraction.is_nan() || self.ruling_min_fraction < 0.0 {
            return Err(PagegridError::InvalidThreshold {
                name: "ruling_min_fraction",
                value: self.ruling_min_fraction,
            });
        }
        Ok(())
    }
}

/// Return the path to the thresholds config file.
fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pagegrid")
        .join("thresholds.toml")
}
