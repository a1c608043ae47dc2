//! TOML configuration file support.
//!
//! Settings that are the same for every run can live in a config file instead
//! of on the command line. Command-line flags take precedence.
//!
//! ```toml
//! # pseudo-irt.toml
//! [selection]
//! n_irts = 20
//! min_rt = -20.0
//! max_rt = 120.0
//! window_width = 0.5
//!
//! [columns]
//! peptide = "ModifiedPeptideSequence"
//! charge = "PrecursorCharge"
//! retention_time = "NormalizedRetentionTime"
//! intensity = "LibraryIntensity"
//!
//! [output]
//! include_index = true
//! ```

use anyhow::{Context, Result};
use pseudo_irt::library::LibraryColumns;
use serde::Deserialize;
use std::path::Path;

/// Root configuration structure for pseudo-irt.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Selection parameters.
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Library column names.
    #[serde(default)]
    pub columns: LibraryColumns,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Grid and window settings.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionConfig {
    /// Number of iRTs to select.
    pub n_irts: Option<usize>,

    /// Minimum RT of the target grid.
    pub min_rt: Option<f64>,

    /// Maximum RT of the target grid.
    pub max_rt: Option<f64>,

    /// Width of the window above each target RT.
    pub window_width: Option<f64>,
}

/// Settings for the written library.
#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Write the leading row-index column.
    pub include_index: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
