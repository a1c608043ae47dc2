use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{SelectionError, SelectionParams, WindowPick};

/// Human-readable summary of a selection run, written as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionReport {
    /// Parameters of the run
    pub params: SelectionParams,

    /// Rows in the input library
    pub input_rows: usize,

    /// Rows in the filtered library
    pub output_rows: usize,

    /// Windows that produced a peptide, before deduplication
    pub selection_count: usize,

    /// Windows without any candidate
    pub empty_windows: usize,

    /// Distinct selected peptides, sorted
    pub selected_peptides: Vec<String>,

    /// Per-target outcome in grid order
    pub windows: Vec<WindowPick>,
}

impl SelectionReport {
    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, SelectionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, SelectionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the report to a JSON file
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), SelectionError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}
