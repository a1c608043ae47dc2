use serde::{Deserialize, Serialize};

/// Default peptide identity column (OpenSWATH/TraML-style TSV)
pub const PEPTIDE_COLUMN: &str = "ModifiedPeptideSequence";
/// Default precursor charge column
pub const CHARGE_COLUMN: &str = "PrecursorCharge";
/// Default normalized retention time column
pub const RETENTION_TIME_COLUMN: &str = "NormalizedRetentionTime";
/// Default fragment intensity column
pub const INTENSITY_COLUMN: &str = "LibraryIntensity";

/// Names of the columns the selection needs.
///
/// Every other column of the library is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryColumns {
    /// Peptide identity (modified sequence)
    pub peptide: String,

    /// Precursor charge state
    pub charge: String,

    /// Normalized retention time
    pub retention_time: String,

    /// Per-fragment library intensity
    pub intensity: String,
}

impl Default for LibraryColumns {
    fn default() -> Self {
        Self {
            peptide: PEPTIDE_COLUMN.to_string(),
            charge: CHARGE_COLUMN.to_string(),
            retention_time: RETENTION_TIME_COLUMN.to_string(),
            intensity: INTENSITY_COLUMN.to_string(),
        }
    }
}

/// Header positions of the required columns, resolved once per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnPositions {
    pub peptide: usize,
    pub charge: usize,
    pub retention_time: usize,
    pub intensity: usize,
}

impl LibraryColumns {
    /// Resolve column names against a header row.
    ///
    /// Header cells are compared after trimming surrounding whitespace.
    pub(crate) fn resolve(
        &self,
        headers: &csv::StringRecord,
    ) -> Result<ColumnPositions, super::LibraryError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| super::LibraryError::MissingColumn(name.to_string()))
        };

        Ok(ColumnPositions {
            peptide: find(&self.peptide)?,
            charge: find(&self.charge)?,
            retention_time: find(&self.retention_time)?,
            intensity: find(&self.intensity)?,
        })
    }
}
