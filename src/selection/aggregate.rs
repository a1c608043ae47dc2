//! Per-precursor intensity totals.

use std::collections::HashMap;

use crate::library::{Charge, LibraryRow, SpectralLibrary};

/// A (peptide, charge) pair borrowed from a library row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrecursorKey<'a> {
    /// Peptide identity
    pub peptide: &'a str,
    /// Precursor charge
    pub charge: Charge,
}

impl<'a> PrecursorKey<'a> {
    /// Key of a row; rows without a peptide or a charge have none
    pub fn of(row: &'a LibraryRow) -> Option<Self> {
        if row.peptide.is_empty() {
            return None;
        }
        row.charge.map(|charge| Self {
            peptide: &row.peptide,
            charge,
        })
    }
}

/// Summed fragment intensity for every precursor of a library
#[derive(Debug, Clone, Default)]
pub struct IntensityAggregate<'a> {
    totals: HashMap<PrecursorKey<'a>, f64>,
}

/// A library row annotated with its precursor's total intensity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<'a> {
    /// Position of the row in the input library
    pub row_index: usize,
    /// Peptide identity
    pub peptide: &'a str,
    /// Precursor charge
    pub charge: Charge,
    /// Normalized retention time of the row
    pub retention_time: f64,
    /// Total fragment intensity of the row's precursor
    pub aggregate_intensity: f64,
}

impl<'a> IntensityAggregate<'a> {
    /// Sum `intensity` over all rows sharing a (peptide, charge) pair.
    ///
    /// Missing intensities are skipped; a precursor whose intensities are all
    /// missing totals 0. Rows without a key are not aggregated.
    pub fn from_library(library: &'a SpectralLibrary) -> Self {
        let mut totals: HashMap<PrecursorKey<'a>, f64> = HashMap::new();
        for row in library.rows() {
            if let Some(key) = PrecursorKey::of(row) {
                *totals.entry(key).or_insert(0.0) += row.intensity.unwrap_or(0.0);
            }
        }
        Self { totals }
    }

    /// Total intensity of one precursor
    pub fn total(&self, key: &PrecursorKey<'_>) -> Option<f64> {
        self.totals.get(key).copied()
    }

    /// Number of precursors
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Returns true if no precursor was aggregated
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Attach the precursor totals back onto every row of `library`.
    ///
    /// Rows without a retention time, and rows whose precursor is unknown to
    /// this aggregate, are dropped.
    pub fn join(&self, library: &'a SpectralLibrary) -> Vec<Candidate<'a>> {
        library
            .rows()
            .iter()
            .filter_map(|row| {
                let key = PrecursorKey::of(row)?;
                let retention_time = row.retention_time?;
                self.total(&key).map(|aggregate_intensity| Candidate {
                    row_index: row.index,
                    peptide: key.peptide,
                    charge: key.charge,
                    retention_time,
                    aggregate_intensity,
                })
            })
            .collect()
    }
}
