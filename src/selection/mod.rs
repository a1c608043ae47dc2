//! Pseudo-iRT selection.
//!
//! The selection samples `n_irts` target retention times evenly over
//! `[min_rt, max_rt]`. For every target `t` it looks at the library rows with
//! `t < RT < t + window_width` and keeps the peptide whose precursor has the
//! highest summed fragment intensity. The chosen peptides are deduplicated and
//! the library is filtered down to their rows.
//!
//! ```rust
//! use pseudo_irt::library::{LibraryColumns, SpectralLibrary};
//! use pseudo_irt::selection::{select_pseudo_irts, SelectionParams};
//!
//! let tsv = "ModifiedPeptideSequence\tPrecursorCharge\tNormalizedRetentionTime\tLibraryIntensity
//! PEPTIDEK\t2\t10.2\t100
//! ANOTHERR\t2\t10.3\t50";
//! let library = SpectralLibrary::from_reader(tsv.as_bytes(), &LibraryColumns::default())?;
//!
//! let selection = select_pseudo_irts(&library, &SelectionParams::new(1, 10.0, 10.0))?;
//! assert_eq!(selection.selection_count(), 1);
//! assert!(selection.peptides().contains("PEPTIDEK"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod aggregate;
mod error;
pub mod grid;
mod report;


use std::collections::BTreeSet;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::library::{Charge, SpectralLibrary};

pub use aggregate::{Candidate, IntensityAggregate, PrecursorKey};
pub use error::SelectionError;
pub use grid::linspace;
pub use report::SelectionReport;

/// Default width of the retention-time window above each target
pub const DEFAULT_WINDOW_WIDTH: f64 = 0.5;

/// Parameters of a pseudo-iRT selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionParams {
    /// Number of target retention times (upper bound on selected peptides)
    pub n_irts: usize,

    /// First target retention time
    pub min_rt: f64,

    /// Last target retention time
    pub max_rt: f64,

    /// Width of the open window `(t, t + window_width)` searched per target
    pub window_width: f64,
}

impl SelectionParams {
    /// Create parameters with the default window width
    pub fn new(n_irts: usize, min_rt: f64, max_rt: f64) -> Self {
        Self {
            n_irts,
            min_rt,
            max_rt,
            window_width: DEFAULT_WINDOW_WIDTH,
        }
    }

    /// Set the window width
    pub fn with_window_width(mut self, window_width: f64) -> Self {
        self.window_width = window_width;
        self
    }

    /// Check that the parameters describe a usable grid
    pub fn validate(&self) -> Result<(), SelectionError> {
        if self.n_irts == 0 {
            return Err(SelectionError::InvalidParameters(
                "number of iRTs must be positive".to_string(),
            ));
        }
        if !self.min_rt.is_finite() || !self.max_rt.is_finite() {
            return Err(SelectionError::InvalidParameters(format!(
                "RT bounds must be finite (got {} and {})",
                self.min_rt, self.max_rt
            )));
        }
        if self.min_rt > self.max_rt {
            return Err(SelectionError::InvalidParameters(format!(
                "min_rt ({}) is greater than max_rt ({})",
                self.min_rt, self.max_rt
            )));
        }
        if !(self.window_width.is_finite() && self.window_width > 0.0) {
            return Err(SelectionError::InvalidParameters(format!(
                "window width must be positive (got {})",
                self.window_width
            )));
        }
        Ok(())
    }

    /// Target retention times
    pub fn grid(&self) -> Vec<f64> {
        linspace(self.min_rt, self.max_rt, self.n_irts)
    }
}

/// The peptide chosen for one target retention time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickedPeptide {
    /// Peptide identity
    pub peptide: String,
    /// Charge of the winning precursor
    pub charge: Charge,
    /// Retention time of the winning row
    pub retention_time: f64,
    /// Summed fragment intensity of the winning precursor
    pub aggregate_intensity: f64,
    /// Position of the winning row in the input library
    pub row_index: usize,
}

impl From<Candidate<'_>> for PickedPeptide {
    fn from(candidate: Candidate<'_>) -> Self {
        Self {
            peptide: candidate.peptide.to_string(),
            charge: candidate.charge,
            retention_time: candidate.retention_time,
            aggregate_intensity: candidate.aggregate_intensity,
            row_index: candidate.row_index,
        }
    }
}

/// Outcome for one target retention time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowPick {
    /// Target retention time (exclusive lower window bound)
    pub target_rt: f64,
    /// Exclusive upper window bound
    pub window_end: f64,
    /// Best candidate, or `None` when the window holds no rows
    pub candidate: Option<PickedPeptide>,
}

/// Result of [`select_pseudo_irts`]
#[derive(Debug, Clone)]
pub struct PseudoIrtSelection {
    params: SelectionParams,
    input_rows: usize,
    picks: Vec<WindowPick>,
    peptides: BTreeSet<String>,
    library: SpectralLibrary,
}

impl PseudoIrtSelection {
    /// Parameters the selection ran with
    pub fn params(&self) -> &SelectionParams {
        &self.params
    }

    /// One entry per target retention time, in grid order
    pub fn picks(&self) -> &[WindowPick] {
        &self.picks
    }

    /// Number of windows that produced a peptide, before deduplication
    pub fn selection_count(&self) -> usize {
        self.picks.iter().filter(|p| p.candidate.is_some()).count()
    }

    /// Distinct selected peptides
    pub fn peptides(&self) -> &BTreeSet<String> {
        &self.peptides
    }

    /// Library rows of the selected peptides
    pub fn library(&self) -> &SpectralLibrary {
        &self.library
    }

    /// Consume the selection, keeping only the filtered library
    pub fn into_library(self) -> SpectralLibrary {
        self.library
    }

    /// Summary of the run suitable for serialization
    pub fn report(&self) -> SelectionReport {
        SelectionReport {
            params: self.params,
            input_rows: self.input_rows,
            output_rows: self.library.len(),
            selection_count: self.selection_count(),
            empty_windows: self.picks.len() - self.selection_count(),
            selected_peptides: self.peptides.iter().cloned().collect(),
            windows: self.picks.clone(),
        }
    }
}

/// Select pseudo-iRT peptides from `library`.
///
/// Empty windows are skipped. Rows with a missing retention time, charge or
/// peptide are never candidates but are still written if their peptide is
/// selected. When several rows in a window share the highest aggregate
/// intensity, the row that comes first in the library wins.
pub fn select_pseudo_irts(
    library: &SpectralLibrary,
    params: &SelectionParams,
) -> Result<PseudoIrtSelection, SelectionError> {
    params.validate()?;

    let aggregate = IntensityAggregate::from_library(library);
    let mut candidates = aggregate.join(library);
    // Stable, so equal RTs stay in library order.
    candidates.sort_by(|a, b| a.retention_time.total_cmp(&b.retention_time));
    debug!(
        "Aggregated {} rows into {} precursors",
        candidates.len(),
        aggregate.len()
    );

    let picks: Vec<WindowPick> = params
        .grid()
        .into_iter()
        .map(|target_rt| {
            let window_end = target_rt + params.window_width;
            let candidate = best_in_window(&candidates, target_rt, window_end);
            match &candidate {
                Some(c) => debug!(
                    "RT {:.3}: {} (charge {}, RT {:.3}, intensity {})",
                    target_rt, c.peptide, c.charge, c.retention_time, c.aggregate_intensity
                ),
                None => debug!("RT {:.3}: no candidate in ({:.3}, {:.3})", target_rt, target_rt, window_end),
            }
            WindowPick {
                target_rt,
                window_end,
                candidate: candidate.map(PickedPeptide::from),
            }
        })
        .collect();

    let peptides: BTreeSet<String> = picks
        .iter()
        .filter_map(|p| p.candidate.as_ref())
        .map(|c| c.peptide.clone())
        .collect();

    let filtered = library.subset(&peptides);
    info!(
        "Selected {} unique peptides from {} windows ({} rows kept of {})",
        peptides.len(),
        picks.len(),
        filtered.len(),
        library.len()
    );

    Ok(PseudoIrtSelection {
        params: *params,
        input_rows: library.len(),
        picks,
        peptides,
        library: filtered,
    })
}

/// Best candidate with `start < RT < end`.
///
/// `sorted` must be ordered by retention time. Ties on aggregate intensity go
/// to the lowest row index.
pub fn best_in_window<'a>(sorted: &[Candidate<'a>], start: f64, end: f64) -> Option<Candidate<'a>> {
    let lo = sorted.partition_point(|c| c.retention_time <= start);
    let hi = sorted.partition_point(|c| c.retention_time < end);

    sorted.get(lo..hi)?.iter().copied().max_by(|a, b| {
        a.aggregate_intensity
            .total_cmp(&b.aggregate_intensity)
            .then_with(|| b.row_index.cmp(&a.row_index))
    })
}
