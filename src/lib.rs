//! # pseudo-irt - Pseudo iRT Selection from Spectral Libraries
//!
//! `pseudo_irt` picks a small set of peptides from an existing spectral
//! library to act as internal retention-time standards ("pseudo-iRTs") for
//! cross-run RT alignment. Instead of spiking in calibration peptides, the
//! standards are chosen by library intensity so that they are likely to be
//! measured in every run.
//!
//! ## How peptides are chosen
//!
//! 1. Fragment intensities are summed per (peptide, charge) precursor.
//! 2. `n_irts` target retention times are spread evenly over `[min_rt, max_rt]`.
//! 3. For every target `t`, the rows with `t < RT < t + 0.5` are searched and the
//!    peptide with the highest summed intensity is kept. Empty windows are skipped.
//! 4. The kept peptides are deduplicated and the library is filtered to their rows.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pseudo_irt::library::{LibraryColumns, SpectralLibrary, WriteOptions};
//! use pseudo_irt::selection::{select_pseudo_irts, SelectionParams};
//!
//! let library = SpectralLibrary::from_path("library.tsv", &LibraryColumns::default())?;
//!
//! let params = SelectionParams::new(20, -20.0, 120.0);
//! let selection = select_pseudo_irts(&library, &params)?;
//! println!("{}", selection.selection_count());
//!
//! selection.library().write_tsv("pseudo_irts.tsv", WriteOptions::default())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Library Format
//!
//! Tab-separated text with a header row. Four columns are required:
//!
//! | Column | Type | Description |
//! |--------|------|-------------|
//! | ModifiedPeptideSequence | text | Peptide identity |
//! | PrecursorCharge | number | Precursor charge state |
//! | NormalizedRetentionTime | number | Library RT |
//! | LibraryIntensity | number | Fragment intensity |
//!
//! All other columns are passed through unchanged. The column names can be
//! overridden with [`library::LibraryColumns`].
//!
//! ## Architecture
//!
//! - [`library`]: Loading, filtering and writing tab-separated libraries
//! - [`selection`]: Intensity aggregation, RT grid and per-window selection

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod library;
pub mod selection;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::library::{
        LibraryColumns, LibraryError, LibraryRow, SpectralLibrary, WriteOptions,
    };
    pub use crate::selection::{
        select_pseudo_irts, PickedPeptide, PseudoIrtSelection, SelectionError, SelectionParams,
        SelectionReport, WindowPick, DEFAULT_WINDOW_WIDTH,
    };
}
