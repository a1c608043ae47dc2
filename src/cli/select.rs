use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;

use pseudo_irt::library::{SpectralLibrary, WriteOptions};
use pseudo_irt::selection::{select_pseudo_irts, SelectionParams, DEFAULT_WINDOW_WIDTH};

use super::config::{Config, SelectionConfig};

/// Resolved command-line values for a selection run
pub struct SelectOptions {
    pub input_libraries: Vec<PathBuf>,
    pub n_irts: Option<usize>,
    pub min_rt: Option<f64>,
    pub max_rt: Option<f64>,
    pub window_width: Option<f64>,
    pub output: PathBuf,
    pub report: Option<PathBuf>,
    pub no_index: bool,
    pub config: Option<PathBuf>,
}

/// Select pseudo iRTs from the first input library and write them out
pub fn run(options: SelectOptions) -> Result<()> {
    let config = match &options.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let params = resolve_params(&options, &config.selection)?;
    let write_options = WriteOptions {
        include_index: !options.no_index && config.output.include_index.unwrap_or(true),
    };

    let (input, ignored) = options
        .input_libraries
        .split_first()
        .context("No input library given")?;
    if !ignored.is_empty() {
        warn!(
            "Only the first input library is processed; ignoring {} more",
            ignored.len()
        );
    }

    if !input.exists() {
        anyhow::bail!("Input library does not exist: {}", input.display());
    }

    info!("pseudo-irt - pseudo iRT selection");
    info!("=================================");
    info!("Input:  {}", input.display());
    info!("Output: {}", options.output.display());
    info!(
        "Grid: {} points over [{}, {}], window width {}",
        params.n_irts, params.min_rt, params.max_rt, params.window_width
    );

    let library = SpectralLibrary::from_path(input, &config.columns)
        .with_context(|| format!("Failed to load library: {}", input.display()))?;
    info!(
        "Loaded {} rows, {} precursors",
        library.len(),
        library.precursor_count()
    );

    let selection = select_pseudo_irts(&library, &params).context("Selection failed")?;

    // Per-window selections, before deduplication
    println!("{}", selection.selection_count());

    let written = selection
        .library()
        .write_tsv(&options.output, write_options)
        .with_context(|| format!("Failed to write library: {}", options.output.display()))?;
    info!(
        "Wrote {} rows for {} peptides",
        written,
        selection.peptides().len()
    );

    if let Some(report_path) = &options.report {
        selection
            .report()
            .write_json(report_path)
            .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
        info!("Report: {}", report_path.display());
    }

    Ok(())
}

/// Merge command-line values over config-file values
fn resolve_params(options: &SelectOptions, config: &SelectionConfig) -> Result<SelectionParams> {
    let n_irts = options
        .n_irts
        .or(config.n_irts)
        .context("Number of iRTs not set: pass --n-irts or set selection.n_irts")?;
    let min_rt = options
        .min_rt
        .or(config.min_rt)
        .context("Minimum RT not set: pass --min-rt or set selection.min_rt")?;
    let max_rt = options
        .max_rt
        .or(config.max_rt)
        .context("Maximum RT not set: pass --max-rt or set selection.max_rt")?;
    let window_width = options
        .window_width
        .or(config.window_width)
        .unwrap_or(DEFAULT_WINDOW_WIDTH);

    let params = SelectionParams::new(n_irts, min_rt, max_rt).with_window_width(window_width);
    params.validate()?;
    Ok(params)
}
