//! # pseudo-irt
//!
//! Command-line tool that selects pseudo iRT peptides from a spectral library.
//!
//! ## Usage
//!
//! ```bash
//! # 20 standards between RT -20 and 120
//! pseudo-irt -i library.tsv -n 20 --min-rt -20 --max-rt 120 -o pseudo_irts.tsv
//!
//! # Same, with settings from a config file and a JSON report
//! pseudo-irt -i library.tsv --config pseudo-irt.toml -o pseudo_irts.tsv --report picks.json
//! ```

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
