use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod config;
mod select;

pub use select::SelectOptions;

/// pseudo-irt - Select pseudo iRT peptides from a spectral library
#[derive(Parser)]
#[command(name = "pseudo-irt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Input spectral libraries (TSV); only the first one is processed
    #[arg(
        short = 'i',
        long = "input-libraries",
        alias = "input_libraries",
        value_name = "FILE",
        num_args = 1..,
        required = true
    )]
    input_libraries: Vec<PathBuf>,

    /// Number of iRTs to select (size of the target RT grid)
    #[arg(short = 'n', long, alias = "n_irts", value_name = "N")]
    n_irts: Option<usize>,

    /// Minimum RT of the target grid
    #[arg(long, alias = "min_rt", value_name = "RT", allow_negative_numbers = true)]
    min_rt: Option<f64>,

    /// Maximum RT of the target grid
    #[arg(long, alias = "max_rt", value_name = "RT", allow_negative_numbers = true)]
    max_rt: Option<f64>,

    /// Width of the RT window searched above each target (default: 0.5)
    #[arg(short = 'w', long, value_name = "RT")]
    window_width: Option<f64>,

    /// Output library path (TSV)
    #[arg(short = 'o', long, value_name = "FILE")]
    output: PathBuf,

    /// Write a JSON report of the per-window picks
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Do not write the leading row-index column
    #[arg(long)]
    no_index: bool,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let Cli {
        verbose: _,
        input_libraries,
        n_irts,
        min_rt,
        max_rt,
        window_width,
        output,
        report,
        no_index,
        config,
    } = cli;

    select::run(SelectOptions {
        input_libraries,
        n_irts,
        min_rt,
        max_rt,
        window_width,
        output,
        report,
        no_index,
        config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_distinct_flags() {
        let cli = Cli::try_parse_from([
            "pseudo-irt",
            "-i",
            "a.tsv",
            "b.tsv",
            "-n",
            "20",
            "--min-rt",
            "-20",
            "--max-rt",
            "120.5",
            "-o",
            "out.tsv",
            "-vv",
        ])
        .unwrap();

        assert_eq!(
            cli.input_libraries,
            vec![PathBuf::from("a.tsv"), PathBuf::from("b.tsv")]
        );
        assert_eq!(cli.n_irts, Some(20));
        assert_eq!(cli.min_rt, Some(-20.0));
        assert_eq!(cli.max_rt, Some(120.5));
        assert_eq!(cli.window_width, None);
        assert_eq!(cli.output, PathBuf::from("out.tsv"));
        assert_eq!(cli.verbosity(), 2);
        assert!(!cli.no_index);
    }

    #[test]
    fn test_parse_underscore_aliases() {
        let cli = Cli::try_parse_from([
            "pseudo-irt",
            "--input_libraries",
            "lib.tsv",
            "--n_irts",
            "5",
            "--min_rt",
            "0",
            "--max_rt",
            "10",
            "--output",
            "out.tsv",
        ])
        .unwrap();

        assert_eq!(cli.n_irts, Some(5));
        assert_eq!(cli.min_rt, Some(0.0));
        assert_eq!(cli.max_rt, Some(10.0));
    }

    #[test]
    fn test_output_required() {
        assert!(Cli::try_parse_from(["pseudo-irt", "-i", "lib.tsv", "-n", "5"]).is_err());
    }

    #[test]
    fn test_input_required() {
        assert!(Cli::try_parse_from(["pseudo-irt", "-o", "out.tsv"]).is_err());
    }
}
