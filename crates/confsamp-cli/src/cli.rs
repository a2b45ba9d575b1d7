use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "confsamp CLI - A command-line interface for confsamp, a toolkit for driving growing-string-method transition-state searches over conformer ensembles and analyzing the resulting reaction paths.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run growing-string transition-state searches for a conformer ensemble.
    Run(RunArgs),
    /// Analyze converged string outputs into a stereochemistry summary table.
    Analyze(AnalyzeArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the multi-structure XYZ file with one conformer per frame.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to the main configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Scratch directory where per-job working directories are created.
    #[arg(short, long, value_name = "PATH", default_value = "scratch")]
    pub scratch: PathBuf,

    /// Run only the conformer with this 0-based index.
    /// Defaults to the batch-scheduler array task id when one is set,
    /// otherwise all conformers are run.
    #[arg(long, value_name = "INT")]
    pub job_index: Option<usize>,

    // --- Driver Overrides ---
    /// Override the string-method driver executable from the config file.
    #[arg(long, value_name = "PATH")]
    pub program: Option<PathBuf>,

    /// Override the number of nodes grown along each string.
    #[arg(long, value_name = "INT")]
    pub nnodes: Option<usize>,

    /// Override the total molecular charge.
    #[arg(long, value_name = "INT")]
    pub charge: Option<i32>,

    /// Override the spin multiplicity.
    #[arg(long, value_name = "INT")]
    pub multiplicity: Option<u32>,

    /// Override the CPU cores handed to the driver for each job.
    #[arg(long, value_name = "INT")]
    pub num_cpus: Option<usize>,
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Scratch directory containing the per-job string directories.
    #[arg(short, long, value_name = "PATH", default_value = "scratch")]
    pub scratch: PathBuf,

    /// Path to the main configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Write the summary table as CSV to this path.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Override the ensemble temperature in kelvin from the config file.
    #[arg(short = 't', long, value_name = "FLOAT")]
    pub temperature: Option<f64>,
}
