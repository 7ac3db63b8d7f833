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
    author = "RNAPOT Developers",
    version,
    about = "RNAPOT CLI - Train a knowledge-based statistical potential on RNA 3D structures and use it to score candidate models.",
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
    /// Derive per-pair-type potential profiles from a directory of known structures.
    Train(TrainArgs),
    /// Score every structure in a directory against trained profiles.
    Score(ScoreArgs),
}

/// Overrides for the model parameters. Training and scoring must use the same values.
#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// Distance cutoff in Angstroms; only pairs strictly closer are counted.
    #[arg(long, value_name = "FLOAT")]
    pub max_distance: Option<f64>,

    /// Minimum sequence separation between two residues of a counted pair.
    #[arg(long, value_name = "INT")]
    pub position_skip: Option<usize>,

    /// Upper clamp for derived scores.
    #[arg(long, value_name = "FLOAT")]
    pub maximum_score: Option<f64>,

    /// Width of a distance bin in Angstroms.
    #[arg(long, value_name = "FLOAT")]
    pub bin_width: Option<f64>,
}

/// Arguments for the `train` subcommand.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Directory of training structures (PDB or mmCIF).
    #[arg(short, long, required = true, value_name = "DIR")]
    pub input: PathBuf,

    /// Directory the profiles and their manifest are written to.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Skip structures that cannot be read instead of aborting.
    #[arg(long)]
    pub keep_going: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S model.bin-width=0.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Directory of trained profiles, as written by `train`.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub profiles: PathBuf,

    /// Directory of structures to score (PDB or mmCIF).
    #[arg(short, long, required = true, value_name = "DIR")]
    pub input: PathBuf,

    /// Write the scores as CSV to this path.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Fail when a pair type has no trained profile instead of scoring it as zero.
    #[arg(long)]
    pub strict: bool,

    /// File name to leave out of scoring (e.g. the native structure). Repeatable.
    #[arg(short = 'x', long, value_name = "FILE")]
    pub exclude: Vec<String>,

    /// Skip structures that cannot be read instead of aborting.
    #[arg(long)]
    pub keep_going: bool,

    /// Do not print the score table to the console.
    #[arg(long)]
    pub no_echo: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S scoring.missing-profile=error
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
