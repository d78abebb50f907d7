pub mod commands;
pub mod dataset;
pub mod inspection;
pub mod utils;

use std::{
    io::{self, IsTerminal},
    sync::Arc,
};

use camino::Utf8PathBuf;
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand, ValueEnum, builder::ValueHint};
use clap_complete::Shell;
use log::LevelFilter;
use strum_macros::Display;

use crate::inspection::{
    DataTypesInspection, InspectionStrategy, SummaryStatisticsInspection,
};

/// Default number of rows per record batch when reading input files.
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Parse a usize that must be at least 1.
fn parse_at_least_one(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|e| format!("{e}"))?;
    if n == 0 {
        Err("value must be at least 1".into())
    } else {
        Ok(n)
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace).
    ///
    /// RUST_LOG takes precedence when set.
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect a dataset with one or more inspection strategies.
    ///
    /// Examples:
    ///   # Column types and non-null counts, then summary statistics
    ///   frame-lens inspect data.parquet
    ///
    ///   # Only summary statistics of a CSV file
    ///   frame-lens inspect data.csv --strategy summary
    ///
    ///   # Machine-readable output, one JSON document per strategy
    ///   frame-lens inspect data.arrow --format json
    #[command(verbatim_doc_comment)]
    Inspect(InspectArgs),

    /// Detect the format of a data file.
    Identify(IdentifyArgs),

    /// Generate shell completions for your shell.
    ///
    /// To add completions for your current shell session only:
    ///   zsh:  eval "$(frame-lens completions zsh)"
    ///   bash: eval "$(frame-lens completions bash)"
    ///   fish: frame-lens completions fish | source
    #[command(verbatim_doc_comment)]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

impl Commands {
    pub fn generate_completions(shell: Shell) {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            "frame-lens",
            &mut std::io::stdout(),
        );
    }
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the dataset (Parquet, Arrow IPC, CSV or TSV)
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: Utf8PathBuf,

    /// Inspection strategy to run. Can be specified multiple times; strategies run in order.
    #[arg(
        long,
        short = 's',
        value_enum,
        default_values_t = [InspectionKind::Types, InspectionKind::Summary]
    )]
    pub strategy: Vec<InspectionKind>,

    /// Format of the input file.
    #[arg(long, short = 'i', value_enum, default_value_t = InputFormat::Auto)]
    pub input_format: InputFormat,

    /// Output format (auto-detects based on TTY if not specified)
    #[arg(long, short = 'f', value_enum, default_value = "auto")]
    pub format: OutputFormat,

    /// Number of rows per record batch when reading the input.
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE, value_parser = parse_at_least_one)]
    pub batch_size: usize,
}

#[derive(Args, Debug)]
pub struct IdentifyArgs {
    /// Path to the file to identify
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: Utf8PathBuf,
    /// Output format (auto-detects based on TTY if not specified)
    #[arg(long, short = 'f', value_enum, default_value = "auto")]
    pub format: OutputFormat,
}

/// Built-in inspection strategies selectable from the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Display)]
#[value(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InspectionKind {
    /// Column data types and non-null counts
    Types,
    /// Summary statistics of numeric and categorical columns
    Summary,
}

impl From<InspectionKind> for Arc<dyn InspectionStrategy> {
    fn from(kind: InspectionKind) -> Self {
        match kind {
            InspectionKind::Types => Arc::new(DataTypesInspection),
            InspectionKind::Summary => Arc::new(SummaryStatisticsInspection),
        }
    }
}

/// Input file format.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Display)]
#[value(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InputFormat {
    /// Detect from magic bytes, falling back to the file extension
    #[default]
    Auto,
    Parquet,
    /// Arrow IPC, file or stream variant
    Arrow,
    Csv,
    Tsv,
}

/// Output format for inspect commands
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Auto-detect: JSON if stdout is not a TTY, otherwise text
    #[default]
    Auto,
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
}

impl OutputFormat {
    pub fn resolves_to_json(&self) -> bool {
        match self {
            OutputFormat::Auto => !io::stdout().is_terminal(),
            OutputFormat::Text => false,
            OutputFormat::Json => true,
        }
    }
}
