//! CLI parse: clap types for fileguard. No behavior; definitions only.

use crate::tree::HashAlgorithm;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Fileguard CLI - detect added, removed and modified files against a baseline
#[derive(Parser, Debug)]
#[command(name = "fileguard")]
#[command(about = "File integrity checker: record content digests and detect changes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (relative config paths resolve against it)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory to monitor
    #[arg(long)]
    pub target: Option<PathBuf>,

    /// Baseline record location
    #[arg(long)]
    pub baseline: Option<PathBuf>,

    /// Hash algorithm (sha256, sha512, blake3)
    #[arg(long)]
    pub algorithm: Option<HashAlgorithm>,

    /// Follow symbolic links while scanning
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Hash files in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the target directory if needed and record a baseline
    Init {
        /// Overwrite an existing baseline
        #[arg(long)]
        force: bool,
    },
    /// Compare the target directory against the baseline
    Check {
        /// Accept detected changes as the new baseline without prompting
        #[arg(long, conflicts_with = "no_update")]
        update: bool,
        /// Never update the baseline
        #[arg(long)]
        no_update: bool,
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Print the current digests without touching the baseline
    Scan {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
