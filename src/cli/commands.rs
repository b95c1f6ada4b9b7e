use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "peps")]
#[command(
    author,
    version,
    about = "Lint Python Enhancement Proposals and build the PEP index"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (searches upward for peps.toml by default)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file, rotated daily
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check PEP sources for malformed headers and direct links
    #[command(visible_alias = "lint")]
    Check {
        /// Show the offending line under each diagnostic
        #[arg(short, long)]
        detailed: bool,

        /// Files to check (defaults to every pep-NNNN.rst in the source directory)
        files: Vec<PathBuf>,
    },

    /// Generate PEP 0, the topic indices and peps.json
    Index {
        /// Directory holding pep-NNNN.rst sources (overrides config)
        #[arg(long)]
        source: Option<PathBuf>,

        /// Directory to write generated files to (overrides config)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Arguments of the standalone `check-peps` linter.
#[derive(Parser, Debug)]
#[command(
    name = "check-peps",
    about = "Check PEP sources for malformed headers and direct links",
    disable_help_flag = true
)]
pub struct CheckPepsCli {
    /// Print help
    #[arg(short = 'h', long = "help", short_alias = '?', action = ArgAction::Help)]
    help: Option<bool>,

    /// Show the offending line under each diagnostic
    #[arg(short, long)]
    pub detailed: bool,

    /// Files to check (defaults to every pep-NNNN.rst in the source directory)
    pub files: Vec<PathBuf>,
}
