//! CLI argument definitions using clap
//!
//! Commands:
//! - datatool query [--config <path>]
//! - datatool compare [--config <path>]
//! - datatool stats [--config <path>]
//!
//! Each command reads one JSON request from stdin.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// datatool - filter and cross-reference delimited files
#[derive(Parser, Debug)]
#[command(name = "datatool")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Filter one dataset into an output file
    Query {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Cross-reference a source dataset with a compare dataset
    Compare {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Tally pattern matches in one field
    Stats {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
