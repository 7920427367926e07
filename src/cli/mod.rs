//! CLI module for datatool
//!
//! Provides command-line interface for:
//! - query: filter one dataset
//! - compare: cross-reference two datasets
//! - stats: tally pattern matches in one field
//!
//! Requests arrive as one JSON object on stdin; responses leave as one
//! JSON object on stdout. Logs go to stderr.

mod args;
mod commands;
mod config;
mod errors;
mod io;
mod requests;

pub use args::{Cli, Command};
pub use commands::{
    compare, execute_compare, execute_query, execute_stats, query, run, run_command, stats,
};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_request, read_request, write_error, write_response};
pub use requests::{ClauseInput, CompareRequest, DatasetInput, QueryRequest, StatsRequest, ValueInput};
