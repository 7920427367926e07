//! CLI command implementations
//!
//! Each command: load configuration, read one request from stdin, run it,
//! write one response to stdout. Commands are thin; all work happens in
//! the library.

use std::path::Path;

use serde::Serialize;

use crate::executor::{CompareEngine, ExecutionResult, ExecutorResult, QueryExecutor};
use crate::stats::{FieldStatistics, Statistics};

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};
use super::requests::{CompareRequest, QueryRequest, StatsRequest};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Query { config } => query(config.as_deref()),
        Command::Compare { config } => compare(config.as_deref()),
        Command::Stats { config } => stats(config.as_deref()),
    }
}

/// Filter one dataset
pub fn query(config_path: Option<&Path>) -> CliResult<()> {
    let config = Config::resolve(config_path)?;
    let request: QueryRequest = read_request()?;
    respond(execute_query(&config, &request))
}

/// Cross-reference two datasets
pub fn compare(config_path: Option<&Path>) -> CliResult<()> {
    let config = Config::resolve(config_path)?;
    let request: CompareRequest = read_request()?;
    respond(execute_compare(&config, &request))
}

/// Tally pattern matches in one field
pub fn stats(config_path: Option<&Path>) -> CliResult<()> {
    let config = Config::resolve(config_path)?;
    let request: StatsRequest = read_request()?;
    respond(execute_stats(&config, &request))
}

/// Runs a query request.
pub fn execute_query(config: &Config, request: &QueryRequest) -> ExecutorResult<ExecutionResult> {
    let dataset = request.dataset.open()?;
    QueryExecutor::with_options(&dataset, config.execution_options()).query(
        &request.select,
        &request.clauses(),
        request.match_all,
        &request.output,
        request.append,
    )
}

/// Runs a compare request.
pub fn execute_compare(
    config: &Config,
    request: &CompareRequest,
) -> ExecutorResult<ExecutionResult> {
    let source = request.source.open()?;
    let compare = request.compare.open()?;
    CompareEngine::with_options(&source, &compare, config.execution_options()).compare(
        &request.key_fields,
        request.require_match,
        &request.clauses(),
        &request.select,
        &request.output,
    )
}

/// Runs a statistics request.
pub fn execute_stats(_config: &Config, request: &StatsRequest) -> ExecutorResult<Statistics> {
    let dataset = request.dataset.open()?;
    FieldStatistics::new(&dataset).collect(
        &request.field,
        &request.pattern,
        request.capture_group,
        request.top,
    )
}

/// Writes the ok or error response. An error response still fails the
/// command so that the process exits non-zero.
fn respond<T: Serialize>(result: ExecutorResult<T>) -> CliResult<()> {
    match result {
        Ok(data) => write_response(serde_json::to_value(data)?),
        Err(e) => {
            write_error(e.code(), &e.to_string())?;
            Err(CliError::command_failed(e.to_string()))
        }
    }
}
