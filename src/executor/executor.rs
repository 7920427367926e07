//! Single-dataset query executor
//!
//! Execution flow (strict order):
//! 1. Check select and clause fields against the header
//! 2. Resolve every clause condition
//! 3. Open the dataset, then the output; write the header unless appending
//! 4. For each data line: decode, type-check clauses, evaluate, combine
//! 5. Project matches and hand them to the batch writer
//! 6. Flush the remainder
//!
//! Steps 1 and 2 fail before the output file is touched.

use std::path::Path;

use crate::dataset::Dataset;
use crate::observability::{log_event_with_fields, Event, ObservationScope};
use crate::query::{Clause, Combinator, QueryError};

use super::errors::{ExecutorError, ExecutorResult};
use super::filters::RowFilter;
use super::options::ExecutionOptions;
use super::result::ExecutionResult;
use super::sink::BatchWriter;

/// Trims requested field names.
pub(super) fn normalize_fields(fields: &[String]) -> Vec<String> {
    fields.iter().map(|f| f.trim().to_string()).collect()
}

/// Logs a rejected scan with its error code.
pub(super) fn log_rejection(event: Event, err: &ExecutorError) {
    let reason = err.to_string();
    log_event_with_fields(event, &[("code", err.code()), ("reason", reason.as_str())]);
}

/// Filters one dataset into an output file
pub struct QueryExecutor<'a> {
    dataset: &'a Dataset,
    options: ExecutionOptions,
}

impl<'a> QueryExecutor<'a> {
    /// Creates an executor with default options
    pub fn new(dataset: &'a Dataset) -> Self {
        Self::with_options(dataset, ExecutionOptions::default())
    }

    pub fn with_options(dataset: &'a Dataset, options: ExecutionOptions) -> Self {
        Self { dataset, options }
    }

    pub fn options(&self) -> &ExecutionOptions {
        &self.options
    }

    /// Writes the `select` projection of every row matching `clauses` to
    /// `output`.
    ///
    /// Clause results are combined with ALL when `match_all`, else ANY, so
    /// an empty clause list matches every row or none. Without `append` the
    /// output is truncated and starts with a header line of `select`.
    ///
    /// # Errors
    ///
    /// - `DATATOOL_EMPTY_SELECTION` if `select` is empty
    /// - `DATATOOL_FIELD_HEADER` if a select or clause field is not in the header
    /// - `DATATOOL_UNKNOWN_CONDITION` if a clause names no registered condition
    /// - `DATATOOL_CONDITION_TYPE` if a row's type does not fit a clause
    /// - `DATATOOL_DECODE_FAILED` on a malformed data line
    pub fn query(
        &self,
        select: &[String],
        clauses: &[Clause],
        match_all: bool,
        output: impl AsRef<Path>,
        append: bool,
    ) -> ExecutorResult<ExecutionResult> {
        let output = output.as_ref();

        let (select, mut filter) = match self.prepare(select, clauses, match_all) {
            Ok(prepared) => prepared,
            Err(e) => {
                log_rejection(Event::QueryRejected, &e);
                return Err(e);
            }
        };

        let dataset_path = self.dataset.path().display().to_string();
        let output_path = output.display().to_string();
        let scope = ObservationScope::with_fields(
            "QUERY",
            &[
                ("dataset", dataset_path.as_str()),
                ("output", output_path.as_str()),
                ("combinator", filter.combinator().as_str()),
            ],
        );

        match self.scan(&select, &mut filter, output, append) {
            Ok(matched) => {
                let records = matched.to_string();
                scope.complete_with_fields(&[("records", records.as_str())]);
                Ok(ExecutionResult::new(output, matched))
            }
            Err(e) => {
                if e.as_query().is_some() {
                    log_rejection(Event::QueryRejected, &e);
                }
                scope.fail(&e.to_string());
                Err(e)
            }
        }
    }

    fn prepare(
        &self,
        select: &[String],
        clauses: &[Clause],
        match_all: bool,
    ) -> ExecutorResult<(Vec<String>, RowFilter)> {
        self.options.validate()?;

        let select = normalize_fields(select);
        if select.is_empty() {
            return Err(QueryError::empty_selection().into());
        }

        let header = self.dataset.header();
        let missing = header.missing(&select);
        if !missing.is_empty() {
            return Err(QueryError::field_header(missing, header.names()).into());
        }

        let clause_fields: Vec<String> = clauses.iter().map(|c| c.field.trim().to_string()).collect();
        let missing = header.missing(&clause_fields);
        if !missing.is_empty() {
            return Err(QueryError::field_header(missing, header.names()).into());
        }

        let filter = RowFilter::prepare(
            clauses,
            Combinator::from_match_all(match_all),
            self.options.validation,
        )?;
        Ok((select, filter))
    }

    fn scan(
        &self,
        select: &[String],
        filter: &mut RowFilter,
        output: &Path,
        append: bool,
    ) -> ExecutorResult<u64> {
        let mut reader = self.dataset.reader()?;
        let mut writer = BatchWriter::create(
            output,
            *self.dataset.dialect(),
            self.options.flush_threshold,
            append,
        )?;
        if !append {
            writer.write_header(select)?;
        }

        while let Some(row) = reader.next_row()? {
            if filter.matches(&row)? {
                writer.push_row(&row.project(select))?;
            }
        }

        writer.finish()
    }
}
