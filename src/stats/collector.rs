//! Statistics collector

use std::collections::BTreeMap;

use regex::Regex;
use serde::Serialize;

use crate::dataset::Dataset;
use crate::executor::{ExecutorError, ExecutorResult};
use crate::observability::{log_event_with_fields, Event, ObservationScope};
use crate::query::QueryError;

/// Value of the entry that folds everything past `top`
pub const OTHER_VALUE: &str = "(other)";

/// One tallied value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsEntry {
    pub value: String,
    pub count: u64,
    /// `count` as a share of all scanned rows
    pub percent: f64,
}

/// Tally of one field over a dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub field: String,
    pub rows_scanned: u64,
    /// Sorted by count descending, then value ascending
    pub entries: Vec<StatisticsEntry>,
}

impl Statistics {
    /// Returns the count tallied for `value`.
    pub fn count_of(&self, value: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.value == value)
            .map(|entry| entry.count)
    }
}

fn percent(count: u64, rows: u64) -> f64 {
    if rows == 0 {
        0.0
    } else {
        count as f64 * 100.0 / rows as f64
    }
}

/// Builds sorted entries from a tally, folding the tail past `top`.
fn rank(tally: BTreeMap<String, u64>, rows: u64, top: Option<usize>) -> Vec<StatisticsEntry> {
    let mut ranked: Vec<(String, u64)> = tally.into_iter().collect();
    // BTreeMap order is value ascending; the stable sort keeps it for ties
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    if let Some(top) = top {
        if ranked.len() > top {
            let folded: u64 = ranked.split_off(top).iter().map(|(_, count)| count).sum();
            ranked.push((OTHER_VALUE.to_string(), folded));
        }
    }

    ranked
        .into_iter()
        .map(|(value, count)| StatisticsEntry {
            value,
            count,
            percent: percent(count, rows),
        })
        .collect()
}

/// Computes statistics over one dataset
pub struct FieldStatistics<'a> {
    dataset: &'a Dataset,
}

impl<'a> FieldStatistics<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    /// Tallies the part of `field` that `pattern` matches in each row.
    ///
    /// With `capture_group`, the tallied text is that group. Groups use
    /// regex numbering: 0 is the whole match and 1 the first parenthesized
    /// group, so `Some(1)` selects what a zero-based index over the groups
    /// alone would call group 0. A row where the group did not participate
    /// is not tallied. Rows without a match are scanned but not tallied.
    ///
    /// # Errors
    ///
    /// - `DATATOOL_FIELD_HEADER` if `field` is not in the header
    /// - `DATATOOL_PATTERN_INVALID` if `pattern` does not compile
    /// - `DATATOOL_OPTIONS_INVALID` if `capture_group` exceeds the pattern's groups
    /// - `DATATOOL_DECODE_FAILED` on a malformed data line
    pub fn collect(
        &self,
        field: &str,
        pattern: &str,
        capture_group: Option<usize>,
        top: Option<usize>,
    ) -> ExecutorResult<Statistics> {
        let field = field.trim();
        let regex = match self.prepare(field, pattern, capture_group) {
            Ok(regex) => regex,
            Err(e) => {
                let reason = e.to_string();
                log_event_with_fields(
                    Event::StatisticsRejected,
                    &[("code", e.code()), ("reason", reason.as_str())],
                );
                return Err(e);
            }
        };

        let dataset_path = self.dataset.path().display().to_string();
        let scope = ObservationScope::with_fields(
            "STATISTICS",
            &[("dataset", dataset_path.as_str()), ("field", field)],
        );

        match self.scan(field, &regex, capture_group) {
            Ok((rows_scanned, tally)) => {
                let rows = rows_scanned.to_string();
                let distinct = tally.len().to_string();
                scope.complete_with_fields(&[("rows", rows.as_str()), ("distinct", distinct.as_str())]);
                Ok(Statistics {
                    field: field.to_string(),
                    rows_scanned,
                    entries: rank(tally, rows_scanned, top),
                })
            }
            Err(e) => {
                scope.fail(&e.to_string());
                Err(e)
            }
        }
    }

    fn prepare(
        &self,
        field: &str,
        pattern: &str,
        capture_group: Option<usize>,
    ) -> ExecutorResult<Regex> {
        let header = self.dataset.header();
        if !header.contains(field) {
            return Err(QueryError::field_header([field], header.names()).into());
        }

        let regex = Regex::new(pattern)?;
        if let Some(group) = capture_group {
            let groups = regex.captures_len() - 1;
            if group > groups {
                return Err(ExecutorError::Options(format!(
                    "capture_group {} exceeds the {} group(s) of the pattern",
                    group, groups
                )));
            }
        }
        Ok(regex)
    }

    fn scan(
        &self,
        field: &str,
        regex: &Regex,
        capture_group: Option<usize>,
    ) -> ExecutorResult<(u64, BTreeMap<String, u64>)> {
        let mut tally: BTreeMap<String, u64> = BTreeMap::new();
        let mut rows = 0u64;

        let mut reader = self.dataset.reader()?;
        while let Some(row) = reader.next_row()? {
            rows += 1;
            let value = row.get(field).unwrap_or("");
            let Some(captures) = regex.captures(value) else {
                continue;
            };
            // A group that took no part in the match tallies nothing
            if let Some(hit) = captures.get(capture_group.unwrap_or(0)) {
                *tally.entry(hit.as_str().to_string()).or_insert(0) += 1;
            }
        }

        Ok((rows, tally))
    }
}
