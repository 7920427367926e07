//! Two-dataset compare engine
//!
//! A nested loop: for every compare-side row the source reader is rewound
//! to its first data line and scanned in full, so the cost is
//! O(source rows x compare rows). There is no index.
//!
//! For each (source, compare) pair:
//! 1. Key test: every key field holds the same text on both sides. Pairs
//!    are kept when the outcome equals `require_match`.
//! 2. Clauses: each field is read from the source row when the source has
//!    it, else from the compare row; all clauses must hold.
//! 3. Projection: select fields resolve the same way, source first.
//!
//! Output is compare-row-major and uses the source dataset's dialect.

use std::path::Path;

use crate::codec::Row;
use crate::dataset::Dataset;
use crate::observability::{Event, ObservationScope};
use crate::query::{Clause, Combinator, QueryError};

use super::errors::ExecutorResult;
use super::executor::{log_rejection, normalize_fields};
use super::filters::RowFilter;
use super::options::ExecutionOptions;
use super::result::ExecutionResult;
use super::sink::BatchWriter;

/// Returns true if every key field holds the same value in both rows.
fn keys_match(source: &Row, compare: &Row, key_fields: &[String]) -> bool {
    key_fields
        .iter()
        .all(|field| source.get(field) == compare.get(field))
}

/// Merges a pair into one row; source values win on shared names.
///
/// `compare_only` flags, per compare column, the names the source header
/// lacks. Both rows hold their fields in header order.
fn join_rows(source: &Row, compare: &Row, compare_only: &[bool]) -> Row {
    let mut joined = Row::with_capacity(source.len() + compare.len());
    for (name, value) in source.iter() {
        joined.push(name, value);
    }
    for ((name, value), _) in compare.iter().zip(compare_only).filter(|(_, only)| **only) {
        joined.push(name, value);
    }
    joined
}

/// Cross-references a source dataset with a compare dataset
pub struct CompareEngine<'a> {
    source: &'a Dataset,
    compare: &'a Dataset,
    options: ExecutionOptions,
}

impl<'a> CompareEngine<'a> {
    pub fn new(source: &'a Dataset, compare: &'a Dataset) -> Self {
        Self::with_options(source, compare, ExecutionOptions::default())
    }

    pub fn with_options(
        source: &'a Dataset,
        compare: &'a Dataset,
        options: ExecutionOptions,
    ) -> Self {
        Self {
            source,
            compare,
            options,
        }
    }

    /// Writes the `select` projection of every qualifying pair to `output`.
    ///
    /// The output is always truncated. A header line is written only when
    /// `compare_header` is set in the options.
    ///
    /// # Errors
    ///
    /// - `DATATOOL_EMPTY_SELECTION` if `select` is empty
    /// - `DATATOOL_FIELD_HEADER` if a key field is missing from either
    ///   dataset, or a clause or select field is in neither
    /// - `DATATOOL_UNKNOWN_CONDITION` / `DATATOOL_CONDITION_TYPE` as for queries
    /// - `DATATOOL_DECODE_FAILED` on a malformed line in either dataset
    pub fn compare(
        &self,
        key_fields: &[String],
        require_match: bool,
        clauses: &[Clause],
        select: &[String],
        output: impl AsRef<Path>,
    ) -> ExecutorResult<ExecutionResult> {
        let output = output.as_ref();

        let (key_fields, select, mut filter) = match self.prepare(key_fields, clauses, select) {
            Ok(prepared) => prepared,
            Err(e) => {
                log_rejection(Event::CompareRejected, &e);
                return Err(e);
            }
        };

        let source_path = self.source.path().display().to_string();
        let compare_path = self.compare.path().display().to_string();
        let output_path = output.display().to_string();
        let scope = ObservationScope::with_fields(
            "COMPARE",
            &[
                ("source", source_path.as_str()),
                ("compare", compare_path.as_str()),
                ("output", output_path.as_str()),
                ("require_match", if require_match { "true" } else { "false" }),
            ],
        );

        match self.scan(&key_fields, require_match, &select, &mut filter, output) {
            Ok(matched) => {
                let records = matched.to_string();
                scope.complete_with_fields(&[("records", records.as_str())]);
                Ok(ExecutionResult::new(output, matched))
            }
            Err(e) => {
                if e.as_query().is_some() {
                    log_rejection(Event::CompareRejected, &e);
                }
                scope.fail(&e.to_string());
                Err(e)
            }
        }
    }

    /// Header names of both datasets, source first, without duplicates.
    fn known_fields(&self) -> Vec<&str> {
        let mut known: Vec<&str> = self.source.header().names().iter().map(String::as_str).collect();
        for name in self.compare.header().names() {
            if !self.source.header().contains(name) {
                known.push(name);
            }
        }
        known
    }

    fn prepare(
        &self,
        key_fields: &[String],
        clauses: &[Clause],
        select: &[String],
    ) -> ExecutorResult<(Vec<String>, Vec<String>, RowFilter)> {
        self.options.validate()?;

        let select = normalize_fields(select);
        if select.is_empty() {
            return Err(QueryError::empty_selection().into());
        }

        let key_fields = normalize_fields(key_fields);
        for dataset in [self.source, self.compare] {
            let missing = dataset.header().missing(&key_fields);
            if !missing.is_empty() {
                return Err(QueryError::field_header(missing, dataset.header().names()).into());
            }
        }

        let clause_fields: Vec<String> = clauses.iter().map(|c| c.field.trim().to_string()).collect();
        for fields in [&clause_fields, &select] {
            let missing: Vec<&str> = fields
                .iter()
                .filter(|f| !self.source.header().contains(f) && !self.compare.header().contains(f))
                .map(String::as_str)
                .collect();
            if !missing.is_empty() {
                return Err(QueryError::field_header(missing, self.known_fields()).into());
            }
        }

        let filter = RowFilter::prepare(clauses, Combinator::All, self.options.validation)?;
        Ok((key_fields, select, filter))
    }

    fn scan(
        &self,
        key_fields: &[String],
        require_match: bool,
        select: &[String],
        filter: &mut RowFilter,
        output: &Path,
    ) -> ExecutorResult<u64> {
        let compare_only: Vec<bool> = self
            .compare
            .header()
            .names()
            .iter()
            .map(|name| !self.source.header().contains(name))
            .collect();

        let mut source_reader = self.source.reader()?;
        let mut compare_reader = self.compare.reader()?;
        let mut writer = BatchWriter::create(
            output,
            *self.source.dialect(),
            self.options.flush_threshold,
            false,
        )?;
        if self.options.compare_header {
            writer.write_header(select)?;
        }

        while let Some(compare_row) = compare_reader.next_row()? {
            source_reader.rewind()?;
            while let Some(source_row) = source_reader.next_row()? {
                if keys_match(&source_row, &compare_row, key_fields) != require_match {
                    continue;
                }

                let joined = join_rows(&source_row, &compare_row, &compare_only);
                if filter.matches(&joined)? {
                    writer.push_row(&joined.project(select))?;
                }
            }
        }

        writer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Dialect;
    use crate::query::QueryErrorCode;
    use std::fs;
    use tempfile::TempDir;

    const SOURCE: &str = "email, location, colour\n\
        tony@stark.com, malibu, gold\n\
        hulk@stark.com, malibu, green\n\
        s.rodgers@avengers.com, new york, blue\n\
        thor@asgard.com, asgard, red\n";

    const COMPARE: &str = "email\t occupation\t location\t weapon\t iq level\n\
        tony@stark.com\t hero\t malibu\t suit\t high\n\
        hulk@stark.com\t hero\t malibu\t fists\t high\n\
        s.rodgers@avengers.com\t new york\t hero\t sheild\t medium\n\
        thor@asgard.com\t hero\t asgard\t hammer\t low\n\
        loki@asgard.com\t anti-hero\t asgard\t mind powers\t high";

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn datasets(tmp: &TempDir) -> (Dataset, Dataset) {
        let source = tmp.path().join("source.csv");
        let compare = tmp.path().join("compare.tsv");
        fs::write(&source, SOURCE).unwrap();
        fs::write(&compare, COMPARE).unwrap();
        (
            Dataset::open_csv(&source).unwrap(),
            Dataset::open(&compare, Dialect::tsv()).unwrap(),
        )
    }

    #[test]
    fn test_keys_match() {
        let a: Row = vec![("email".to_string(), "x".to_string())].into_iter().collect();
        let b: Row = vec![("email".to_string(), "x".to_string())].into_iter().collect();
        let c: Row = vec![("email".to_string(), "y".to_string())].into_iter().collect();
        let keys = fields(&["email"]);
        assert!(keys_match(&a, &b, &keys));
        assert!(!keys_match(&a, &c, &keys));
        assert!(keys_match(&a, &c, &[]));
    }

    #[test]
    fn test_join_prefers_source() {
        let source: Row = vec![("location".to_string(), "malibu".to_string())].into_iter().collect();
        let compare: Row = vec![
            ("location".to_string(), "hero".to_string()),
            ("weapon".to_string(), "suit".to_string()),
        ]
        .into_iter()
        .collect();

        let joined = join_rows(&source, &compare, &[false, true]);
        assert_eq!(joined.len(), 2);
        assert_eq!(joined.get("location"), Some("malibu"));
        assert_eq!(joined.get("weapon"), Some("suit"));
    }

    #[test]
    fn test_compare_matching_rows() {
        let tmp = TempDir::new().unwrap();
        let (source, compare) = datasets(&tmp);
        let output = tmp.path().join("out.csv");

        let result = CompareEngine::new(&source, &compare)
            .compare(
                &fields(&["email"]),
                true,
                &[Clause::contains("location", "malibu")],
                &fields(&["email", "weapon"]),
                &output,
            )
            .unwrap();

        assert_eq!(result.matched_records, 2);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "tony@stark.com,suit\nhulk@stark.com,fists\n"
        );
    }

    #[test]
    fn test_compare_non_matching_rows() {
        let tmp = TempDir::new().unwrap();
        let (source, compare) = datasets(&tmp);

        // loki has no source counterpart, so he pairs with all 4 source rows
        let result = CompareEngine::new(&source, &compare)
            .compare(
                &fields(&["email"]),
                false,
                &[Clause::equals("weapon", "mind powers")],
                &fields(&["email"]),
                tmp.path().join("out.csv"),
            )
            .unwrap();
        assert_eq!(result.matched_records, 4);
    }

    #[test]
    fn test_compare_header_option() {
        let tmp = TempDir::new().unwrap();
        let (source, compare) = datasets(&tmp);
        let output = tmp.path().join("out.csv");

        CompareEngine::with_options(
            &source,
            &compare,
            ExecutionOptions::default().with_compare_header(true),
        )
        .compare(
            &fields(&["email"]),
            true,
            &[Clause::equals("colour", "gold")],
            &fields(&["email", "iq level"]),
            &output,
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "email,iq level\ntony@stark.com,high\n"
        );
    }

    #[test]
    fn test_key_field_missing_from_compare() {
        let tmp = TempDir::new().unwrap();
        let (source, compare) = datasets(&tmp);

        let err = CompareEngine::new(&source, &compare)
            .compare(
                &fields(&["colour"]),
                true,
                &[],
                &fields(&["email"]),
                tmp.path().join("out.csv"),
            )
            .unwrap_err();
        let query_err = err.as_query().unwrap();
        assert_eq!(query_err.code(), QueryErrorCode::FieldHeader);
        assert_eq!(query_err.fields(), &["colour".to_string()]);
    }

    #[test]
    fn test_select_field_in_neither() {
        let tmp = TempDir::new().unwrap();
        let (source, compare) = datasets(&tmp);

        let err = CompareEngine::new(&source, &compare)
            .compare(
                &fields(&["email"]),
                true,
                &[],
                &fields(&["email", "shield"]),
                tmp.path().join("out.csv"),
            )
            .unwrap_err();
        assert_eq!(err.code(), "DATATOOL_FIELD_HEADER");
    }
}
