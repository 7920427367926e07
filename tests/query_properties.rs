//! Query Executor Property Tests
//!
//! Tests for properties:
//! - Empty where-list: ALL matches every row, ANY matches none
//! - Identical queries produce byte-identical output
//! - Every matched line is written exactly once across flush boundaries
//! - Field, condition and type errors abort before output is written
//! - A malformed line keeps earlier flushed batches on disk

use datatool::dataset::Dataset;
use datatool::executor::{ExecutionOptions, QueryExecutor};
use datatool::query::{Clause, QueryErrorCode};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

const HEROES: &str = "email, location, colour\n\
    tony@stark.com, malibu, gold\n\
    hulk@stark.com, malibu, green\n\
    s.rodgers@avengers.com, new york, blue\n\
    thor@asgard.com, asgard, red\n";

fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

fn write_dataset(dir: &Path, name: &str, content: &str) -> Dataset {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    Dataset::open_csv(&path).unwrap()
}

fn fields(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn numbered_rows(count: usize) -> String {
    let mut content = String::from("id,name\n");
    for i in 0..count {
        content.push_str(&format!("{},row{}\n", i, i));
    }
    content
}

// =============================================================================
// Combinators
// =============================================================================

#[test]
fn test_empty_where_match_all_matches_every_row() {
    let temp_dir = create_temp_dir();
    let dataset = write_dataset(temp_dir.path(), "heroes.csv", HEROES);

    for select in [fields(&["email"]), fields(&["colour", "location"]), fields(&["email", "location", "colour"])] {
        let result = QueryExecutor::new(&dataset)
            .query(&select, &[], true, temp_dir.path().join("out.csv"), false)
            .unwrap();
        assert_eq!(result.matched_records, 4);
    }
}

#[test]
fn test_empty_where_match_any_matches_nothing() {
    let temp_dir = create_temp_dir();
    let dataset = write_dataset(temp_dir.path(), "heroes.csv", HEROES);
    let output = temp_dir.path().join("out.csv");

    let result = QueryExecutor::new(&dataset)
        .query(&fields(&["email", "colour"]), &[], false, &output, false)
        .unwrap();

    assert_eq!(result.matched_records, 0);
    assert_eq!(fs::read_to_string(&output).unwrap(), "email,colour\n");
}

#[test]
fn test_contains_scenario() {
    let temp_dir = create_temp_dir();
    let dataset = write_dataset(temp_dir.path(), "heroes.csv", HEROES);

    let result = QueryExecutor::new(&dataset)
        .query(
            &fields(&["email", "colour"]),
            &[Clause::new("email", "CONTAINS", "stark")],
            true,
            temp_dir.path().join("out.csv"),
            false,
        )
        .unwrap();
    assert_eq!(result.matched_records, 2);
}

#[test]
fn test_and_scenario() {
    let temp_dir = create_temp_dir();
    let dataset = write_dataset(temp_dir.path(), "heroes.csv", HEROES);

    let result = QueryExecutor::new(&dataset)
        .query(
            &fields(&["email", "colour"]),
            &[
                Clause::new("email", "CONTAINS", "stark"),
                Clause::new("colour", "EQUALS", "gold"),
            ],
            true,
            temp_dir.path().join("out.csv"),
            false,
        )
        .unwrap();
    assert_eq!(result.matched_records, 1);
}

#[test]
fn test_date_and_numeric_conditions() {
    let temp_dir = create_temp_dir();
    let dataset = write_dataset(
        temp_dir.path(),
        "people.csv",
        "name,born,age\n\
         ann,1980-04-01,44\n\
         bob,1999-12-31,25\n\
         cat,2004-07-15,20\n",
    );
    let executor = QueryExecutor::new(&dataset);
    let output = temp_dir.path().join("out.csv");

    let before = executor
        .query(&fields(&["name"]), &[Clause::before("born", "2000-01-01")], true, &output, false)
        .unwrap();
    assert_eq!(before.matched_records, 2);

    let older = executor
        .query(&fields(&["name"]), &[Clause::greater("age", 21.0)], true, &output, false)
        .unwrap();
    assert_eq!(older.matched_records, 2);
    assert_eq!(fs::read_to_string(&output).unwrap(), "name\nann\nbob\n");
}

// =============================================================================
// Idempotence
// =============================================================================

#[test]
fn test_identical_queries_produce_identical_output() {
    let temp_dir = create_temp_dir();
    let dataset = write_dataset(temp_dir.path(), "heroes.csv", HEROES);
    let first = temp_dir.path().join("first.csv");
    let second = temp_dir.path().join("second.csv");
    let select = fields(&["colour", "email"]);
    let clauses = [Clause::new("location", "not", "asgard")];

    QueryExecutor::new(&dataset).query(&select, &clauses, true, &first, false).unwrap();
    QueryExecutor::new(&dataset).query(&select, &clauses, true, &second, false).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

// =============================================================================
// Buffering
// =============================================================================

#[test]
fn test_flush_boundary_writes_every_line_once() {
    let temp_dir = create_temp_dir();
    let dataset = write_dataset(temp_dir.path(), "rows.csv", &numbered_rows(101));
    let output = temp_dir.path().join("out.csv");

    let result = QueryExecutor::new(&dataset)
        .query(&fields(&["name"]), &[], true, &output, false)
        .unwrap();
    assert_eq!(result.matched_records, 101);

    let content = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 102);
    assert_eq!(lines[0], "name");
    for (i, line) in lines[1..].iter().enumerate() {
        assert_eq!(*line, format!("row{}", i));
    }
}

#[test]
fn test_exact_multiple_of_threshold() {
    let temp_dir = create_temp_dir();
    let dataset = write_dataset(temp_dir.path(), "rows.csv", &numbered_rows(30));
    let output = temp_dir.path().join("out.csv");

    let result = QueryExecutor::with_options(&dataset, ExecutionOptions::default().with_flush_threshold(10))
        .query(&fields(&["id"]), &[], true, &output, true)
        .unwrap();

    assert_eq!(result.matched_records, 30);
    assert_eq!(fs::read_to_string(&output).unwrap().lines().count(), 30);
}

#[test]
fn test_blank_lines_are_skipped() {
    let temp_dir = create_temp_dir();
    let dataset = write_dataset(temp_dir.path(), "gaps.csv", "a,b\n1,2\n\n3,4\n\n");

    let result = QueryExecutor::new(&dataset)
        .query(&fields(&["a"]), &[], true, temp_dir.path().join("out.csv"), false)
        .unwrap();
    assert_eq!(result.matched_records, 2);
}

#[test]
fn test_lines_flushed_before_malformed_line_stay_on_disk() {
    let temp_dir = create_temp_dir();
    let mut content = numbered_rows(150);
    content.push_str("bad\n");
    let dataset = write_dataset(temp_dir.path(), "rows.csv", &content);
    let output = temp_dir.path().join("out.csv");

    let err = QueryExecutor::new(&dataset)
        .query(&fields(&["name"]), &[], true, &output, false)
        .unwrap_err();
    assert_eq!(err.code(), "DATATOOL_DECODE_FAILED");
    assert_eq!(err.as_dataset().and_then(|e| e.line()), Some(152));

    // Header plus the first full batch; the 50 pending lines are lost
    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 101);
    assert_eq!(lines[0], "name");
    assert_eq!(lines[100], "row99");
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_unknown_field_lists_known_headers() {
    let temp_dir = create_temp_dir();
    let dataset = write_dataset(temp_dir.path(), "heroes.csv", HEROES);
    let output = temp_dir.path().join("out.csv");

    let err = QueryExecutor::new(&dataset)
        .query(&fields(&["email", "weapon"]), &[], true, &output, false)
        .unwrap_err();

    let query_err = err.as_query().expect("query error");
    assert_eq!(query_err.code(), QueryErrorCode::FieldHeader);
    assert!(query_err.message().contains("weapon"));
    assert!(query_err.message().contains("email, location, colour"));
    assert!(!output.exists());
}

#[test]
fn test_unknown_condition_rejected_on_empty_dataset() {
    let temp_dir = create_temp_dir();
    let dataset = write_dataset(temp_dir.path(), "empty.csv", "email,colour\n");

    let err = QueryExecutor::new(&dataset)
        .query(
            &fields(&["email"]),
            &[Clause::new("email", "LIKE", "stark")],
            true,
            temp_dir.path().join("out.csv"),
            false,
        )
        .unwrap_err();

    let query_err = err.as_query().expect("query error");
    assert_eq!(query_err.code(), QueryErrorCode::UnknownCondition);
    assert!(query_err.message().contains("CONTAINS"));
}

#[test]
fn test_type_mismatch_is_condition_type_error() {
    let temp_dir = create_temp_dir();
    let dataset = write_dataset(temp_dir.path(), "heroes.csv", HEROES);

    for clause in [Clause::less("colour", 5.0), Clause::after("location", "2020-01-01")] {
        let err = QueryExecutor::new(&dataset)
            .query(&fields(&["email"]), &[clause], true, temp_dir.path().join("out.csv"), false)
            .unwrap_err();
        assert_eq!(err.as_query().unwrap().code(), QueryErrorCode::ConditionType);
    }
}
