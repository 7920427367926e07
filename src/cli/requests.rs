//! Request shapes read from stdin

use std::path::PathBuf;

use serde::Deserialize;

use crate::codec::Dialect;
use crate::dataset::{Dataset, DatasetError, DatasetResult};
use crate::query::{Clause, ClauseValue};

/// Dataset location and dialect
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetInput {
    pub path: PathBuf,
    /// Single ASCII character, default `,`
    #[serde(default)]
    pub delimiter: Option<char>,
    /// Single ASCII character, default `"`
    #[serde(default)]
    pub quote: Option<char>,
}

fn ascii(c: char, what: &str) -> DatasetResult<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(DatasetError::config_invalid(format!(
            "{} must be a single ASCII character, got '{}'",
            what, c
        )))
    }
}

impl DatasetInput {
    pub fn dialect(&self) -> DatasetResult<Dialect> {
        let defaults = Dialect::default();
        let delimiter = match self.delimiter {
            Some(c) => ascii(c, "delimiter")?,
            None => defaults.delimiter,
        };
        let quote = match self.quote {
            Some(c) => ascii(c, "quote")?,
            None => defaults.quote,
        };
        Dialect::new(delimiter, quote).map_err(|e| DatasetError::config_invalid(e.to_string()))
    }

    pub fn open(&self) -> DatasetResult<Dataset> {
        Dataset::open(&self.path, self.dialect()?)
    }
}

/// Clause operand: JSON string or number
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ValueInput {
    Number(f64),
    Text(String),
}

/// One where-clause
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClauseInput {
    pub field: String,
    pub condition: String,
    pub value: ValueInput,
}

impl From<&ClauseInput> for Clause {
    fn from(input: &ClauseInput) -> Self {
        let value = match &input.value {
            ValueInput::Number(n) => ClauseValue::Number(*n),
            ValueInput::Text(s) => ClauseValue::parse(s.clone()),
        };
        Clause::new(input.field.clone(), input.condition.clone(), value)
    }
}

fn clauses(inputs: &[ClauseInput]) -> Vec<Clause> {
    inputs.iter().map(Clause::from).collect()
}

fn default_true() -> bool {
    true
}

/// `datatool query` request
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryRequest {
    pub dataset: DatasetInput,
    pub select: Vec<String>,
    #[serde(rename = "where", default)]
    pub clauses: Vec<ClauseInput>,
    #[serde(default = "default_true")]
    pub match_all: bool,
    pub output: PathBuf,
    #[serde(default)]
    pub append: bool,
}

impl QueryRequest {
    pub fn clauses(&self) -> Vec<Clause> {
        clauses(&self.clauses)
    }
}

/// `datatool compare` request
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompareRequest {
    pub source: DatasetInput,
    pub compare: DatasetInput,
    pub key_fields: Vec<String>,
    #[serde(default = "default_true")]
    pub require_match: bool,
    #[serde(rename = "where", default)]
    pub clauses: Vec<ClauseInput>,
    pub select: Vec<String>,
    pub output: PathBuf,
}

impl CompareRequest {
    pub fn clauses(&self) -> Vec<Clause> {
        clauses(&self.clauses)
    }
}

/// `datatool stats` request
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatsRequest {
    pub dataset: DatasetInput,
    pub field: String,
    pub pattern: String,
    #[serde(default)]
    pub capture_group: Option<usize>,
    #[serde(default)]
    pub top: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::io::parse_request;

    #[test]
    fn test_query_request_defaults() {
        let request: QueryRequest = parse_request(
            r#"{"dataset": {"path": "heroes.csv"}, "select": ["email"], "output": "out.csv"}"#,
        )
        .unwrap();
        assert!(request.match_all);
        assert!(!request.append);
        assert!(request.clauses().is_empty());
        assert_eq!(request.dataset.dialect().unwrap(), Dialect::default());
    }

    #[test]
    fn test_clause_values() {
        let request: QueryRequest = parse_request(
            r#"{"dataset": {"path": "p.csv", "delimiter": "\t"}, "select": ["age"],
                "where": [{"field": "age", "condition": "greater", "value": 30},
                          {"field": "dob", "condition": "before", "value": "2001-02-03"}],
                "output": "out.csv"}"#,
        )
        .unwrap();
        let clauses = request.clauses();
        assert_eq!(clauses[0].condition, "GREATER");
        assert_eq!(clauses[0].value, ClauseValue::Number(30.0));
        assert!(clauses[1].value.is_date());
        assert_eq!(request.dataset.dialect().unwrap(), Dialect::tsv());
    }

    #[test]
    fn test_same_delimiter_and_quote_rejected() {
        let input = DatasetInput {
            path: PathBuf::from("p.csv"),
            delimiter: Some('"'),
            quote: None,
        };
        assert!(input.dialect().is_err());
    }

    #[test]
    fn test_compare_request() {
        let request: CompareRequest = parse_request(
            r#"{"source": {"path": "a.csv"}, "compare": {"path": "b.tsv", "delimiter": "\t"},
                "key_fields": ["email"], "require_match": true,
                "where": [{"field": "location", "condition": "CONTAINS", "value": "malibu"}],
                "select": ["email", "weapon"], "output": "out.csv"}"#,
        )
        .unwrap();
        assert_eq!(request.key_fields, vec!["email".to_string()]);
        assert_eq!(request.clauses().len(), 1);
    }

    #[test]
    fn test_unknown_request_key_rejected() {
        let result: Result<StatsRequest, _> = parse_request(
            r#"{"dataset": {"path": "a.csv"}, "field": "email", "pattern": ".*", "regex": ".*"}"#,
        );
        assert!(result.is_err());
    }
}
