//! Clause structures

use std::fmt;

use chrono::NaiveDateTime;

use crate::schema::{parse_date, parse_numeric};

/// Right-hand operand of a clause.
#[derive(Debug, Clone, PartialEq)]
pub enum ClauseValue {
    /// A literal the date parser accepted; the original text is kept
    Date { at: NaiveDateTime, raw: String },
    /// An explicit number
    Number(f64),
    /// Any other literal
    Text(String),
}

impl ClauseValue {
    /// Parses a literal, keeping it as text unless it reads as a date.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        match parse_date(&raw) {
            Some(at) => ClauseValue::Date { at, raw },
            None => ClauseValue::Text(raw),
        }
    }

    /// The literal as text.
    pub fn text(&self) -> String {
        match self {
            ClauseValue::Date { raw, .. } => raw.clone(),
            ClauseValue::Number(n) => n.to_string(),
            ClauseValue::Text(s) => s.clone(),
        }
    }

    /// The literal as a date, if it is one or reads as one.
    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            ClauseValue::Date { at, .. } => Some(*at),
            ClauseValue::Number(_) => None,
            ClauseValue::Text(s) => parse_date(s),
        }
    }

    /// The literal as a number, if it is one or reads as one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ClauseValue::Date { .. } => None,
            ClauseValue::Number(n) => Some(*n),
            ClauseValue::Text(s) => parse_numeric(s),
        }
    }

    /// Returns true for a date literal.
    pub fn is_date(&self) -> bool {
        matches!(self, ClauseValue::Date { .. })
    }
}

impl fmt::Display for ClauseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

impl From<&str> for ClauseValue {
    fn from(raw: &str) -> Self {
        ClauseValue::parse(raw)
    }
}

impl From<String> for ClauseValue {
    fn from(raw: String) -> Self {
        ClauseValue::parse(raw)
    }
}

impl From<f64> for ClauseValue {
    fn from(n: f64) -> Self {
        ClauseValue::Number(n)
    }
}

impl From<i64> for ClauseValue {
    fn from(n: i64) -> Self {
        ClauseValue::Number(n as f64)
    }
}

/// A single where-clause (field + condition + value)
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    /// Field name
    pub field: String,
    /// Condition name, canonical form is uppercase
    pub condition: String,
    /// Operand
    pub value: ClauseValue,
}

impl Clause {
    /// Creates a clause. The condition is normalized to uppercase and string
    /// values are parsed as dates where possible.
    pub fn new(
        field: impl Into<String>,
        condition: impl Into<String>,
        value: impl Into<ClauseValue>,
    ) -> Self {
        Self {
            field: field.into(),
            condition: condition.into(),
            value: value.into(),
        }
        .normalized()
    }

    /// Returns a copy with the condition uppercased and a text value
    /// re-parsed as a date when it reads as one.
    pub fn normalized(&self) -> Clause {
        let value = match &self.value {
            ClauseValue::Text(raw) => ClauseValue::parse(raw.clone()),
            other => other.clone(),
        };
        Clause {
            field: self.field.trim().to_string(),
            condition: self.condition.trim().to_uppercase(),
            value,
        }
    }

    pub fn contains(field: impl Into<String>, value: impl Into<ClauseValue>) -> Self {
        Self::new(field, "CONTAINS", value)
    }

    pub fn equals(field: impl Into<String>, value: impl Into<ClauseValue>) -> Self {
        Self::new(field, "EQUALS", value)
    }

    pub fn greater(field: impl Into<String>, value: impl Into<ClauseValue>) -> Self {
        Self::new(field, "GREATER", value)
    }

    pub fn less(field: impl Into<String>, value: impl Into<ClauseValue>) -> Self {
        Self::new(field, "LESS", value)
    }

    pub fn before(field: impl Into<String>, value: impl Into<ClauseValue>) -> Self {
        Self::new(field, "BEFORE", value)
    }

    pub fn after(field: impl Into<String>, value: impl Into<ClauseValue>) -> Self {
        Self::new(field, "AFTER", value)
    }

    pub fn not(field: impl Into<String>, value: impl Into<ClauseValue>) -> Self {
        Self::new(field, "NOT", value)
    }
}

/// How clause results of one row are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Logical AND; vacuously true for no clauses
    All,
    /// Logical OR; vacuously false for no clauses
    Any,
}

impl Combinator {
    /// ALL when `match_all`, ANY otherwise.
    pub fn from_match_all(match_all: bool) -> Self {
        if match_all {
            Combinator::All
        } else {
            Combinator::Any
        }
    }

    /// Combines clause results.
    pub fn combine<I>(&self, results: I) -> bool
    where
        I: IntoIterator<Item = bool>,
    {
        let mut results = results.into_iter();
        match self {
            Combinator::All => results.all(|r| r),
            Combinator::Any => results.any(|r| r),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Combinator::All => "all",
            Combinator::Any => "any",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clause_normalizes_condition() {
        let clause = Clause::new("email", "contains", "stark");
        assert_eq!(clause.condition, "CONTAINS");
        assert_eq!(clause.value, ClauseValue::Text("stark".into()));
    }

    #[test]
    fn test_clause_value_parsed_as_date() {
        let clause = Clause::before("dob", "31/05/1976");
        assert!(clause.value.is_date());
        assert_eq!(clause.value.text(), "31/05/1976");
    }

    #[test]
    fn test_unparseable_value_kept_verbatim() {
        let value = ClauseValue::parse("not a date");
        assert_eq!(value, ClauseValue::Text("not a date".into()));
    }

    #[test]
    fn test_number_value() {
        let clause = Clause::greater("age", 30i64);
        assert_eq!(clause.value.as_number(), Some(30.0));
        assert_eq!(clause.value.text(), "30");
    }

    #[test]
    fn test_empty_all_is_true_empty_any_is_false() {
        assert!(Combinator::All.combine(Vec::<bool>::new()));
        assert!(!Combinator::Any.combine(Vec::<bool>::new()));
    }

    #[test]
    fn test_combinators() {
        assert!(Combinator::All.combine([true, true]));
        assert!(!Combinator::All.combine([true, false]));
        assert!(Combinator::Any.combine([false, true]));
        assert!(!Combinator::Any.combine([false, false]));
        assert_eq!(Combinator::from_match_all(true), Combinator::All);
        assert_eq!(Combinator::from_match_all(false), Combinator::Any);
    }
}
