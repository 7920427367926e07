//! Condition registry
//!
//! A fixed table of named predicates over `(observed, expected)`.
//! `observed` is the raw row value, `expected` the clause operand.
//! New conditions are added as new variants.

use std::fmt;

use crate::schema::{parse_date, parse_numeric, TypeTag};

use super::ast::ClauseValue;

/// Named binary predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Observed value contains the operand text
    Contains,
    /// Equal after coercion
    Equals,
    /// Observed value orders after the operand
    Greater,
    /// Observed value orders before the operand
    Less,
    /// Observed date is earlier than the operand date
    Before,
    /// Observed date is later than the operand date
    After,
    /// Placeholder: always matches. Bound semantics are not defined yet.
    Between,
    /// Not equal after coercion
    Not,
}

impl Condition {
    /// Every registered condition, in registry order
    pub const ALL: [Condition; 8] = [
        Condition::Contains,
        Condition::Equals,
        Condition::Greater,
        Condition::Less,
        Condition::Before,
        Condition::After,
        Condition::Between,
        Condition::Not,
    ];

    /// Returns the canonical (uppercase) name
    pub fn name(&self) -> &'static str {
        match self {
            Condition::Contains => "CONTAINS",
            Condition::Equals => "EQUALS",
            Condition::Greater => "GREATER",
            Condition::Less => "LESS",
            Condition::Before => "BEFORE",
            Condition::After => "AFTER",
            Condition::Between => "BETWEEN",
            Condition::Not => "NOT",
        }
    }

    /// Looks up a condition by canonical name.
    pub fn lookup(name: &str) -> Option<Condition> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }

    /// Canonical names of all registered conditions
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Condition::name).collect()
    }

    /// The field type this condition needs, if it is type-restricted
    pub fn required_type(&self) -> Option<TypeTag> {
        match self {
            Condition::Greater | Condition::Less => Some(TypeTag::Numeric),
            Condition::Before | Condition::After => Some(TypeTag::Date),
            _ => None,
        }
    }

    /// The conditions sharing this condition's type restriction
    pub fn group(&self) -> &'static [Condition] {
        match self {
            Condition::Greater | Condition::Less => &[Condition::Greater, Condition::Less],
            Condition::Before | Condition::After => &[Condition::Before, Condition::After],
            Condition::Contains => &[Condition::Contains],
            Condition::Equals => &[Condition::Equals],
            Condition::Between => &[Condition::Between],
            Condition::Not => &[Condition::Not],
        }
    }

    /// Evaluates the predicate.
    pub fn evaluate(&self, observed: &str, expected: &ClauseValue) -> bool {
        match self {
            Condition::Contains => contains(observed, expected),
            Condition::Equals => equals(observed, expected),
            Condition::Greater => greater(observed, expected),
            Condition::Less => less(observed, expected),
            Condition::Before => before(observed, expected),
            Condition::After => after(observed, expected),
            Condition::Between => true,
            Condition::Not => !equals(observed, expected),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn contains(observed: &str, expected: &ClauseValue) -> bool {
    observed.contains(expected.text().as_str())
}

fn equals(observed: &str, expected: &ClauseValue) -> bool {
    match expected {
        ClauseValue::Date { at, .. } => parse_date(observed) == Some(*at),
        ClauseValue::Number(n) => parse_numeric(observed) == Some(*n),
        ClauseValue::Text(text) => match (parse_numeric(observed), parse_numeric(text)) {
            (Some(a), Some(b)) => a == b,
            _ => observed == text,
        },
    }
}

/// Numeric ordering when both sides are numbers, date ordering when both
/// are dates. Anything else is unordered.
fn compare(observed: &str, expected: &ClauseValue) -> Option<std::cmp::Ordering> {
    if let (Some(a), Some(b)) = (parse_numeric(observed), expected.as_number()) {
        return a.partial_cmp(&b);
    }
    if let (Some(a), Some(b)) = (parse_date(observed), expected.as_date()) {
        return Some(a.cmp(&b));
    }
    None
}

fn greater(observed: &str, expected: &ClauseValue) -> bool {
    compare(observed, expected) == Some(std::cmp::Ordering::Greater)
}

fn less(observed: &str, expected: &ClauseValue) -> bool {
    compare(observed, expected) == Some(std::cmp::Ordering::Less)
}

fn before(observed: &str, expected: &ClauseValue) -> bool {
    match (parse_date(observed), expected.as_date()) {
        (Some(a), Some(b)) => a < b,
        _ => false,
    }
}

fn after(observed: &str, expected: &ClauseValue) -> bool {
    match (parse_date(observed), expected.as_date()) {
        (Some(a), Some(b)) => a > b,
        _ => false,
    }
}
