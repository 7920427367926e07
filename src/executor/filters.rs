//! Clause filtering for scans
//!
//! Clauses are resolved against the condition registry once, before the
//! scan. Type checks run against each row's inferred types, or only the
//! first row's under `ValidationMode::FirstRow`.

use crate::codec::Row;
use crate::query::{
    Clause, ClauseValue, Combinator, Condition, QueryResult, QueryValidator, ValidationMode,
};
use crate::schema::TypeInferencer;

/// A clause with its condition resolved
#[derive(Debug, Clone)]
pub struct PreparedClause {
    field: String,
    condition: Condition,
    value: ClauseValue,
}

impl PreparedClause {
    /// Normalizes a clause and resolves its condition.
    pub fn prepare(clause: &Clause) -> QueryResult<Self> {
        let clause = clause.normalized();
        let condition = QueryValidator::resolve(&clause)?;
        Ok(Self {
            field: clause.field,
            condition,
            value: clause.value,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn value(&self) -> &ClauseValue {
        &self.value
    }

    /// Evaluates the clause on a row. A field the row lacks reads as empty.
    pub fn matches(&self, row: &Row) -> bool {
        let observed = row.get(&self.field).unwrap_or("");
        self.condition.evaluate(observed, &self.value)
    }
}

/// Evaluates a list of clauses against rows
#[derive(Debug, Clone)]
pub struct RowFilter {
    clauses: Vec<PreparedClause>,
    combinator: Combinator,
    mode: ValidationMode,
    validated: bool,
}

impl RowFilter {
    /// Prepares every clause, failing on the first unknown condition.
    pub fn prepare(
        clauses: &[Clause],
        combinator: Combinator,
        mode: ValidationMode,
    ) -> QueryResult<Self> {
        let clauses = clauses
            .iter()
            .map(PreparedClause::prepare)
            .collect::<QueryResult<Vec<_>>>()?;
        Ok(Self {
            clauses,
            combinator,
            mode,
            validated: false,
        })
    }

    pub fn clauses(&self) -> &[PreparedClause] {
        &self.clauses
    }

    pub fn combinator(&self) -> Combinator {
        self.combinator
    }

    /// Field names referenced by the clauses, in clause order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.clauses.iter().map(PreparedClause::field)
    }

    /// Checks clause types against the row, then combines clause results.
    ///
    /// # Errors
    ///
    /// `DATATOOL_CONDITION_TYPE` for the first clause whose condition does
    /// not fit the inferred type of its field in this row.
    pub fn matches(&mut self, row: &Row) -> QueryResult<bool> {
        self.validate(row)?;
        Ok(self
            .combinator
            .combine(self.clauses.iter().map(|clause| clause.matches(row))))
    }

    fn validate(&mut self, row: &Row) -> QueryResult<()> {
        if self.validated && self.mode == ValidationMode::FirstRow {
            return Ok(());
        }

        let types = TypeInferencer::infer_fields(row, self.fields());
        for clause in &self.clauses {
            QueryValidator::check_type(
                &clause.field,
                clause.condition,
                types.get(&clause.field).copied(),
            )?;
        }
        self.validated = true;
        Ok(())
    }
}
