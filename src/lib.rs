//! datatool - streaming filter and join engine for delimited files
//!
//! Subsystems:
//! - `codec`: delimited line tokenizing and encoding
//! - `dataset`: open files, parsed headers, rewindable row readers
//! - `schema`: per-row type inference
//! - `query`: clauses, the condition registry and clause validation
//! - `executor`: single-dataset queries and two-dataset compares
//! - `stats`: regex tallies over one field
//! - `observability`: structured JSON logging
//! - `cli`: JSON-over-stdin command-line surface

pub mod cli;
pub mod codec;
pub mod dataset;
pub mod executor;
pub mod observability;
pub mod query;
pub mod schema;
pub mod stats;
