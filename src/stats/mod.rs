//! Field statistics
//!
//! Tallies the values of one field that match a regular expression,
//! optionally narrowed to one capture group, over a full scan.

mod collector;

pub use collector::{FieldStatistics, Statistics, StatisticsEntry, OTHER_VALUE};
