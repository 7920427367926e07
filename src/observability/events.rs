//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events
///
/// Scans are bracketed by `ObservationScope`s (`QUERY_BEGIN`,
/// `COMPARE_COMPLETE`, ...); these are the one-shot events around them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration file loaded
    ConfigLoaded,
    /// Dataset opened and header parsed
    DatasetOpened,
    /// Query rejected by a precondition or a clause check
    QueryRejected,
    /// Compare rejected by a precondition or a clause check
    CompareRejected,
    /// Statistics rejected by a precondition
    StatisticsRejected,
    /// Buffered lines appended to the output file
    BatchFlushed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DatasetOpened => "DATASET_OPENED",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::CompareRejected => "COMPARE_REJECTED",
            Event::StatisticsRejected => "STATISTICS_REJECTED",
            Event::BatchFlushed => "BATCH_FLUSHED",
        }
    }

    /// Returns true if this event reports a failed operation
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::QueryRejected | Event::CompareRejected | Event::StatisticsRejected
        )
    }

    /// Returns true if this event is high-volume detail
    pub fn is_detail(&self) -> bool {
        matches!(self, Event::BatchFlushed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
