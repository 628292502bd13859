//! Error types for evaluation and statistics.

use thiserror::Error;

use crate::data::Metric;

/// Errors produced while evaluating readings or summarising a series.
///
/// Every error is local to a single call; callers re-invoke with corrected
/// input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A required reading was absent from the reading set.
    #[error("missing reading: {0}")]
    MissingReading(Metric),

    /// Statistics were requested over an empty series.
    #[error("no data: the series is empty")]
    NoData,

    /// Blood pressure text was not in `systolic/diastolic` form.
    #[error("invalid blood pressure '{0}': expected systolic/diastolic, e.g. 120/80")]
    InvalidBloodPressure(String),
}

/// Convenience alias for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
