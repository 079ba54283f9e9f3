//! Stats error types.

use thiserror::Error;

use crate::calendar::CalendarError;
use crate::recurrence::RecurrenceError;

/// Errors that can stop an aggregation.
///
/// Dirty records never end up here; they are skipped and logged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    /// Fixed cost simulation refused the range.
    #[error(transparent)]
    Recurrence(#[from] RecurrenceError),

    /// A derived range could not be built.
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// A derived figure does not fit in a `Decimal`.
    #[error("Aggregated amount overflowed")]
    Overflow,
}
