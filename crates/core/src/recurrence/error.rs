//! Recurrence error types.

use thiserror::Error;

/// Recurrence simulation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecurrenceError {
    /// Range longer than the configured simulation cap.
    #[error("Range spans {days} days, limit is {max}")]
    RangeTooLong {
        /// Calendar days in the requested range.
        days: u64,
        /// Configured maximum.
        max: u32,
    },
}
