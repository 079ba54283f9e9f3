//! Calendar error types.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised while building or widening date ranges.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    /// Range whose start lies after its end.
    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange {
        /// Start instant.
        start: DateTime<Utc>,
        /// End instant.
        end: DateTime<Utc>,
    },

    /// Range bound that is neither `YYYY-MM-DD` nor RFC 3339.
    #[error("Unparseable range bound: {0:?}")]
    UnparseableBound(String),

    /// Timezone name not present in the IANA database.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Date arithmetic left the representable calendar.
    #[error("Date out of range")]
    OutOfRange,
}
