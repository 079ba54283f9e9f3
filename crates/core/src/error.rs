//! Mapping of engine errors onto `AppError`.

use equilibrio_shared::AppError;

use crate::calendar::CalendarError;
use crate::recurrence::RecurrenceError;
use crate::source::SourceError;
use crate::stats::StatsError;

impl From<CalendarError> for AppError {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::InvalidRange { .. } => Self::InvalidRange(err.to_string()),
            CalendarError::UnparseableBound(_) | CalendarError::UnknownTimezone(_) => {
                Self::Validation(err.to_string())
            }
            CalendarError::OutOfRange => Self::Internal(err.to_string()),
        }
    }
}

impl From<RecurrenceError> for AppError {
    fn from(err: RecurrenceError) -> Self {
        match err {
            RecurrenceError::RangeTooLong { .. } => Self::RangeTooLong(err.to_string()),
        }
    }
}

impl From<StatsError> for AppError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::Recurrence(inner) => inner.into(),
            StatsError::Calendar(inner) => inner.into(),
            StatsError::Overflow => Self::Validation(err.to_string()),
        }
    }
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        Self::Validation(err.to_string())
    }
}
