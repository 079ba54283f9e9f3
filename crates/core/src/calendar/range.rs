//! Inclusive timestamp range.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::error::CalendarError;

/// Inclusive `[start, end]` range of instants.
///
/// The `start <= end` invariant is checked on construction, including
/// deserialization, so a backwards range never reaches the engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = CalendarError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Creates a range.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::InvalidRange` if `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, CalendarError> {
        if start > end {
            return Err(CalendarError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range covering whole UTC days from `first` through `last`.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::InvalidRange` if `first` is after `last`.
    pub fn whole_days(first: NaiveDate, last: NaiveDate) -> Result<Self, CalendarError> {
        Self::new(start_of_day(first), end_of_day(last)?)
    }

    /// Range covering the calendar month containing `date`, from midnight on
    /// the 1st to the last millisecond of the month.
    pub fn month_of(date: NaiveDate) -> Result<Self, CalendarError> {
        let last_day = super::days_in_month(date.year(), date.month());
        let first = date.with_day(1).ok_or(CalendarError::OutOfRange)?;
        let last = date.with_day(last_day).ok_or(CalendarError::OutOfRange)?;
        Self::whole_days(first, last)
    }

    /// Start instant.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// End instant (inclusive).
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns true if `instant` lies inside the range, bounds included.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// UTC calendar date of the start.
    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// UTC calendar date of the end.
    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        self.end.date_naive()
    }

    /// Number of calendar days touched by the range, both ends included.
    #[must_use]
    pub fn day_count(&self) -> u64 {
        let span = (self.last_day() - self.first_day()).num_days();
        u64::try_from(span).map_or(0, |days| days + 1)
    }

    /// Every UTC calendar day from `first_day` to `last_day` inclusive.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let last = self.last_day();
        self.first_day().iter_days().take_while(move |day| *day <= last)
    }
}

/// Midnight UTC of `day`.
pub(crate) fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// Last millisecond of `day` in UTC.
pub(crate) fn end_of_day(day: NaiveDate) -> Result<DateTime<Utc>, CalendarError> {
    let next = day.succ_opt().ok_or(CalendarError::OutOfRange)?;
    Ok(start_of_day(next) - TimeDelta::milliseconds(1))
}
