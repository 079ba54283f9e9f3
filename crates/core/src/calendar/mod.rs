//! Calendar utilities shared by the recurrence and stats engines.
//!
//! Recurrence is a calendar concept, so everything here works on UTC
//! calendar fields (year, month, day) rather than on raw timestamps.

pub mod error;
pub(crate) mod lenient;
pub mod range;
pub mod widen;

pub use error::CalendarError;
pub use range::DateRange;
pub use widen::{parse_timezone, widen_bounds};

use chrono::{Datelike, NaiveDate};

/// Returns true for Gregorian leap years.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in the given month (1-12). Returns 0 for an invalid month.
#[must_use]
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Whole calendar months from `from`'s month to `to`'s month.
///
/// Negative when `to` lies in an earlier month. Days are ignored.
#[must_use]
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    i64::from(to.year() - from.year()) * 12 + i64::from(to.month()) - i64::from(from.month())
}

/// Returns true if both dates fall in the same calendar month.
#[must_use]
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// The day a monthly charge anchored on `anchor_day` falls on in the given
/// month, clamped to the month's last day.
#[must_use]
pub fn clamped_day(anchor_day: u32, year: i32, month: u32) -> u32 {
    anchor_day.min(days_in_month(year, month))
}

/// Chart label for a day, `DD/MM`.
#[must_use]
pub fn day_label(day: NaiveDate) -> String {
    day.format("%d/%m").to_string()
}
