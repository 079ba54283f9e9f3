//! Caller-side widening of range bounds.
//!
//! The engines take instants. Callers that received plain dates turn them
//! into full-day bounds here before building a `DateRange`.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use super::error::CalendarError;
use super::range::{DateRange, end_of_day, start_of_day};

enum Bound {
    Date(NaiveDate),
    Instant(DateTime<Utc>),
}

fn parse_bound(raw: &str) -> Result<Bound, CalendarError> {
    let raw = raw.trim();
    // Only a bare `YYYY-MM-DD` counts as date-only.
    if raw.len() == 10
        && let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    {
        return Ok(Bound::Date(date));
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|instant| Bound::Instant(instant.with_timezone(&Utc)))
        .map_err(|_| CalendarError::UnparseableBound(raw.to_string()))
}

/// Last millisecond of `day` as lived in `tz`, expressed in UTC.
fn end_of_local_day(day: NaiveDate, tz: Tz) -> Result<DateTime<Utc>, CalendarError> {
    let next = day.succ_opt().ok_or(CalendarError::OutOfRange)?;
    let local_midnight = tz.from_local_datetime(&next.and_time(NaiveTime::MIN));
    let midnight = local_midnight
        .earliest()
        .or_else(|| local_midnight.latest())
        .map(|instant| instant.with_timezone(&Utc))
        .ok_or(CalendarError::OutOfRange)?;
    Ok(midnight - TimeDelta::milliseconds(1))
}

/// Parses a timezone name such as `America/Sao_Paulo`.
pub fn parse_timezone(name: &str) -> Result<Tz, CalendarError> {
    name.parse::<Tz>()
        .map_err(|_| CalendarError::UnknownTimezone(name.to_string()))
}

/// Builds a range from raw bounds, widening date-only inputs to full days.
///
/// - A date-only start becomes midnight UTC of that date.
/// - A date-only end becomes whichever is later: the end of that day in UTC
///   or the end of that day in the business timezone `tz`. West of UTC this
///   reaches into the next UTC day so late-evening local sales are kept.
/// - RFC 3339 bounds are taken verbatim.
///
/// # Errors
///
/// Returns `CalendarError::UnparseableBound` for malformed input and
/// `CalendarError::InvalidRange` if the widened start is after the end.
pub fn widen_bounds(start: &str, end: &str, tz: Tz) -> Result<DateRange, CalendarError> {
    let start = match parse_bound(start)? {
        Bound::Date(day) => start_of_day(day),
        Bound::Instant(instant) => instant,
    };
    let end = match parse_bound(end)? {
        Bound::Date(day) => end_of_day(day)?.max(end_of_local_day(day, tz)?),
        Bound::Instant(instant) => instant,
    };
    DateRange::new(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn instant(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    #[rstest]
    #[case(chrono_tz::America::Sao_Paulo, "2024-03-01T02:59:59.999Z")]
    #[case(Tz::UTC, "2024-02-29T23:59:59.999Z")]
    #[case(chrono_tz::Asia::Tokyo, "2024-02-29T23:59:59.999Z")]
    fn test_date_only_end_covers_local_evening(#[case] tz: Tz, #[case] expected_end: &str) {
        let range = widen_bounds("2024-02-01", "2024-02-29", tz).unwrap();
        assert_eq!(range.start(), instant("2024-02-01T00:00:00Z"));
        assert_eq!(range.end(), instant(expected_end));
    }

    #[test]
    fn test_timestamps_are_taken_verbatim() {
        let range = widen_bounds(
            "2024-02-01T03:00:00.000Z",
            "2024-02-29T23:59:59.999-03:00",
            chrono_tz::America::Sao_Paulo,
        )
        .unwrap();
        assert_eq!(range.start(), instant("2024-02-01T03:00:00Z"));
        assert_eq!(range.end(), instant("2024-03-01T02:59:59.999Z"));
    }

    #[rstest]
    #[case("01/02/2024")]
    #[case("2024-02-30")]
    #[case("")]
    #[case("yesterday")]
    fn test_malformed_bound_rejected(#[case] raw: &str) {
        assert!(matches!(
            widen_bounds(raw, "2024-02-29", Tz::UTC),
            Err(CalendarError::UnparseableBound(_))
        ));
    }

    #[test]
    fn test_backwards_bounds_rejected() {
        assert!(matches!(
            widen_bounds("2024-03-01", "2024-02-01", Tz::UTC),
            Err(CalendarError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_parse_timezone() {
        assert_eq!(
            parse_timezone("America/Sao_Paulo").unwrap(),
            chrono_tz::America::Sao_Paulo
        );
        assert_eq!(
            parse_timezone("Mars/Olympus"),
            Err(CalendarError::UnknownTimezone("Mars/Olympus".to_string()))
        );
    }
}
