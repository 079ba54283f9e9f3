//! Forgiving deserialization of ledger dates.
//!
//! Exported ledgers carry dates in whatever shape the writer used. A value
//! that cannot be read becomes `None`, so the record is treated as undated
//! instead of failing the whole ledger.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use tracing::warn;

use super::range::start_of_day;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Text(String),
    Other(IgnoredAny),
}

fn read_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawDate>::deserialize(deserializer)? {
        Some(RawDate::Text(raw)) => Some(raw),
        Some(RawDate::Other(_)) => {
            warn!("Ignoring ledger date that is not a string");
            None
        }
        None => None,
    })
}

/// Reads `YYYY-MM-DD`, or an RFC 3339 timestamp reduced to its UTC date.
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|instant| instant.with_timezone(&Utc).date_naive())
    })
}

/// Reads an RFC 3339 timestamp, or `YYYY-MM-DD` as midnight UTC.
pub(crate) fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|instant| instant.with_timezone(&Utc))
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(start_of_day)
        })
}

fn logged<T>(raw: &str, parsed: Option<T>) -> Option<T> {
    if parsed.is_none() {
        warn!(value = %raw, "Ignoring unparseable ledger date");
    }
    parsed
}

/// `deserialize_with` target for optional calendar dates.
pub(crate) fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(read_text(deserializer)?.and_then(|raw| logged(&raw, parse_date(&raw))))
}

/// `deserialize_with` target for optional instants.
pub(crate) fn instant<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(read_text(deserializer)?.and_then(|raw| logged(&raw, parse_instant(&raw))))
}
