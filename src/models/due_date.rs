//! Point-in-time fields arrive either as ISO-8601 text or as a numeric
//! tuple `[year, month, day, hour, minute, second, nanos]` (trailing parts
//! may be omitted). Both shapes are normalized into a single
//! `NaiveDateTime` when a payload is decoded, so consumers never branch on
//! the wire shape.
//!
//! Used as `#[serde(default, with = "due_date")]` on `Option<NaiveDateTime>`.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawDateTime {
    Text(String),
    Parts(Vec<i64>),
}

impl RawDateTime {
    pub fn normalize(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Text(text) => parse_text(text),
            Self::Parts(parts) => from_parts(parts),
        }
    }
}

fn parse_text(text: &str) -> Option<NaiveDateTime> {
    parse_text_in(text, &Local)
}

/// Strings carrying an offset are converted to wall-clock time in `zone`,
/// the frame tuples, calendar ranges and "now" all use. Offset-less and
/// date-only strings are taken as given.
fn parse_text_in<Tz: TimeZone>(text: &str, zone: &Tz) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(zone).naive_local());
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

fn from_parts(parts: &[i64]) -> Option<NaiveDateTime> {
    if !(3..=7).contains(&parts.len()) {
        return None;
    }
    let part = |i: usize| u32::try_from(parts.get(i).copied().unwrap_or(0)).ok();
    let year = i32::try_from(parts[0]).ok()?;
    let date = NaiveDate::from_ymd_opt(year, part(1)?, part(2)?)?;
    let time = NaiveTime::from_hms_nano_opt(part(3)?, part(4)?, part(5)?, part(6)?)?;
    Some(date.and_time(time))
}

/// Normalize an arbitrary JSON value. Anything that is neither shape, or
/// does not describe a real instant, yields `None`.
pub fn normalize_value(value: &Value) -> Option<NaiveDateTime> {
    if value.is_null() {
        return None;
    }
    let normalized = serde_json::from_value::<RawDateTime>(value.clone())
        .ok()
        .and_then(|raw| raw.normalize());
    if normalized.is_none() {
        tracing::warn!(%value, "ignoring unrecognized date-time value");
    }
    normalized
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(normalize_value))
}

pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(dt) => serializer.collect_str(&dt.format(WIRE_FORMAT)),
        None => serializer.serialize_none(),
    }
}

/// Serializes a local wall-clock time as a UTC instant with millisecond
/// precision and a `Z` suffix, e.g. `2024-06-01T12:30:00.000Z`.
///
/// Used as `#[serde(serialize_with = "due_date::utc_instant::serialize")]`.
pub mod utc_instant {
    use chrono::{Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
    use serde::Serializer;

    /// Ambiguous wall-clock times take the earlier instant. Times skipped by
    /// a DST jump are read as UTC.
    pub fn from_local_in<Tz: TimeZone>(value: NaiveDateTime, zone: &Tz) -> String {
        zone.from_local_datetime(&value)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| value.and_utc())
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&from_local_in(*dt, &Local)),
            None => serializer.serialize_none(),
        }
    }
}

/// Parse user-supplied input (CLI flags) with the same rules as the wire.
pub fn parse_input(text: &str) -> Option<NaiveDateTime> {
    parse_text(text)
}
