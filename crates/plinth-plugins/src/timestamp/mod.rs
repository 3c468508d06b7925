//! Interpretation of plist values as points in time.
//!
//! Property lists store dates either natively (`<date>`) or, in many
//! third-party preference files, as ISO-8601 strings. Plugins use
//! [`interpret`] to treat both uniformly. Strings that look like a date but
//! do not parse are reported as [`DateValue::Malformed`] so the plugin can
//! publish a parse error instead of silently skipping them.

use std::time::SystemTime;

use time::format_description::well_known::{Iso8601, Rfc3339};
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Outcome of reading a plist value as a timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateValue {
    /// The value is a valid point in time.
    Timestamp(OffsetDateTime),
    /// The value looks like a date but could not be parsed.
    Malformed(String),
    /// The value is not a date at all.
    NotADate,
}

/// Reads `value` as a timestamp.
///
/// Strings without an explicit offset are interpreted in `zone`.
///
/// # Example
///
/// ```
/// use plinth_plugins::timestamp::{DateValue, interpret};
/// use time::UtcOffset;
/// use time::macros::datetime;
///
/// let value = plist::Value::String("2024-03-01T12:30:00Z".into());
/// assert_eq!(
///     interpret(&value, UtcOffset::UTC),
///     DateValue::Timestamp(datetime!(2024-03-01 12:30:00 UTC)),
/// );
/// assert_eq!(
///     interpret(&plist::Value::String("Trackpad".into()), UtcOffset::UTC),
///     DateValue::NotADate,
/// );
/// ```
#[must_use]
pub fn interpret(value: &plist::Value, zone: UtcOffset) -> DateValue {
    match value {
        plist::Value::Date(date) => from_system_time(SystemTime::from(*date)).map_or_else(
            || DateValue::Malformed("native date is outside the supported range".to_owned()),
            DateValue::Timestamp,
        ),
        plist::Value::String(text) if looks_like_timestamp(text) => {
            parse_timestamp(text, zone).map_or_else(
                || DateValue::Malformed(format!("unparsable date '{text}'")),
                DateValue::Timestamp,
            )
        }
        _ => DateValue::NotADate,
    }
}

/// Returns `None` for instants outside the years `time` can represent.
fn from_system_time(instant: SystemTime) -> Option<OffsetDateTime> {
    match instant.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(after) => OffsetDateTime::UNIX_EPOCH.checked_add(Duration::try_from(after).ok()?),
        Err(before) => {
            OffsetDateTime::UNIX_EPOCH.checked_sub(Duration::try_from(before.duration()).ok()?)
        }
    }
}

/// Parses an ISO-8601 style string.
///
/// Accepts RFC 3339, ISO-8601 with or without an offset, the space separated
/// `YYYY-MM-DD hh:mm:ss[.ffffff]` form, and bare dates (midnight). Values
/// without an offset are placed in `zone`.
#[must_use]
pub fn parse_timestamp(text: &str, zone: UtcOffset) -> Option<OffsetDateTime> {
    let trimmed = text.trim();
    if let Ok(value) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Some(value);
    }
    if let Ok(value) = OffsetDateTime::parse(trimmed, &Iso8601::DEFAULT) {
        return Some(value);
    }
    if let Ok(value) = PrimitiveDateTime::parse(trimmed, &Iso8601::DEFAULT) {
        return Some(value.assume_offset(zone));
    }
    if let Ok(value) = PrimitiveDateTime::parse(
        trimmed,
        format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]"
        ),
    ) {
        return Some(value.assume_offset(zone));
    }
    Date::parse(trimmed, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_offset(zone))
}

/// Returns whether `text` starts like a calendar date (`YYYY-`).
fn looks_like_timestamp(text: &str) -> bool {
    matches!(
        text.trim().as_bytes(),
        [a, b, c, d, b'-', ..] if [a, b, c, d].iter().all(|byte| byte.is_ascii_digit())
    )
}
