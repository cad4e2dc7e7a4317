//! Timestamp decoding for `start_at` / `end_at`.
//!
//! The API emits ISO-8601 instants, sometimes with fractional seconds and
//! sometimes without. Parsing is two-tier: RFC 3339 with fractional
//! seconds first, then a whole-second fallback. A string that matches
//! neither is a decode error naming the offending input.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::Deserialize;

const WHOLE_SECONDS: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Parse an API timestamp, or `None` if neither tier accepts it.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(input)
        .or_else(|_| DateTime::parse_from_str(input, WHOLE_SECONDS))
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| de::Error::custom(format!("Invalid date format: {raw}")))
}

/// `null` and absent fields both decode to `None`; pair with `#[serde(default)]`.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("Invalid date format: {raw}"))),
        None => Ok(None),
    }
}
