//! Response envelope decoding and rate-limit extraction.
//!
//! Most endpoints wrap their payload as `{"entries": T}`, but the wrapping
//! is not guaranteed, so decoding tries the envelope first and then the bare
//! type. Rate-limit headers are optional metadata and never fail a call.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::http::HttpResponse;

pub const RATE_LIMIT_LIMIT: &str = "x-rate-limit-limit";
pub const RATE_LIMIT_REMAINING: &str = "x-rate-limit-remaining";
pub const RATE_LIMIT_RESET: &str = "x-rate-limit-reset";

/// The `{"entries": T}` wrapper used by list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub entries: T,
}

/// Run `first`; if it fails, run `alternate` and keep its outcome.
pub fn try_then<T, E>(
    first: impl FnOnce() -> Result<T, E>,
    alternate: impl FnOnce(E) -> Result<T, E>,
) -> Result<T, E> {
    first().or_else(alternate)
}

/// Decode `body` as `ResponseEnvelope<T>`, falling back to a bare `T`.
///
/// On double failure the error is the one from the bare attempt.
pub fn decode_entries<T: DeserializeOwned>(body: &[u8]) -> Result<T, serde_json::Error> {
    try_then(
        || serde_json::from_slice::<ResponseEnvelope<T>>(body).map(|envelope| envelope.entries),
        |err| {
            tracing::debug!("envelope decode failed ({err}), decoding bare payload");
            serde_json::from_slice::<T>(body)
        },
    )
}

/// Quota metadata for the API key, taken from response headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub limit: u64,
    pub remaining: u64,
    pub reset: DateTime<Utc>,
}

impl RateLimitInfo {
    /// All three headers must be present and parse; otherwise `None`.
    pub fn from_headers(response: &HttpResponse) -> Option<Self> {
        let limit = response.header(RATE_LIMIT_LIMIT)?.parse::<u64>().ok()?;
        let remaining = response.header(RATE_LIMIT_REMAINING)?.parse::<u64>().ok()?;
        let reset = response.header(RATE_LIMIT_RESET)?.parse::<f64>().ok()?;
        Some(Self {
            limit,
            remaining,
            reset: unix_seconds(reset)?,
        })
    }
}

fn unix_seconds(value: f64) -> Option<DateTime<Utc>> {
    if !value.is_finite() {
        return None;
    }
    let secs = value.floor();
    let nanos = ((value - secs) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(secs as i64, nanos)
}
