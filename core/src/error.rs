//! Error types for the Luma API client.
//!
//! # Design
//! `LumaError` is the closed set of ways a `send` can fail. Every failure
//! reaches the caller as exactly one variant; nothing is retried or
//! swallowed. Missing or malformed rate-limit headers are deliberately not
//! represented here: they degrade to `None` on the success path.

use thiserror::Error;

use crate::http::TransportError;

/// Errors returned by `LumaClient`.
#[derive(Debug, Error)]
pub enum LumaError {
    /// The base URL and descriptor path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// No well-formed HTTP response was obtained.
    #[error("Network error: {0}")]
    Network(#[source] TransportError),

    /// The server answered with a status outside 200..=299.
    #[error("API error ({status}){}", describe_message(.message))]
    RequestFailed {
        status: u16,
        message: Option<String>,
    },

    /// The body matched neither the enveloped nor the bare response type.
    #[error("Decoding error: {0}")]
    DecodingFailed(#[source] serde_json::Error),
}

impl LumaError {
    /// Status code of a `RequestFailed` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            LumaError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn describe_message(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(": {message}"),
        None => String::new(),
    }
}

/// Errors raised while loading `LumaConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}
