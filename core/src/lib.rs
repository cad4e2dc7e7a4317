//! Typed client for the Luma REST API.
//!
//! # Overview
//! Describe an operation with a request descriptor (`ListCalendarsRequest`,
//! `ListEventsRequest`, or your own `LumaRequest` impl), then call
//! `LumaClient::send`. The client authenticates the request, executes it
//! through a `Transport`, classifies the outcome into `LumaError`, unwraps
//! the `{"entries": ...}` envelope and reports rate-limit headers.
//!
//! # Design
//! - `LumaClient` is stateless apart from its fixed configuration.
//! - `build_request` / `parse_response` expose the two halves of `send` for
//!   callers that perform their own I/O.
//! - Envelope decoding falls back to the bare payload because the API does
//!   not wrap every response.
//! - Rate-limit headers are best-effort and never turn a success into an
//!   error.

pub mod client;
pub mod config;
pub mod date;
pub mod error;
pub mod http;
pub mod request;
pub mod response;
pub mod types;

pub use client::LumaClient;
pub use config::LumaConfig;
pub use error::{ConfigError, LumaError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError, UreqTransport};
pub use request::{ListCalendarsRequest, ListEventsRequest, LumaRequest};
pub use response::{decode_entries, RateLimitInfo, ResponseEnvelope};
pub use types::{Calendar, Event};
