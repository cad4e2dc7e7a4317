//! Request descriptors: one type per API operation.
//!
//! # Design
//! A descriptor carries its path, method and query parameters, and names
//! the type its response decodes into through `LumaRequest::Response`.
//! `LumaClient::send` is generic over the descriptor, so the decoded type is
//! fixed at compile time and new endpoints need only a new impl.

use serde::de::DeserializeOwned;

use crate::http::HttpMethod;
use crate::types::{Calendar, Event};

/// A typed description of one Luma API call.
pub trait LumaRequest {
    /// The payload type, after the `entries` envelope (if any) is removed.
    type Response: DeserializeOwned;

    /// Path relative to the base URL, without a leading slash.
    fn path(&self) -> &str;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    /// Ordered query parameters. Empty means no query string at all.
    fn query_params(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

/// `GET calendar/list-calendars`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCalendarsRequest;

impl ListCalendarsRequest {
    pub fn new() -> Self {
        Self
    }
}

impl LumaRequest for ListCalendarsRequest {
    type Response = Vec<Calendar>;

    fn path(&self) -> &str {
        "calendar/list-calendars"
    }
}

/// `GET calendar/list-events`, optionally scoped to a calendar.
///
/// Unset fields are left out of the query string entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEventsRequest {
    pub calendar_id: Option<String>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl ListEventsRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calendar_id(mut self, calendar_id: impl Into<String>) -> Self {
        self.calendar_id = Some(calendar_id.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }
}

impl LumaRequest for ListEventsRequest {
    type Response = Vec<Event>;

    fn path(&self) -> &str {
        "calendar/list-events"
    }

    fn query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(calendar_id) = &self.calendar_id {
            params.push(("calendar_id".to_string(), calendar_id.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(cursor) = &self.cursor {
            params.push(("cursor".to_string(), cursor.clone()));
        }
        params
    }
}
