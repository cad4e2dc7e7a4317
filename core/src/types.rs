//! Domain models returned by the Luma API.
//!
//! Field names are snake_case on the wire and map one-to-one onto the Rust
//! fields. Timestamps go through `crate::date` so both fractional and
//! whole-second forms decode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::date;

/// A Luma calendar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Calendar {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A Luma event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "date::deserialize")]
    pub start_at: DateTime<Utc>,
    #[serde(
        default,
        deserialize_with = "date::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn event_decodes_wire_fields() {
        let json = r#"{
            "id": "evt_123",
            "name": "Test Event",
            "description": "Test Description",
            "start_at": "2024-02-10T10:00:00Z",
            "end_at": "2024-02-10T12:30:00.250Z",
            "timezone": "UTC",
            "url": "https://lu.ma/e/evt_123"
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, "evt_123");
        assert_eq!(event.name, "Test Event");
        assert_eq!(event.description.as_deref(), Some("Test Description"));
        assert_eq!(event.start_at, Utc.with_ymd_and_hms(2024, 2, 10, 10, 0, 0).unwrap());
        assert!(event.end_at.unwrap() > event.start_at);
        assert_eq!(event.timezone.as_deref(), Some("UTC"));
        assert_eq!(event.url.unwrap().as_str(), "https://lu.ma/e/evt_123");
    }

    #[test]
    fn event_optional_fields_may_be_absent() {
        let json = r#"{"id":"evt_1","name":"Event 1","start_at":"2024-02-10T10:00:00Z"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(event.description.is_none());
        assert!(event.end_at.is_none());
        assert!(event.timezone.is_none());
        assert!(event.url.is_none());
    }

    #[test]
    fn event_requires_start_at() {
        let json = r#"{"id":"evt_1","name":"Event 1"}"#;
        assert!(serde_json::from_str::<Event>(json).is_err());
    }

    #[test]
    fn event_rejects_bad_date() {
        let json = r#"{"id":"evt_1","name":"Event 1","start_at":"not-a-date"}"#;
        let err = serde_json::from_str::<Event>(json).unwrap_err();
        assert!(err.to_string().contains("not-a-date"));
    }

    #[test]
    fn event_roundtrips_through_json() {
        let json = r#"{"id":"evt_1","name":"Event 1","start_at":"2024-02-10T10:00:00.500Z","url":"https://lu.ma/e/evt_1"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        let back: Event = serde_json::from_str(&serde_json::to_string(&event).unwrap()).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn calendar_decodes() {
        let json = r#"{"id":"cal_123","name":"My Calendar","description":"A test calendar"}"#;
        let calendar: Calendar = serde_json::from_str(json).unwrap();
        assert_eq!(calendar.id, "cal_123");
        assert_eq!(calendar.name, "My Calendar");
        assert_eq!(calendar.description.as_deref(), Some("A test calendar"));
    }

    #[test]
    fn calendar_rejects_missing_name() {
        assert!(serde_json::from_str::<Calendar>(r#"{"id":"cal_1"}"#).is_err());
    }
}
