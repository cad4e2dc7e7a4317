//! End-to-end checks against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `LumaClient::send`
//! over real HTTP through the default ureq transport. Validates request
//! building, auth, envelope decoding and rate-limit extraction together.

use std::time::Duration;

use chrono::{TimeZone, Utc};
use luma_core::{ListCalendarsRequest, ListEventsRequest, LumaClient, LumaConfig, LumaError};

const API_KEY: &str = "test_key";

/// Start the mock server on its own runtime thread and return its base URL.
fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            luma_mock_server::run(listener, API_KEY).await
        })
        .unwrap();
    });

    format!("http://{addr}/v1")
}

fn client(base_url: &str, api_key: &str) -> LumaClient {
    LumaClient::from_config(
        LumaConfig::new(api_key)
            .with_base_url(base_url)
            .with_timeout(Duration::from_secs(10)),
    )
}

#[test]
fn list_calendars_and_events() {
    let base_url = spawn_server();
    let client = client(&base_url, API_KEY);

    // Calendars come back enveloped with rate-limit headers.
    let (calendars, rate_limit) = client.send(&ListCalendarsRequest::new()).unwrap();
    assert_eq!(calendars.len(), 2);
    assert_eq!(calendars[0].id, "cal_123");
    assert_eq!(calendars[0].description.as_deref(), Some("Monthly meetups"));
    assert!(calendars[1].description.is_none());

    let first = rate_limit.expect("rate-limit headers");
    assert_eq!(first.limit, 100);
    assert_eq!(first.remaining, 99);
    assert!(first.reset > Utc::now());

    // Events scoped to one calendar and limited.
    let request = ListEventsRequest::new().calendar_id("cal_123").limit(50);
    let (events, rate_limit) = client.send(&request).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, "evt_1");
    assert_eq!(
        events[0].start_at,
        Utc.with_ymd_and_hms(2024, 2, 10, 10, 0, 0).unwrap() + chrono::Duration::milliseconds(500)
    );
    assert_eq!(
        events[0].end_at,
        Some(Utc.with_ymd_and_hms(2024, 2, 10, 12, 0, 0).unwrap())
    );
    assert_eq!(events[0].url.as_ref().unwrap().as_str(), "https://lu.ma/e/evt_1");
    assert!(events[1].end_at.is_none());
    assert_eq!(rate_limit.unwrap().remaining, 98);

    // Cursor skips what was already seen.
    let request = ListEventsRequest::new().cursor("evt_2");
    let (events, _) = client.send(&request).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "Rust Workshop");
}

#[test]
fn wrong_key_is_request_failed() {
    let base_url = spawn_server();
    let client = client(&base_url, "wrong_key");

    let err = client.send(&ListEventsRequest::new()).unwrap_err();
    match err {
        LumaError::RequestFailed { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message.as_deref(), Some("Unauthorized access"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_path_is_request_failed() {
    let base_url = spawn_server();
    let client = client(&format!("{base_url}/missing"), API_KEY);

    let err = client.send(&ListCalendarsRequest::new()).unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[test]
fn unreachable_server_is_network_error() {
    // Bind then drop to get a port nothing is listening on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = client(&format!("http://{addr}/v1"), API_KEY);

    let err = client.send(&ListCalendarsRequest::new()).unwrap_err();
    assert!(matches!(err, LumaError::Network(_)), "{err}");
}
