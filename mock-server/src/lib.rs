use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header::AUTHORIZATION, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const RATE_LIMIT: u64 = 100;
pub const RATE_WINDOW_SECS: i64 = 3600;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Calendar {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    pub id: String,
    pub calendar_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Entries<T> {
    pub entries: T,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListEventsQuery {
    pub calendar_id: Option<String>,
    pub limit: Option<usize>,
    pub cursor: Option<String>,
}

#[derive(Debug)]
struct Quota {
    remaining: u64,
    reset_at: i64,
}

#[derive(Clone)]
pub struct AppState {
    api_key: Arc<str>,
    calendars: Arc<Vec<Calendar>>,
    events: Arc<Vec<Event>>,
    quota: Arc<RwLock<Quota>>,
}

impl AppState {
    pub fn new(api_key: &str, calendars: Vec<Calendar>, events: Vec<Event>) -> Self {
        Self {
            api_key: Arc::from(api_key),
            calendars: Arc::new(calendars),
            events: Arc::new(events),
            quota: Arc::new(RwLock::new(Quota {
                remaining: RATE_LIMIT,
                reset_at: Utc::now().timestamp() + RATE_WINDOW_SECS,
            })),
        }
    }
}

/// Router seeded with `fixture_calendars` / `fixture_events`.
pub fn app(api_key: &str) -> Router {
    app_with_state(AppState::new(api_key, fixture_calendars(), fixture_events()))
}

pub fn app_with_state(state: AppState) -> Router {
    let api = Router::new()
        .route("/calendar/list-calendars", get(list_calendars))
        .route("/calendar/list-events", get(list_events));
    Router::new().nest("/v1", api).with_state(state)
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

pub fn fixture_calendars() -> Vec<Calendar> {
    vec![
        Calendar {
            id: "cal_123".to_string(),
            name: "Community Meetups".to_string(),
            description: Some("Monthly meetups".to_string()),
        },
        Calendar {
            id: "cal_456".to_string(),
            name: "Workshops".to_string(),
            description: None,
        },
    ]
}

pub fn fixture_events() -> Vec<Event> {
    vec![
        Event {
            id: "evt_1".to_string(),
            calendar_id: "cal_123".to_string(),
            name: "February Meetup".to_string(),
            description: Some("Talks and pizza".to_string()),
            start_at: "2024-02-10T10:00:00.500Z".to_string(),
            end_at: Some("2024-02-10T12:00:00Z".to_string()),
            timezone: Some("UTC".to_string()),
            url: Some("https://lu.ma/e/evt_1".to_string()),
        },
        Event {
            id: "evt_2".to_string(),
            calendar_id: "cal_123".to_string(),
            name: "March Meetup".to_string(),
            description: None,
            start_at: "2024-03-01T18:00:00Z".to_string(),
            end_at: None,
            timezone: Some("Europe/Helsinki".to_string()),
            url: None,
        },
        Event {
            id: "evt_3".to_string(),
            calendar_id: "cal_456".to_string(),
            name: "Rust Workshop".to_string(),
            description: None,
            start_at: "2024-04-15T09:30:00.000Z".to_string(),
            end_at: Some("2024-04-15T16:00:00.000Z".to_string()),
            timezone: None,
            url: Some("https://lu.ma/e/evt_3".to_string()),
        },
    ]
}

async fn list_calendars(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(HeaderMap, Json<Entries<Vec<Calendar>>>), Response> {
    let rate_headers = authorize(&state, &headers).await?;
    let entries = state.calendars.as_ref().clone();
    Ok((rate_headers, Json(Entries { entries })))
}

async fn list_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListEventsQuery>,
) -> Result<(HeaderMap, Json<Entries<Vec<Event>>>), Response> {
    let rate_headers = authorize(&state, &headers).await?;

    let mut events: Vec<Event> = state
        .events
        .iter()
        .filter(|event| {
            query
                .calendar_id
                .as_deref()
                .map_or(true, |id| event.calendar_id == id)
        })
        .cloned()
        .collect();

    // The cursor is the id of the last event already seen.
    if let Some(cursor) = query.cursor.as_deref() {
        if let Some(position) = events.iter().position(|event| event.id == cursor) {
            events.drain(..=position);
        }
    }
    if let Some(limit) = query.limit {
        events.truncate(limit);
    }

    Ok((rate_headers, Json(Entries { entries: events })))
}

/// Check the bearer key and charge one request against the quota.
async fn authorize(state: &AppState, headers: &HeaderMap) -> Result<HeaderMap, Response> {
    let expected = format!("Bearer {}", state.api_key);
    let presented = headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok());
    if presented != Some(expected.as_str()) {
        tracing::warn!("rejected request with missing or wrong API key");
        return Err((StatusCode::UNAUTHORIZED, "Unauthorized access").into_response());
    }

    let mut quota = state.quota.write().await;
    let now = Utc::now().timestamp();
    if now >= quota.reset_at {
        quota.remaining = RATE_LIMIT;
        quota.reset_at = now + RATE_WINDOW_SECS;
    }

    if quota.remaining == 0 {
        let rate_headers = rate_limit_headers(&quota);
        return Err((StatusCode::TOO_MANY_REQUESTS, rate_headers, "Rate limit exceeded").into_response());
    }
    quota.remaining -= 1;
    Ok(rate_limit_headers(&quota))
}

fn rate_limit_headers(quota: &Quota) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("x-rate-limit-limit", HeaderValue::from(RATE_LIMIT));
    headers.insert("x-rate-limit-remaining", HeaderValue::from(quota.remaining));
    headers.insert("x-rate-limit-reset", HeaderValue::from(quota.reset_at));
    headers
}
