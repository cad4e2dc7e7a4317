//! Request builder, response classifier and `send` for the Luma API.
//!
//! # Design
//! `LumaClient` holds only the API key, the base URL and a transport, none of
//! which change after construction, so one client can serve concurrent
//! callers without locking. Each call is split into `build_request`, which
//! produces an `HttpRequest`, and `parse_response`, which classifies an
//! `HttpResponse`. `send` runs both around a single `Transport::execute`.

use std::fmt;

use url::Url;

use crate::config::LumaConfig;
use crate::error::LumaError;
use crate::http::{HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::request::LumaRequest;
use crate::response::{decode_entries, RateLimitInfo};

/// Typed client for the Luma REST API.
#[derive(Clone)]
pub struct LumaClient<T = UreqTransport> {
    api_key: String,
    base_url: String,
    transport: T,
}

impl LumaClient<UreqTransport> {
    /// Client for the public API with the default blocking transport.
    pub fn new(api_key: &str) -> Self {
        Self::from_config(LumaConfig::new(api_key))
    }

    pub fn from_config(config: LumaConfig) -> Self {
        let transport = UreqTransport::with_timeout(config.timeout);
        Self::with_transport(config, transport)
    }
}

impl<T> LumaClient<T> {
    pub fn with_transport(config: LumaConfig, transport: T) -> Self {
        Self {
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the authenticated request for `request`.
    ///
    /// The query string is omitted entirely when there are no parameters.
    pub fn build_request<R: LumaRequest>(&self, request: &R) -> Result<HttpRequest, LumaError> {
        let raw = format!("{}/{}", self.base_url, request.path().trim_start_matches('/'));
        let mut url = Url::parse(&raw).map_err(|e| LumaError::InvalidUrl(format!("{raw} ({e})")))?;

        let params = request.query_params();
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }

        Ok(HttpRequest {
            method: request.method(),
            url: url.to_string(),
            headers: vec![
                ("Authorization".to_string(), format!("Bearer {}", self.api_key)),
                ("Accept".to_string(), "application/json".to_string()),
            ],
        })
    }

    /// Classify `response` and decode its body as `R::Response`.
    pub fn parse_response<R: LumaRequest>(
        &self,
        response: HttpResponse,
    ) -> Result<(R::Response, Option<RateLimitInfo>), LumaError> {
        check_status(&response)?;

        let decoded = decode_entries::<R::Response>(&response.body).map_err(|e| {
            tracing::warn!("failed to decode {} response: {e}", request_name::<R>());
            LumaError::DecodingFailed(e)
        })?;
        let rate_limit = RateLimitInfo::from_headers(&response);

        Ok((decoded, rate_limit))
    }
}

impl<T: Transport> LumaClient<T> {
    /// Execute `request` and return its decoded payload with any rate-limit
    /// information the server reported.
    pub fn send<R: LumaRequest>(
        &self,
        request: &R,
    ) -> Result<(R::Response, Option<RateLimitInfo>), LumaError> {
        let http_request = self.build_request(request)?;
        tracing::debug!("{} {}", http_request.method, http_request.url);

        let response = self
            .transport
            .execute(&http_request)
            .map_err(LumaError::Network)?;

        self.parse_response::<R>(response)
    }
}

impl<T: fmt::Debug> fmt::Debug for LumaClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LumaClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("transport", &self.transport)
            .finish()
    }
}

/// Reject malformed status lines and anything outside 200..=299.
fn check_status(response: &HttpResponse) -> Result<(), LumaError> {
    if !(100..=599).contains(&response.status) {
        return Err(LumaError::Network(
            format!("malformed response: invalid status code {}", response.status).into(),
        ));
    }
    if (200..=299).contains(&response.status) {
        return Ok(());
    }

    let message = if response.body.is_empty() {
        None
    } else {
        String::from_utf8(response.body.clone()).ok()
    };
    tracing::warn!("request failed with status {}", response.status);
    Err(LumaError::RequestFailed {
        status: response.status,
        message,
    })
}

fn request_name<R>() -> &'static str {
    let full = std::any::type_name::<R>();
    full.rsplit("::").next().unwrap_or(full)
}
