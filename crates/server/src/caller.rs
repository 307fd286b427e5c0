//! Per-request caller context and admin gating.

use axum::{extract::{Request, State}, http::StatusCode, middleware::Next, response::Response};
use chrono::Utc;
use subtle::ConstantTimeEq;
use service::luggage::RequestContext;
use tracing::warn;

use crate::errors::JsonApiError;
use crate::state::AppState;

pub const CALLER_HEADER: &str = "x-caller-id";
pub const TIMESTAMP_HEADER: &str = "x-request-timestamp";
pub const ADMIN_KEY_HEADER: &str = "x-api-key";

/// Host clock in nanoseconds since the Unix epoch.
pub fn now_nanos() -> u64 {
    Utc::now()
        .timestamp_nanos_opt()
        .and_then(|n| u64::try_from(n).ok())
        .unwrap_or_default()
}

/// Middleware: build a `RequestContext` from `X-Caller-Id` and the optional
/// `X-Request-Timestamp`, and attach it to the request extensions.
pub async fn require_caller(mut req: Request, next: Next) -> Result<Response, JsonApiError> {
    let caller = req
        .headers()
        .get(CALLER_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.to_string());
    let Some(caller) = caller else {
        return Err(JsonApiError::unauthorized("missing X-Caller-Id header"));
    };

    let timestamp = match req.headers().get(TIMESTAMP_HEADER) {
        Some(raw) => raw
            .to_str()
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .ok_or_else(|| JsonApiError::bad_request("X-Request-Timestamp must be an unsigned integer"))?,
        None => now_nanos(),
    };

    req.extensions_mut().insert(RequestContext::new(caller, timestamp));
    Ok(next.run(req).await)
}

/// Middleware: require `X-API-Key` to match the configured admin key.
pub async fn require_admin_key(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let Some(expected) = state.admin_api_key.as_deref() else {
        return Err(JsonApiError::new(StatusCode::FORBIDDEN, "forbidden", Some("admin routes are disabled".into())));
    };
    let provided = req.headers().get(ADMIN_KEY_HEADER).map(|v| v.as_bytes()).unwrap_or_default();
    if !key_matches(provided, expected.as_bytes()) {
        warn!(path = %req.uri().path(), "admin key rejected");
        return Err(JsonApiError::unauthorized("invalid X-API-Key"));
    }
    Ok(next.run(req).await)
}

/// Constant-time key comparison; only the length leaks.
fn key_matches(provided: &[u8], expected: &[u8]) -> bool {
    bool::from(provided.ct_eq(expected))
}
