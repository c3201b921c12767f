//! Shared HTTP response helpers for the remote clients.
//!
//! Centralizes status-code checks (404, 429 with `Retry-After` parsing,
//! non-success → [`RemoteError::Api`]) so the individual clients stay focused
//! on request construction and response mapping.

use std::time::Duration;

use crate::error::RemoteError;

pub(crate) const USER_AGENT: &str = concat!("flower/", env!("CARGO_PKG_VERSION"));

/// Request timeout shared by every remote client.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn build_client() -> Result<reqwest::Client, RemoteError> {
    Ok(reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?)
}

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **404 Not Found** → [`RemoteError::NotFound`] carrying the request URL.
/// - **429 Too Many Requests** → [`RemoteError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s).
/// - **Non-success status** → [`RemoteError::Api`] with status code and
///   response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    let status = resp.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(RemoteError::NotFound(resp.url().to_string()));
    }
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(RemoteError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !status.is_success() {
        return Err(RemoteError::Api {
            status: status.as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}
