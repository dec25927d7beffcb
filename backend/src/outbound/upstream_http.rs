//! Transport helpers shared by the reqwest-backed upstream adapters.
//!
//! Adapters own URL construction and payload mapping; this module owns the
//! request itself: timeout and transport error mapping, status handling with a
//! compact body preview, and JSON decoding into transport DTOs.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::ports::UpstreamError;

/// Build a reqwest client with an explicit request timeout and user agent.
///
/// # Errors
///
/// Returns an error when the reqwest client cannot be constructed.
pub(crate) fn build_client(timeout: Duration, user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
}

/// Append path segments to a base URL, tolerating an optional trailing slash.
pub(crate) fn extend_path(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Issue a GET and decode a successful JSON body into `T`.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: Url,
) -> Result<T, UpstreamError> {
    debug!(url = %url, "calling upstream");
    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(map_transport_error)?;

    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }

    serde_json::from_slice(body.as_ref()).map_err(|error| {
        UpstreamError::unexpected_shape(format!(
            "invalid JSON payload: {error}; body: {}",
            body_preview(body.as_ref())
        ))
    })
}

fn map_transport_error(error: reqwest::Error) -> UpstreamError {
    if error.is_timeout() {
        UpstreamError::timeout(error.to_string())
    } else {
        UpstreamError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> UpstreamError {
    let message = body_preview(body);
    match status {
        StatusCode::TOO_MANY_REQUESTS => UpstreamError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => UpstreamError::timeout(
            format!("status {}: {message}", status.as_u16()),
        ),
        _ => UpstreamError::status(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
