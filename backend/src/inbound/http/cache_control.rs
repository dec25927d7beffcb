//! Shared cache-control policies for HTTP handlers.

use std::time::Duration;

use actix_web::http::header::{CACHE_CONTROL, HeaderName};

/// Responses that must never be stored by clients or proxies.
pub const NO_STORE: &str = "no-store";

/// Header tuple for responses that must not be reused.
pub const fn no_store_header() -> (HeaderName, &'static str) {
    (CACHE_CONTROL, NO_STORE)
}

/// Header tuple advertising a shared cache lifetime equal to `ttl`.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use local_landmarks::inbound::http::cache_control::public_max_age_header;
///
/// let (_, value) = public_max_age_header(Duration::from_secs(300));
/// assert_eq!(value, "public, max-age=300");
/// ```
pub fn public_max_age_header(ttl: Duration) -> (HeaderName, String) {
    (CACHE_CONTROL, format!("public, max-age={}", ttl.as_secs()))
}
