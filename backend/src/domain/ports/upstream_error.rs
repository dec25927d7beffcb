//! Error type shared by the upstream source ports.

use super::define_port_error;

define_port_error! {
    /// Failures surfaced while calling an upstream HTTP service.
    pub enum UpstreamError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "upstream transport failed: {message}",
        /// The call exceeded the configured timeout.
        Timeout { message: String } =>
            "upstream timeout: {message}",
        /// The upstream rate-limited the request.
        RateLimited { message: String } =>
            "upstream rate limited request: {message}",
        /// The upstream answered with a non-success status.
        Status { status: u16, message: String } =>
            "upstream returned status {status}: {message}",
        /// The payload did not match the expected schema.
        UnexpectedShape { message: String } =>
            "upstream response has unexpected shape: {message}",
    }
}

impl UpstreamError {
    /// Returns `true` for schema mismatches on an otherwise successful call.
    pub fn is_unexpected_shape(&self) -> bool {
        matches!(self, Self::UnexpectedShape { .. })
    }
}
