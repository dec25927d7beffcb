//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use local_landmarks::domain::CachePolicy;
use local_landmarks::settings::{AppSettings, SettingsError};
use url::Url;

/// Upstream endpoints and the transport options shared by every adapter.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub(crate) wikipedia_url: Url,
    pub(crate) nominatim_url: Url,
    pub(crate) osrm_url: Url,
    pub(crate) user_agent: String,
    pub(crate) timeout: Duration,
}

/// Validated configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) upstreams: UpstreamConfig,
    pub(crate) cache_policy: CachePolicy,
}

impl ServerConfig {
    /// Resolve defaults and validate loaded settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] for malformed addresses, URLs or a zero
    /// timeout.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            upstreams: UpstreamConfig {
                wikipedia_url: settings.wikipedia_url()?,
                nominatim_url: settings.nominatim_url()?,
                osrm_url: settings.osrm_url()?,
                user_agent: settings.user_agent().to_owned(),
                timeout: settings.upstream_timeout()?,
            },
            cache_policy: settings.cache_policy(),
        })
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
