//! Application settings loaded via OrthoConfig.
//!
//! Values layer from configuration files, `LANDMARKS_*` environment variables
//! and command-line flags. Every field is optional; accessors supply the
//! defaults and validate URLs and durations before the server starts.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::domain::CachePolicy;
use crate::outbound::nominatim::DEFAULT_USER_AGENT;

const DEFAULT_ADDRESS: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_WIKIPEDIA_URL: &str = "https://en.wikipedia.org/w/api.php";
const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/";
const DEFAULT_OSRM_URL: &str = "https://router.project-osrm.org/";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Errors raised while turning raw settings into runtime configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A configured upstream URL failed to parse.
    #[error("invalid {field} URL `{value}`: {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    /// The bind address is not an IP address.
    #[error("invalid bind address `{value}`")]
    InvalidAddress { value: String },
    /// Upstream requests need a non-zero timeout.
    #[error("upstream timeout must be greater than zero")]
    ZeroTimeout,
}

/// Configuration values for the landmarks server.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LANDMARKS")]
pub struct AppSettings {
    /// IP address the HTTP server binds to.
    pub address: Option<String>,
    /// TCP port the HTTP server listens on.
    pub port: Option<u16>,
    /// Full URL of the MediaWiki `api.php` endpoint.
    pub wikipedia_url: Option<String>,
    /// Base URL of the Nominatim geocoder.
    pub nominatim_url: Option<String>,
    /// Base URL of the OSRM router.
    pub osrm_url: Option<String>,
    /// User agent sent with every upstream request.
    pub user_agent: Option<String>,
    /// Upstream request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Cache ttl for nearby landmark searches, in seconds.
    pub landmarks_ttl_secs: Option<u64>,
    /// Cache ttl for landmark summaries, in seconds.
    pub detail_ttl_secs: Option<u64>,
    /// Cache ttl for geocoder matches, in seconds.
    pub geocode_ttl_secs: Option<u64>,
}

impl AppSettings {
    /// Return the socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidAddress`] when the address is not an IP.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.address.as_deref().unwrap_or(DEFAULT_ADDRESS);
        let ip = raw
            .parse::<IpAddr>()
            .map_err(|_| SettingsError::InvalidAddress {
                value: raw.to_owned(),
            })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Return the MediaWiki API endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidUrl`] when the value does not parse.
    pub fn wikipedia_url(&self) -> Result<Url, SettingsError> {
        parse_url("wikipedia", self.wikipedia_url.as_deref(), DEFAULT_WIKIPEDIA_URL)
    }

    /// Return the geocoder base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidUrl`] when the value does not parse.
    pub fn nominatim_url(&self) -> Result<Url, SettingsError> {
        parse_url("nominatim", self.nominatim_url.as_deref(), DEFAULT_NOMINATIM_URL)
    }

    /// Return the router base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidUrl`] when the value does not parse.
    pub fn osrm_url(&self) -> Result<Url, SettingsError> {
        parse_url("osrm", self.osrm_url.as_deref(), DEFAULT_OSRM_URL)
    }

    /// Return the configured user agent, falling back to the default.
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    /// Return the upstream request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroTimeout`] for a zero value.
    pub fn upstream_timeout(&self) -> Result<Duration, SettingsError> {
        match self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS) {
            0 => Err(SettingsError::ZeroTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    /// Return the cache ttls, falling back to [`CachePolicy::default`].
    pub fn cache_policy(&self) -> CachePolicy {
        let defaults = CachePolicy::default();
        CachePolicy {
            landmarks_ttl: self
                .landmarks_ttl_secs
                .map_or(defaults.landmarks_ttl, Duration::from_secs),
            detail_ttl: self
                .detail_ttl_secs
                .map_or(defaults.detail_ttl, Duration::from_secs),
            geocode_ttl: self
                .geocode_ttl_secs
                .map_or(defaults.geocode_ttl, Duration::from_secs),
        }
    }
}

fn parse_url(
    field: &'static str,
    configured: Option<&str>,
    default: &str,
) -> Result<Url, SettingsError> {
    let raw = configured.unwrap_or(default);
    Url::parse(raw).map_err(|source| SettingsError::InvalidUrl {
        field,
        value: raw.to_owned(),
        source,
    })
}
