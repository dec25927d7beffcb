//! Builders wiring outbound adapters into the lookup service and HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use local_landmarks::domain::LandmarkLookupService;
use local_landmarks::inbound::http::state::HttpState;
use local_landmarks::outbound::cache::InMemoryResultCache;
use local_landmarks::outbound::nominatim::NominatimHttpSource;
use local_landmarks::outbound::osrm::OsrmHttpSource;
use local_landmarks::outbound::wikipedia::WikipediaHttpSource;

use super::ServerConfig;

fn client_error(adapter: &str, err: reqwest::Error) -> std::io::Error {
    std::io::Error::other(format!("failed to build {adapter} HTTP client: {err}"))
}

/// Build the lookup service over the configured upstreams and an in-memory
/// cache, then wrap it in handler state.
///
/// # Errors
///
/// Returns [`std::io::Error`] when an HTTP client cannot be constructed.
pub fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let upstreams = &config.upstreams;
    let encyclopedia = WikipediaHttpSource::new(
        upstreams.wikipedia_url.clone(),
        upstreams.timeout,
        &upstreams.user_agent,
    )
    .map_err(|err| client_error("wikipedia", err))?;
    let geocoder = NominatimHttpSource::new(
        upstreams.nominatim_url.clone(),
        upstreams.timeout,
        &upstreams.user_agent,
    )
    .map_err(|err| client_error("nominatim", err))?;
    let router = OsrmHttpSource::new(
        upstreams.osrm_url.clone(),
        upstreams.timeout,
        &upstreams.user_agent,
    )
    .map_err(|err| client_error("osrm", err))?;

    info!(
        wikipedia = %upstreams.wikipedia_url,
        nominatim = %upstreams.nominatim_url,
        osrm = %upstreams.osrm_url,
        timeout_secs = upstreams.timeout.as_secs(),
        "configured upstream adapters"
    );

    let lookup = LandmarkLookupService::new(
        Arc::new(encyclopedia),
        Arc::new(geocoder),
        Arc::new(router),
        Arc::new(InMemoryResultCache::new(Arc::new(DefaultClock))),
        config.cache_policy,
    );
    Ok(web::Data::new(HttpState::new(
        Arc::new(lookup),
        config.cache_policy,
    )))
}
