//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use std::future::{Future, pending};

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use local_landmarks::Trace;
#[cfg(debug_assertions)]
use local_landmarks::doc::ApiDoc;
use local_landmarks::inbound::http::health::{HealthState, live, ready};
use local_landmarks::inbound::http::landmarks::{get_landmark, list_landmarks};
use local_landmarks::inbound::http::query_config;
use local_landmarks::inbound::http::routes::get_route;
use local_landmarks::inbound::http::search::search;
use local_landmarks::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(query_config())
        .wrap(Trace)
        .service(list_landmarks)
        .service(get_landmark)
        .service(search)
        .service(get_route)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// The server installs its own shutdown listener: on Ctrl-C or SIGTERM the
/// liveness probe starts failing and the listener drains gracefully.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: validated [`ServerConfig`] with the bind address, upstreams and ttls.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when building HTTP clients, binding the
/// socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)?;
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    actix_web::rt::spawn(drain_on(shutdown_signal(), health_state.clone(), server.handle()));
    health_state.mark_ready();
    Ok(server)
}

/// Resolve once the process is asked to stop: Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(%error, "failed to listen for ctrl-c");
            pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                warn!(%error, "failed to listen for SIGTERM");
                pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}

/// Fail liveness probes once `shutdown` resolves, then stop the server after
/// in-flight requests complete.
async fn drain_on(
    shutdown: impl Future<Output = ()>,
    health_state: web::Data<HealthState>,
    handle: ServerHandle,
) {
    shutdown.await;
    info!("shutdown requested; draining connections");
    health_state.mark_unhealthy();
    handle.stop(true).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use local_landmarks::domain::{CachePolicy, LandmarkLookupService, TRACE_ID_HEADER};
    use local_landmarks::outbound::cache::InMemoryResultCache;
    use local_landmarks::test_support::{
        MutableClock, StubEncyclopedia, StubGeocoder, StubRouter, nearby_place,
    };
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn deps() -> AppDependencies {
        let lookup = LandmarkLookupService::new(
            Arc::new(StubEncyclopedia::with_places(vec![nearby_place(
                1,
                "Lakeside Park",
                51.5,
                -0.1,
            )])),
            Arc::new(StubGeocoder::empty()),
            Arc::new(StubRouter::returning(json!({"type": "LineString"}))),
            Arc::new(InMemoryResultCache::new(Arc::new(MutableClock::default()))),
            CachePolicy::default(),
        );
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        AppDependencies {
            health_state,
            http_state: web::Data::new(HttpState::new(Arc::new(lookup), CachePolicy::default())),
        }
    }

    #[rstest]
    #[case("/health/ready", StatusCode::OK)]
    #[case("/health/live", StatusCode::OK)]
    #[case("/landmarks?lat=51.5&lon=-0.1", StatusCode::OK)]
    #[case("/search?q=Atlantis", StatusCode::NOT_FOUND)]
    #[case("/route?start_lat=1&start_lon=2&end_lat=3&end_lon=4", StatusCode::OK)]
    #[case("/", StatusCode::NOT_FOUND)]
    #[actix_web::test]
    async fn wires_every_endpoint(#[case] uri: &str, #[case] expected: StatusCode) {
        let app = test::init_service(build_app(deps())).await;

        let response =
            test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

        assert_eq!(response.status(), expected);
        assert!(response.headers().contains_key(TRACE_ID_HEADER));
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_query_uses_error_envelope() {
        let app = test::init_service(build_app(deps())).await;

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/search?q=a&q=b")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["code"], "invalid_request");
        assert!(body["traceId"].is_string());
    }

    #[rstest]
    #[actix_web::test]
    async fn shutdown_fails_liveness_and_stops_the_server() {
        let deps = deps();
        let health_state = deps.health_state.clone();
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind test listener");
        let server = HttpServer::new(move || build_app(deps.clone()))
            .listen(listener)
            .expect("listen on test socket")
            .disable_signals()
            .workers(1)
            .run();
        let handle = server.handle();
        let running = actix_web::rt::spawn(server);

        drain_on(async {}, health_state.clone(), handle).await;

        assert!(!health_state.is_alive());
        running
            .await
            .expect("server task joins")
            .expect("server stops cleanly");
    }
}
