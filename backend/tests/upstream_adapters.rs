//! Adapter tests against stub HTTP upstreams.
//!
//! Each test starts a `wiremock` server standing in for Wikipedia, Nominatim
//! or OSRM and checks request construction plus response and error mapping.

use std::time::Duration;

use reqwest::Url;
use rstest::rstest;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use local_landmarks::domain::ports::{
    EncyclopediaSource, GeocodingSource, RoutingSource, UpstreamError,
};
use local_landmarks::domain::{Coordinates, PageId, RouteRequest, SearchQuery, SearchRadius};
use local_landmarks::outbound::nominatim::{DEFAULT_USER_AGENT, NominatimHttpSource};
use local_landmarks::outbound::osrm::OsrmHttpSource;
use local_landmarks::outbound::wikipedia::WikipediaHttpSource;

const TIMEOUT: Duration = Duration::from_secs(5);

fn wikipedia(server: &MockServer) -> WikipediaHttpSource {
    let endpoint = Url::parse(&format!("{}/w/api.php", server.uri())).expect("endpoint url");
    WikipediaHttpSource::new(endpoint, TIMEOUT, DEFAULT_USER_AGENT).expect("client builds")
}

fn nominatim(server: &MockServer) -> NominatimHttpSource {
    let base = Url::parse(&server.uri()).expect("base url");
    NominatimHttpSource::new(base, TIMEOUT, DEFAULT_USER_AGENT).expect("client builds")
}

fn osrm(server: &MockServer, timeout: Duration) -> OsrmHttpSource {
    let base = Url::parse(&server.uri()).expect("base url");
    OsrmHttpSource::new(base, timeout, DEFAULT_USER_AGENT).expect("client builds")
}

fn point(latitude: f64, longitude: f64) -> Coordinates {
    Coordinates::try_new(latitude, longitude).expect("valid point")
}

#[tokio::test]
async fn geosearch_sends_coordinates_and_decodes_hits() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "query"))
        .and(query_param("list", "geosearch"))
        .and(query_param("gscoord", "40.7128|-74.006"))
        .and(query_param("gsradius", "1000"))
        .and(query_param("gslimit", "50"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "batchcomplete": "",
            "query": {"geosearch": [
                {"pageid": 1, "ns": 0, "title": "City Hall Park", "lat": 40.7126, "lon": -74.0066, "dist": 31.2},
                {"pageid": 2, "ns": 0, "title": "Trinity Church", "lat": 40.7081, "lon": -74.0120, "dist": 640.0}
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let places = wikipedia(&server)
        .search_nearby(
            point(40.7128, -74.006),
            SearchRadius::new(1000).expect("valid radius"),
        )
        .await
        .expect("geosearch succeeds");

    let titles: Vec<_> = places.iter().map(|place| place.title.as_str()).collect();
    assert_eq!(titles, ["City Hall Park", "Trinity Church"]);
    assert_eq!(places[1].page_id.get(), 2);
}

#[tokio::test]
async fn geosearch_without_results_key_is_unexpected_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": {"code": "badcoord", "info": "Invalid coordinate provided"}
        })))
        .mount(&server)
        .await;

    let err = wikipedia(&server)
        .search_nearby(point(1.0, 2.0), SearchRadius::default())
        .await
        .expect_err("error payload is not a geosearch result");

    assert!(err.is_unexpected_shape(), "unexpected error: {err:?}");
}

#[tokio::test]
async fn extract_request_picks_the_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("pageids", "32578"))
        .and(query_param("prop", "extracts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": {"pages": {"32578": {
                "pageid": 32578,
                "title": "Statue of Liberty",
                "extract": "The Statue of Liberty is a colossal neoclassical sculpture."
            }}}
        })))
        .mount(&server)
        .await;

    let summary = wikipedia(&server)
        .fetch_summary(PageId::new(32578).expect("positive id"))
        .await
        .expect("extract succeeds")
        .expect("page exists");

    assert_eq!(summary.title, "Statue of Liberty");
    assert_eq!(
        summary.extract.as_deref(),
        Some("The Statue of Liberty is a colossal neoclassical sculpture.")
    );
}

#[tokio::test]
async fn missing_page_reads_as_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": {"pages": {"-1": {"pageid": 999999999, "missing": ""}}}
        })))
        .mount(&server)
        .await;

    let summary = wikipedia(&server)
        .fetch_summary(PageId::new(999_999_999).expect("positive id"))
        .await
        .expect("request succeeds");

    assert!(summary.is_none());
}

#[tokio::test]
async fn geocode_parses_string_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Eiffel Tower"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "place_id": 88066702,
            "lat": "48.8582599",
            "lon": "2.2945006",
            "display_name": "Tour Eiffel, 5, Avenue Anatole France, Paris, France"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let result = nominatim(&server)
        .geocode(&SearchQuery::new("Eiffel Tower").expect("non-blank"))
        .await
        .expect("geocode succeeds")
        .expect("place found");

    assert_eq!(result.coordinates.latitude(), 48.858_259_9);
    assert_eq!(result.coordinates.longitude(), 2.294_500_6);
    assert_eq!(
        result.display_name,
        "Tour Eiffel, 5, Avenue Anatole France, Paris, France"
    );
}

#[tokio::test]
async fn geocode_without_hits_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let result = nominatim(&server)
        .geocode(&SearchQuery::new("Atlantis").expect("non-blank"))
        .await
        .expect("request succeeds");

    assert!(result.is_none());
}

#[rstest]
#[case(429, "rate limited")]
#[case(503, "status")]
#[case(504, "timeout")]
#[tokio::test]
async fn geocoder_status_codes_map_to_upstream_errors(#[case] status: u16, #[case] kind: &str) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(status).set_body_string("try again later"))
        .mount(&server)
        .await;

    let err = nominatim(&server)
        .geocode(&SearchQuery::new("Paris").expect("non-blank"))
        .await
        .expect_err("non-success status");

    let matched = match kind {
        "rate limited" => matches!(err, UpstreamError::RateLimited { .. }),
        "timeout" => matches!(err, UpstreamError::Timeout { .. }),
        _ => matches!(err, UpstreamError::Status { status: 503, .. }),
    };
    assert!(matched, "expected {kind}, got {err:?}");
}

#[tokio::test]
async fn route_requests_longitude_first_and_returns_geometry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/route/v1/driving/2.2945,48.8584;2.3376,48.8606"))
        .and(query_param("overview", "full"))
        .and(query_param("geometries", "geojson"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "Ok",
            "routes": [{
                "distance": 4011.2,
                "geometry": {"type": "LineString", "coordinates": [[2.2945, 48.8584], [2.3376, 48.8606]]}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let geometry = osrm(&server, TIMEOUT)
        .route(&RouteRequest {
            start: point(48.8584, 2.2945),
            end: point(48.8606, 2.3376),
        })
        .await
        .expect("route succeeds");

    assert_eq!(geometry.as_value()["type"], "LineString");
}

#[tokio::test]
async fn route_without_routes_is_unexpected_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "NoRoute",
            "message": "Impossible route between points",
            "routes": []
        })))
        .mount(&server)
        .await;

    let err = osrm(&server, TIMEOUT)
        .route(&RouteRequest {
            start: point(0.0, 0.0),
            end: point(1.0, 1.0),
        })
        .await
        .expect_err("no geometry");

    assert!(err.is_unexpected_shape(), "unexpected error: {err:?}");
}

#[tokio::test]
async fn slow_router_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": "Ok", "routes": []}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let err = osrm(&server, Duration::from_millis(200))
        .route(&RouteRequest {
            start: point(0.0, 0.0),
            end: point(1.0, 1.0),
        })
        .await
        .expect_err("request exceeds the timeout");

    assert!(
        matches!(err, UpstreamError::Timeout { .. }),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn unreachable_upstream_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    let base = Url::parse(&format!("http://127.0.0.1:{port}")).expect("base url");

    let err = NominatimHttpSource::new(base, TIMEOUT, DEFAULT_USER_AGENT)
        .expect("client builds")
        .geocode(&SearchQuery::new("Paris").expect("non-blank"))
        .await
        .expect_err("connection refused");

    assert!(
        matches!(err, UpstreamError::Transport { .. }),
        "unexpected error: {err:?}"
    );
}
