//! Counting upstream doubles for handler and caching tests.
//!
//! Each stub answers with a canned result and records how often it was
//! called so tests can assert cache hits without a network.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::ports::{
    EncyclopediaSource, GeocodingSource, NearbyPlace, PageSummary, RoutingSource, UpstreamError,
};
use crate::domain::{
    Coordinates, GeocodeResult, PageId, RouteGeometry, RouteRequest, SearchQuery, SearchRadius,
};

/// Build a geosearch hit, panicking on invalid test input.
pub fn nearby_place(page_id: u64, title: &str, latitude: f64, longitude: f64) -> NearbyPlace {
    NearbyPlace {
        page_id: PageId::new(page_id).expect("test page id must be positive"),
        title: title.to_owned(),
        coordinates: Coordinates::try_new(latitude, longitude)
            .expect("test coordinates must be in range"),
    }
}

/// Encyclopedia double with canned geosearch and summary answers.
pub struct StubEncyclopedia {
    nearby: Result<Vec<NearbyPlace>, UpstreamError>,
    summaries: HashMap<PageId, PageSummary>,
    summary_error: Option<UpstreamError>,
    search_calls: AtomicUsize,
    summary_calls: AtomicUsize,
    last_radius: Mutex<Option<SearchRadius>>,
}

impl StubEncyclopedia {
    /// Answer every geosearch with `places`.
    pub fn with_places(places: Vec<NearbyPlace>) -> Self {
        Self::answering(Ok(places))
    }

    /// Fail every geosearch and summary lookup with `error`.
    pub fn failing(error: UpstreamError) -> Self {
        let mut stub = Self::answering(Err(error.clone()));
        stub.summary_error = Some(error);
        stub
    }

    fn answering(nearby: Result<Vec<NearbyPlace>, UpstreamError>) -> Self {
        Self {
            nearby,
            summaries: HashMap::new(),
            summary_error: None,
            search_calls: AtomicUsize::new(0),
            summary_calls: AtomicUsize::new(0),
            last_radius: Mutex::new(None),
        }
    }

    /// Register a page summary. Unregistered pages read as missing.
    #[must_use]
    pub fn with_summary(mut self, page_id: u64, title: &str, extract: Option<&str>) -> Self {
        let page_id = PageId::new(page_id).expect("test page id must be positive");
        self.summaries.insert(
            page_id,
            PageSummary {
                title: title.to_owned(),
                extract: extract.map(str::to_owned),
            },
        );
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn summary_calls(&self) -> usize {
        self.summary_calls.load(Ordering::SeqCst)
    }

    /// Radius of the most recent geosearch, if any.
    pub fn last_radius(&self) -> Option<SearchRadius> {
        *self.last_radius.lock().expect("radius lock poisoned")
    }
}

#[async_trait]
impl EncyclopediaSource for StubEncyclopedia {
    async fn search_nearby(
        &self,
        _centre: Coordinates,
        radius: SearchRadius,
    ) -> Result<Vec<NearbyPlace>, UpstreamError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_radius.lock().expect("radius lock poisoned") = Some(radius);
        self.nearby.clone()
    }

    async fn fetch_summary(&self, page_id: PageId) -> Result<Option<PageSummary>, UpstreamError> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        match &self.summary_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.summaries.get(&page_id).cloned()),
        }
    }
}

/// Geocoder double returning one canned answer.
pub struct StubGeocoder {
    answer: Result<Option<GeocodeResult>, UpstreamError>,
    calls: AtomicUsize,
}

impl StubGeocoder {
    /// Resolve every query to the given point.
    pub fn resolving(latitude: f64, longitude: f64, display_name: &str) -> Self {
        Self::answering(Ok(Some(GeocodeResult {
            coordinates: Coordinates::try_new(latitude, longitude)
                .expect("test coordinates must be in range"),
            display_name: display_name.to_owned(),
        })))
    }

    /// Report no match for every query.
    pub fn empty() -> Self {
        Self::answering(Ok(None))
    }

    /// Fail every query with `error`.
    pub fn failing(error: UpstreamError) -> Self {
        Self::answering(Err(error))
    }

    fn answering(answer: Result<Option<GeocodeResult>, UpstreamError>) -> Self {
        Self {
            answer,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeocodingSource for StubGeocoder {
    async fn geocode(&self, _query: &SearchQuery) -> Result<Option<GeocodeResult>, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }
}

/// Router double returning one canned geometry and recording requests.
pub struct StubRouter {
    answer: Result<RouteGeometry, UpstreamError>,
    requests: Mutex<Vec<RouteRequest>>,
}

impl StubRouter {
    /// Answer every request with `geometry`.
    pub fn returning(geometry: serde_json::Value) -> Self {
        Self::answering(Ok(RouteGeometry::new(geometry)))
    }

    /// Fail every request with `error`.
    pub fn failing(error: UpstreamError) -> Self {
        Self::answering(Err(error))
    }

    fn answering(answer: Result<RouteGeometry, UpstreamError>) -> Self {
        Self {
            answer,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RouteRequest> {
        match self.requests.lock() {
            Ok(requests) => requests.clone(),
            Err(_) => panic!("router stub mutex"),
        }
    }
}

#[async_trait]
impl RoutingSource for StubRouter {
    async fn route(&self, request: &RouteRequest) -> Result<RouteGeometry, UpstreamError> {
        match self.requests.lock() {
            Ok(mut requests) => requests.push(*request),
            Err(_) => panic!("router stub mutex"),
        }
        self.answer.clone()
    }
}
