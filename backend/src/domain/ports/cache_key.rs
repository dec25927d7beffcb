//! Composite cache keys derived from a request's effective parameters.

use crate::domain::{LandmarkQuery, PageId, SearchQuery};

/// Key used to store and retrieve reshaped lookup results.
///
/// Two requests with identical effective parameters always derive the same
/// key: coordinates render at the precision they were supplied, the radius is
/// in whole metres, and filters render in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for a nearby landmark search.
    ///
    /// # Examples
    /// ```
    /// use local_landmarks::domain::ports::CacheKey;
    /// use local_landmarks::domain::{CategoryFilter, Coordinates, LandmarkQuery, SearchRadius};
    ///
    /// let query = LandmarkQuery {
    ///     centre: Coordinates::try_new(40.7128, -74.006).expect("valid point"),
    ///     radius: SearchRadius::default(),
    ///     filters: CategoryFilter::from_csv("natural,historical").expect("valid filter"),
    /// };
    /// assert_eq!(
    ///     CacheKey::landmarks(&query).as_str(),
    ///     "landmarks:40.7128:-74.006:10000:historical,natural"
    /// );
    /// ```
    pub fn landmarks(query: &LandmarkQuery) -> Self {
        Self(format!(
            "landmarks:{lat}:{lon}:{radius}:{filters}",
            lat = query.centre.latitude(),
            lon = query.centre.longitude(),
            radius = query.radius.metres(),
            filters = query.filters,
        ))
    }

    /// Key for a single landmark's detail record.
    pub fn landmark_detail(page_id: PageId) -> Self {
        Self(format!("landmark:{page_id}"))
    }

    /// Key for a geocoder lookup. The query is already trimmed, so the key
    /// never carries surrounding whitespace.
    pub fn geocode(query: &SearchQuery) -> Self {
        Self(format!("search:{}", query.as_str()))
    }

    /// Borrow the underlying key as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
