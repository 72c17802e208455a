use serde::Serialize;

/// Geocoded search text, as returned by `/location` and stored in the cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: String,
    pub longitude: String,
}

/// Row from the `locations` cache table
#[derive(Debug, sqlx::FromRow)]
pub struct CachedLocationRow {
    pub id: i64,
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: String,
    pub longitude: String,
}

impl CachedLocationRow {
    /// Convert database row to API response format
    pub fn to_location(&self) -> Location {
        Location {
            search_query: self.search_query.clone(),
            formatted_query: self.formatted_query.clone(),
            latitude: self.latitude.clone(),
            longitude: self.longitude.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Business {
    pub name: String,
    pub image_url: Option<String>,
    pub price: Option<String>,
    pub rating: f64,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    pub title: String,
    pub overview: String,
    pub average_votes: f64,
    pub total_votes: u64,
    pub image_url: Option<String>,
    pub popularity: f64,
    pub released_on: Option<String>,
}

/// Point of interest near a coordinate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub address: String,
}

/// One day of a forecast; `time` reads like "Sat May 01 2021".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherDay {
    pub forecast: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trail {
    pub name: String,
    pub location: String,
    pub length: f64,
    pub stars: f64,
    pub star_votes: u64,
    pub summary: String,
    pub trail_url: String,
    pub conditions: Option<String>,
    pub condition_date: String,
    pub condition_time: String,
}

/// Health check payload
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: i64,
}
