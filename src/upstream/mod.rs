//! Outbound calls to the third-party data providers.
//!
//! Every call is a single GET with the provider's auth attached. Bodies come back as
//! raw JSON; shaping them into records is the normalizer's job.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use tracing::instrument;

use crate::config::{ApiKeys, Config, Endpoints};

/// Results per page for business search.
pub const BUSINESS_PAGE_SIZE: u32 = 5;

/// Search radius, in miles, for trails around a coordinate.
const TRAIL_MAX_DISTANCE: u32 = 10;

/// How much of an error body is kept for logging.
const ERROR_BODY_LIMIT: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    LocationIq,
    Yelp,
    Tmdb,
    Mapbox,
    Weatherbit,
    HikingProject,
}

impl Provider {
    pub fn name(self) -> &'static str {
        match self {
            Provider::LocationIq => "LocationIQ",
            Provider::Yelp => "Yelp",
            Provider::Tmdb => "TMDB",
            Provider::Mapbox => "Mapbox",
            Provider::Weatherbit => "Weatherbit",
            Provider::HikingProject => "Hiking Project",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{provider} request failed: {source}")]
    Transport {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned {status}: {body}")]
    Status {
        provider: Provider,
        status: StatusCode,
        body: String,
    },

    #[error("{provider} returned a body that is not JSON: {source}")]
    Decode {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Where to look for businesses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusinessArea {
    Near { latitude: String, longitude: String },
    Named(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessSearch {
    pub area: BusinessArea,
    /// 1-based.
    pub page: u32,
}

impl BusinessSearch {
    pub fn offset(&self) -> u32 {
        self.page.saturating_sub(1) * BUSINESS_PAGE_SIZE
    }
}

pub struct UpstreamClient {
    client: Client,
    endpoints: Endpoints,
    keys: ApiKeys,
}

impl UpstreamClient {
    pub fn new(config: &Config) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .user_agent(concat!("city_explorer_api/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(UpstreamError::Client)?;

        Ok(Self {
            client,
            endpoints: config.endpoints.clone(),
            keys: config.keys.clone(),
        })
    }

    fn base_url(&self, provider: Provider) -> &str {
        match provider {
            Provider::LocationIq => &self.endpoints.locationiq,
            Provider::Yelp => &self.endpoints.yelp,
            Provider::Tmdb => &self.endpoints.tmdb,
            Provider::Mapbox => &self.endpoints.mapbox,
            Provider::Weatherbit => &self.endpoints.weatherbit,
            Provider::HikingProject => &self.endpoints.hiking_project,
        }
    }

    fn authorize(&self, provider: Provider, request: RequestBuilder) -> RequestBuilder {
        match provider {
            Provider::LocationIq => request.query(&[("key", &self.keys.locationiq)]),
            Provider::Yelp => request.bearer_auth(&self.keys.yelp),
            Provider::Tmdb => request.query(&[("api_key", &self.keys.tmdb)]),
            Provider::Mapbox => request.query(&[("access_token", &self.keys.mapbox)]),
            Provider::Weatherbit => request.query(&[("key", &self.keys.weatherbit)]),
            Provider::HikingProject => request.query(&[("key", &self.keys.hiking_project)]),
        }
    }

    /// One authorized GET of `path` under the provider's base URL.
    #[instrument(skip(self, params), level = "info")]
    pub async fn get(
        &self,
        provider: Provider,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Value, UpstreamError> {
        let url = format!("{}{}", self.base_url(provider), path);
        let request = self.authorize(provider, self.client.get(&url).query(params));

        let response = request
            .send()
            .await
            .map_err(|source| UpstreamError::Transport { provider, source })?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            truncate_chars(&mut body, ERROR_BODY_LIMIT);
            tracing::warn!("{} returned status {}", provider, status);
            return Err(UpstreamError::Status {
                provider,
                status,
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| UpstreamError::Decode { provider, source })
    }

    pub async fn geocode(&self, city: &str) -> Result<Value, UpstreamError> {
        self.get(
            Provider::LocationIq,
            "/search.php",
            &[("q", city.to_string()), ("format", "json".to_string())],
        )
        .await
    }

    pub async fn businesses(&self, search: &BusinessSearch) -> Result<Value, UpstreamError> {
        let mut params = match &search.area {
            BusinessArea::Near {
                latitude,
                longitude,
            } => vec![
                ("latitude", latitude.clone()),
                ("longitude", longitude.clone()),
            ],
            BusinessArea::Named(location) => vec![("location", location.clone())],
        };
        params.push(("limit", BUSINESS_PAGE_SIZE.to_string()));
        params.push(("offset", search.offset().to_string()));

        self.get(Provider::Yelp, "/businesses/search", &params).await
    }

    pub async fn movies(&self, query: &str) -> Result<Value, UpstreamError> {
        self.get(Provider::Tmdb, "/search/movie", &[("query", query.to_string())])
            .await
    }

    pub async fn places(&self, latitude: &str, longitude: &str) -> Result<Value, UpstreamError> {
        // Mapbox takes the coordinate in the path, longitude first.
        let path = format!("/{},{}.json", longitude, latitude);
        self.get(
            Provider::Mapbox,
            &path,
            &[("types", "poi".to_string()), ("limit", "10".to_string())],
        )
        .await
    }

    pub async fn forecast(&self, city: &str) -> Result<Value, UpstreamError> {
        self.get(
            Provider::Weatherbit,
            "/forecast/daily",
            &[("city", city.to_string())],
        )
        .await
    }

    pub async fn trails(&self, latitude: &str, longitude: &str) -> Result<Value, UpstreamError> {
        self.get(
            Provider::HikingProject,
            "/get-trails",
            &[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("maxDistance", TRAIL_MAX_DISTANCE.to_string()),
            ],
        )
        .await
    }
}

fn truncate_chars(text: &mut String, max: usize) {
    if let Some((idx, _)) = text.char_indices().nth(max) {
        text.truncate(idx);
    }
}
