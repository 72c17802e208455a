use std::net::{Ipv4Addr, SocketAddr};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is not in the correct format: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Base URLs for every upstream provider.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub locationiq: String,
    pub yelp: String,
    pub tmdb: String,
    pub mapbox: String,
    pub weatherbit: String,
    pub hiking_project: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            locationiq: "https://us1.locationiq.com/v1".to_string(),
            yelp: "https://api.yelp.com/v3".to_string(),
            tmdb: "https://api.themoviedb.org/3".to_string(),
            mapbox: "https://api.mapbox.com/geocoding/v5/mapbox.places".to_string(),
            weatherbit: "https://api.weatherbit.io/v2.0".to_string(),
            hiking_project: "https://www.hikingproject.com/data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    pub locationiq: String,
    pub yelp: String,
    pub tmdb: String,
    pub mapbox: String,
    pub weatherbit: String,
    pub hiking_project: String,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Everything read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: Ipv4Addr,
    pub port: u16,
    pub database: DatabaseConfig,
    pub keys: ApiKeys,
    pub endpoints: Endpoints,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED,
            port: 3000,
            database: DatabaseConfig {
                url: "sqlite://city_explorer.db".to_string(),
                max_connections: 5,
            },
            keys: ApiKeys::default(),
            endpoints: Endpoints::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source. Unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(host) = lookup("HOST") {
            config.host = parse("HOST", host)?;
        }
        if let Some(port) = lookup("PORT") {
            config.port = parse("PORT", port)?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            config.database.url = url;
        }
        if let Some(max) = lookup("DATABASE_MAX_CONNECTIONS") {
            config.database.max_connections = parse("DATABASE_MAX_CONNECTIONS", max)?;
        }

        let key = |name: &str| {
            lookup(name).unwrap_or_else(|| {
                tracing::warn!("{} is not set; requests to that provider will fail", name);
                String::new()
            })
        };
        config.keys = ApiKeys {
            locationiq: key("LOCATIONIQ_API_KEY"),
            yelp: key("YELP_API_KEY"),
            tmdb: key("MOVIE_API_KEY"),
            mapbox: key("MAPBOX_API_KEY"),
            weatherbit: key("WEATHER_API_KEY"),
            hiking_project: key("TRAIL_API_KEY"),
        };

        let endpoints = &mut config.endpoints;
        for (name, slot) in [
            ("LOCATIONIQ_URL", &mut endpoints.locationiq),
            ("YELP_URL", &mut endpoints.yelp),
            ("MOVIE_URL", &mut endpoints.tmdb),
            ("MAPBOX_URL", &mut endpoints.mapbox),
            ("WEATHER_URL", &mut endpoints.weatherbit),
            ("TRAIL_URL", &mut endpoints.hiking_project),
        ] {
            if let Some(url) = lookup(name) {
                *slot = url.trim_end_matches('/').to_string();
            }
        }

        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}
