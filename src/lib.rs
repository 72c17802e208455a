//! HTTP backend that puts geocoding, business, movie, place, weather and trail
//! providers behind one set of routes, caching geocoder answers in SQLite.

use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod normalize;
pub mod routes;
pub mod state;
pub mod upstream;

pub use config::Config;
pub use state::AppState;

/// Build the router with every route, CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Static pages
        .route("/", get(routes::pages::home))
        .route("/about", get(routes::pages::about))
        .route("/health", get(routes::health::health_check))

        // Provider-backed data
        .route("/location", get(routes::location::get_location))
        .route("/restaurants", get(routes::business::get_businesses))
        .route("/yelp", get(routes::business::get_businesses))
        .route("/movies", get(routes::movies::get_movies))
        .route("/places", get(routes::places::get_places))
        .route("/weather", get(routes::weather::get_weather))
        .route("/trails", get(routes::trails::get_trails))

        .fallback(routes::pages::not_found)
        .method_not_allowed_fallback(routes::pages::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
