use axum::{
    extract::State,
    response::Json,
};
use serde::Deserialize;

use crate::cache;
use crate::error::{ApiError, LOCATION_FAILURE, RouteFailure};
use crate::models::Location;
use crate::routes::{QueryParams, query_params, required};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LocationQuery {
    #[serde(default)]
    pub city: Option<String>,
}

/// GET /location?city=Seattle - Geocode a city, from cache when seen before
pub async fn get_location(
    State(state): State<AppState>,
    query: QueryParams<LocationQuery>,
) -> Result<Json<Location>, RouteFailure> {
    lookup(&state, query)
        .await
        .map(Json)
        .map_err(|e| e.failure(LOCATION_FAILURE))
}

async fn lookup(state: &AppState, query: QueryParams<LocationQuery>) -> Result<Location, ApiError> {
    let params = query_params(query)?;
    let city = required(params.city, "city")?;
    cache::get_or_fetch(&state.pool, &state.upstream, &city).await
}
