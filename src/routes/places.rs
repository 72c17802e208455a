use axum::{
    extract::State,
    response::Json,
};
use serde::Deserialize;

use crate::error::{ApiError, RouteFailure};
use crate::models::Place;
use crate::normalize;
use crate::routes::{QueryParams, query_params, required};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PlacesQuery {
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
}

/// GET /places?latitude=..&longitude=.. - Points of interest around a coordinate
pub async fn get_places(
    State(state): State<AppState>,
    query: QueryParams<PlacesQuery>,
) -> Result<Json<Vec<Place>>, RouteFailure> {
    let params = query_params(query)?;
    let latitude = required(params.latitude, "latitude")?;
    let longitude = required(params.longitude, "longitude")?;

    let body = state
        .upstream
        .places(&latitude, &longitude)
        .await
        .map_err(ApiError::from)?;
    let places = normalize::places(&body).map_err(ApiError::from)?;

    Ok(Json(places))
}
