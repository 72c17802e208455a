use axum::{
    extract::State,
    response::Json,
};
use serde::Deserialize;

use crate::error::{ApiError, RouteFailure};
use crate::models::Trail;
use crate::normalize;
use crate::routes::{QueryParams, query_params, required};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct TrailsQuery {
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
}

/// GET /trails?latitude=..&longitude=.. - Hiking trails within ten miles
pub async fn get_trails(
    State(state): State<AppState>,
    query: QueryParams<TrailsQuery>,
) -> Result<Json<Vec<Trail>>, RouteFailure> {
    let params = query_params(query)?;
    let latitude = required(params.latitude, "latitude")?;
    let longitude = required(params.longitude, "longitude")?;

    let body = state
        .upstream
        .trails(&latitude, &longitude)
        .await
        .map_err(ApiError::from)?;
    let trails = normalize::trails(&body).map_err(ApiError::from)?;

    Ok(Json(trails))
}
