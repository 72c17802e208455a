use axum::{
    extract::State,
    response::Json,
};
use serde::Deserialize;

use crate::error::{ApiError, RouteFailure};
use crate::models::WeatherDay;
use crate::normalize;
use crate::routes::{QueryParams, query_params, required};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct WeatherQuery {
    #[serde(default)]
    pub search_query: Option<String>,
}

/// GET /weather?search_query=Seattle - Daily forecast, one entry per day in order
pub async fn get_weather(
    State(state): State<AppState>,
    query: QueryParams<WeatherQuery>,
) -> Result<Json<Vec<WeatherDay>>, RouteFailure> {
    let params = query_params(query)?;
    let city = required(params.search_query, "search_query")?;
    let body = state.upstream.forecast(&city).await.map_err(ApiError::from)?;
    let days = normalize::weather_days(&body).map_err(ApiError::from)?;

    Ok(Json(days))
}
