use axum::{
    extract::State,
    response::Json,
};
use serde::Deserialize;

use crate::error::{ApiError, RouteFailure};
use crate::models::Movie;
use crate::normalize;
use crate::routes::{QueryParams, query_params, required};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct MovieQuery {
    #[serde(default)]
    pub search_query: Option<String>,
}

/// GET /movies?search_query=Seattle - Movies matching the search text
pub async fn get_movies(
    State(state): State<AppState>,
    query: QueryParams<MovieQuery>,
) -> Result<Json<Vec<Movie>>, RouteFailure> {
    let params = query_params(query)?;
    let query = required(params.search_query, "search_query")?;
    let body = state.upstream.movies(&query).await.map_err(ApiError::from)?;
    let movies = normalize::movies(&body).map_err(ApiError::from)?;

    Ok(Json(movies))
}
