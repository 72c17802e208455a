use axum::extract::Query;
use axum::extract::rejection::QueryRejection;

use crate::error::ApiError;

pub mod business;
pub mod health;
pub mod location;
pub mod movies;
pub mod pages;
pub mod places;
pub mod trails;
pub mod weather;

/// Query string of a route, with an unreadable one turned into the route's failure.
pub(crate) type QueryParams<T> = Result<Query<T>, QueryRejection>;

pub(crate) fn query_params<T>(query: QueryParams<T>) -> Result<T, ApiError> {
    let Query(params) = query?;
    Ok(params)
}

/// Unwrap a query parameter. Blank counts as absent; the value itself is passed on as sent.
pub(crate) fn required(value: Option<String>, name: &'static str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ApiError::MissingQuery(name))
}
