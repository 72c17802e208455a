use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::normalize::NormalizeError;
use crate::upstream::UpstreamError;

/// Body every data route answers failures with.
pub const GENERIC_FAILURE: &str = "So sorry, something went wrong.";

/// Failure body of `/location`.
pub const LOCATION_FAILURE: &str = "Your API call did not work?";

/// Body of the catch-all route.
pub const NOT_FOUND_BODY: &str = "Try again.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("missing query parameter `{0}`")]
    MissingQuery(&'static str),

    #[error("unreadable query string: {0}")]
    InvalidQuery(#[from] QueryRejection),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error("Database error: {0}")]
    Persistence(#[from] sqlx::Error),
}

impl ApiError {
    /// Pair the error with the fixed body its route responds with.
    pub fn failure(self, message: &'static str) -> RouteFailure {
        RouteFailure {
            error: self,
            message,
        }
    }
}

/// What a route sends back when anything in its call chain fails. Callers only ever
/// see the fixed message; the cause goes to the log.
#[derive(Debug)]
pub struct RouteFailure {
    error: ApiError,
    message: &'static str,
}

impl RouteFailure {
    #[cfg(test)]
    pub fn error(&self) -> &ApiError {
        &self.error
    }
}

impl From<ApiError> for RouteFailure {
    fn from(err: ApiError) -> Self {
        err.failure(GENERIC_FAILURE)
    }
}

impl IntoResponse for RouteFailure {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {}", self.error);
        (StatusCode::INTERNAL_SERVER_ERROR, self.message).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        RouteFailure::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_every_error_kind_gets_the_same_response() {
        let errors = [
            ApiError::MissingQuery("city"),
            ApiError::Normalize(NormalizeError::Empty { kind: "geocode" }),
            ApiError::Persistence(sqlx::Error::RowNotFound),
        ];

        for err in errors {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body_text(response).await, GENERIC_FAILURE);
        }
    }

    #[tokio::test]
    async fn test_failure_keeps_route_message() {
        let failure = ApiError::MissingQuery("city").failure(LOCATION_FAILURE);
        assert!(matches!(failure.error(), ApiError::MissingQuery("city")));

        let response = failure.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, LOCATION_FAILURE);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ApiError::MissingQuery("latitude").to_string(),
            "missing query parameter `latitude`"
        );
        let err: ApiError = NormalizeError::Empty { kind: "geocode" }.into();
        assert_eq!(err.to_string(), "geocode response had no results");
    }
}
