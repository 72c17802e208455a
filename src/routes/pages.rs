use axum::http::StatusCode;

use crate::error::NOT_FOUND_BODY;

pub async fn home() -> &'static str {
    "Home Page!"
}

pub async fn about() -> (StatusCode, &'static str) {
    (StatusCode::OK, "About Us Page")
}

/// Catch-all for unknown paths and unsupported methods
pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}
