//! Lookup-or-insert cache in front of the geocoder.
//!
//! A row for a search text means the geocoder is not asked about that text again.
//! The check and the insert are separate statements, so two concurrent misses for the
//! same text both insert; lookups return the oldest row.

use sqlx::sqlite::SqlitePool;

use crate::db;
use crate::error::ApiError;
use crate::models::Location;
use crate::normalize;
use crate::upstream::UpstreamClient;

pub async fn get_or_fetch(
    pool: &SqlitePool,
    upstream: &UpstreamClient,
    search_text: &str,
) -> Result<Location, ApiError> {
    if let Some(row) = db::find_location(pool, search_text).await? {
        tracing::debug!(id = row.id, "Geocode cache hit for {:?}", search_text);
        return Ok(row.to_location());
    }

    tracing::debug!("Geocode cache miss for {:?}", search_text);
    let body = upstream.geocode(search_text).await?;
    let location = normalize::location(search_text, &body)?;
    let id = db::insert_location(pool, &location).await?;
    tracing::info!(id, "Cached location for {:?}", search_text);

    Ok(location)
}
