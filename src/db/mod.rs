use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::DatabaseConfig;
use crate::models::{CachedLocationRow, Location};

/// Open the pool, creating the database file if needed.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

    // An in-memory database lives only as long as its connection, so keep it open.
    SqlitePoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

// Geocode cache queries

/// Oldest cached row for the exact search text, if any.
pub async fn find_location(
    pool: &SqlitePool,
    search_query: &str,
) -> Result<Option<CachedLocationRow>, sqlx::Error> {
    sqlx::query_as::<_, CachedLocationRow>(
        r#"SELECT id, search_query, formatted_query, latitude, longitude
           FROM locations
           WHERE search_query = ?
           ORDER BY id
           LIMIT 1"#
    )
    .bind(search_query)
    .fetch_optional(pool)
    .await
}

/// Store a geocoded location. Returns the new row id.
pub async fn insert_location(pool: &SqlitePool, location: &Location) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"INSERT INTO locations (search_query, formatted_query, latitude, longitude)
           VALUES (?, ?, ?, ?)"#
    )
    .bind(&location.search_query)
    .bind(&location.formatted_query)
    .bind(&location.latitude)
    .bind(&location.longitude)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

#[cfg(test)]
pub(crate) async fn count_locations(pool: &SqlitePool, search_query: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM locations WHERE search_query = ?"#)
        .bind(search_query)
        .fetch_one(pool)
        .await
}

#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    let pool = connect(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    })
    .await
    .unwrap();
    migrate(&pool).await.unwrap();
    pool
}
