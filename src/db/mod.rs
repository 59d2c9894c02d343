use anyhow::Result;
use sqlx::{Pool, Sqlite, migrate::MigrateDatabase, sqlite::SqlitePoolOptions};
use std::time::Duration;

pub mod delivery_store;
pub mod migrations;
pub mod note_store;
pub mod tables;

pub type DbPool = Pool<Sqlite>;

/// Initialize the database connection pool
pub async fn init_db_pool(database_url: &str) -> Result<DbPool> {
    // Create the database if it doesn't exist
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        Sqlite::create_database(database_url).await?;
    }

    // Create connection pool
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await?;

    let applied = migrations::run_migrations(&pool).await?;
    tracing::info!("Database ready at {} ({} migrations applied)", database_url, applied);

    Ok(pool)
}

/// Single-connection in-memory pool with the schema applied.
///
/// The connection is never recycled, otherwise the database would vanish with it.
#[cfg(test)]
pub async fn memory_pool() -> Result<DbPool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect("sqlite::memory:")
        .await?;

    migrations::run_migrations(&pool).await?;

    Ok(pool)
}
