//! PostgreSQL connection pool and migrations for the persistent item backend.
//!
//! Only used when `DATABASE_URL` is configured; otherwise the server keeps
//! items in memory and never touches this module.

use sqlx::{Pool, Postgres};

pub type DbPool = Pool<Postgres>;

/// Open a connection pool to the items database.
///
/// At most 5 connections are kept; they are opened lazily and reused
/// across requests.
///
/// # Errors
///
/// Fails when the connection string is invalid or the server rejects the
/// connection.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

/// Apply the SQL files in `migrations/` that have not run yet.
///
/// Applied migrations are recorded in `_sqlx_migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    // Embedded at compile time
    sqlx::migrate!("./migrations").run(pool).await
}
