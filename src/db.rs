//! SQLite pool bootstrap and the embedded schema migrations.

use anyhow::{Context, Result};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::{path::Path, str::FromStr};

/// Open a connection pool for `database_url`.
///
/// File databases are created on first use, including their parent
/// directory. Foreign keys are enforced on every connection so that deletes
/// cascade from users to pins to comments.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    tracing::debug!("Connecting using raw URL => {}", database_url);

    let db_path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .trim_start_matches("file:");
    if !db_path.starts_with(":memory:") {
        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating database directory {:?}", parent))?;
                tracing::info!("Created missing directory {:?}", parent);
            }
        }
    }

    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("parsing database URL `{}`", database_url))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .with_context(|| format!("connecting to {}", database_url))?;

    Ok(pool)
}

/// Apply the migrations embedded from `migrations/`. Applied versions are
/// recorded in `_sqlx_migrations`, so reruns are no-ops.
pub async fn run_migrations(db: &SqlitePool) -> Result<()> {
    let migrator = sqlx::migrate!("./migrations");
    tracing::info!("Running {} migrations...", migrator.iter().count());
    migrator.run(db).await.context("running database migrations")?;
    Ok(())
}

/// An empty in-memory database.
///
/// Pinned to a single connection that is never recycled: every `:memory:`
/// connection is its own database.
#[cfg(test)]
pub async fn unmigrated_test_pool() -> std::sync::Arc<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    std::sync::Arc::new(pool)
}

/// A migrated in-memory database.
#[cfg(test)]
pub async fn test_pool() -> std::sync::Arc<SqlitePool> {
    let pool = unmigrated_test_pool().await;
    run_migrations(&pool).await.unwrap();
    pool
}
