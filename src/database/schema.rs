//! Database schema and migrations
//!
//! Versioned migrations recorded in a `migrations` table. Each migration
//! runs inside a transaction; SQL lives next to this module and ships
//! compiled into the binary.

use crate::error::Result;
use sqlx::{sqlite::SqlitePool, Row};

/// Ordered list of every schema migration.
fn migrations() -> Vec<(i32, &'static str)> {
    vec![(1, include_str!("migrations/001_initial_schema.sql"))]
}

/// Bring the schema up to the latest version.
pub async fn initialize_database(pool: &SqlitePool) -> Result<()> {
    tracing::info!("Initializing hub schema");

    // WAL for crash safety, foreign keys for integrity
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(pool)
        .await?;
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    let current_version: i32 = sqlx::query("SELECT COALESCE(MAX(version), 0) FROM migrations")
        .fetch_one(pool)
        .await?
        .get(0);

    tracing::debug!("Schema at version {}", current_version);

    for (version, sql) in migrations() {
        if version <= current_version {
            continue;
        }

        tracing::info!("Applying schema migration {}", version);

        let mut tx = pool.begin().await?;

        for statement in sql.split(';').filter(|s| !s.trim().is_empty()) {
            sqlx::query(statement).execute(&mut *tx).await?;
        }

        sqlx::query("INSERT INTO migrations (version) VALUES (?)")
            .bind(version)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
    }

    tracing::info!("Schema up to date");
    Ok(())
}
