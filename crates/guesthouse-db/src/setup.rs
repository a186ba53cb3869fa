//! Database setup and initialization.
//!
//! Provides `setup_database()` for initializing the `SQLite` database with
//! the full schema. Entry points call this with the resolved database path.

use anyhow::Result;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use std::path::Path;

/// Sets up the `SQLite` database connection and ensures the schema exists.
///
/// Creates the database file if it doesn't exist, then creates all tables
/// and indexes. Safe to call on every startup.
///
/// # Errors
///
/// Returns an error if the database file cannot be opened or created, or if
/// schema creation fails.
pub async fn setup_database(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let pool = SqlitePool::connect_with(
        SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true),
    )
    .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Sets up an in-memory `SQLite` database for testing.
///
/// Creates a fresh in-memory database with the full production schema.
#[cfg(any(test, feature = "test-utils"))]
pub async fn setup_test_database() -> Result<SqlitePool> {
    let pool = SqlitePool::connect("sqlite::memory:").await?;
    create_schema(&pool).await?;
    Ok(pool)
}

/// Creates the complete database schema.
///
/// Safe to call multiple times as all statements use IF NOT EXISTS.
async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sliders (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT,
            image_url TEXT NOT NULL,
            position INTEGER NOT NULL,
            is_published INTEGER NOT NULL DEFAULT 0,
            status TEXT NOT NULL DEFAULT 'draft' CHECK (status IN ('draft', 'review', 'published')),
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    // The ordering invariant hangs off this index: positions must stay
    // unique at every point inside a transaction, not just at commit.
    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_sliders_position ON sliders(position)")
        .execute(pool)
        .await?;

    // Index on status for filtered listings
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sliders_status ON sliders(status)")
        .execute(pool)
        .await?;

    Ok(())
}
