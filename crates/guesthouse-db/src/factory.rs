//! Composition utilities for wiring services to `SQLite` backends.
//!
//! Focused purely on construction; no domain logic lives here.

use sqlx::SqlitePool;
use std::sync::Arc;

use guesthouse_core::SliderService;

use crate::repositories::SqliteSliderRepository;

/// Factory for creating repository and service instances with `SQLite`
/// backends.
pub struct CoreFactory;

impl CoreFactory {
    /// Create a `SQLite` connection pool from a connection URL.
    pub async fn create_pool(db_url: &str) -> anyhow::Result<SqlitePool> {
        let pool = SqlitePool::connect(db_url).await?;
        Ok(pool)
    }

    /// Create a slider repository from a pool.
    pub fn slider_repository(pool: SqlitePool) -> Arc<SqliteSliderRepository> {
        Arc::new(SqliteSliderRepository::new(pool))
    }

    /// Build a fully composed `SliderService` from a pool.
    ///
    /// This is the recommended single-step way for adapters to obtain the
    /// service. Equivalent to wrapping `slider_repository` yourself.
    pub fn build_slider_service(pool: SqlitePool) -> SliderService {
        SliderService::new(Self::slider_repository(pool))
    }
}
