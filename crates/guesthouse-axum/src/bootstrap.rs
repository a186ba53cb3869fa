//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the web adapter: database pool, repository, and service.

use std::path::PathBuf;

use anyhow::Result;
use guesthouse_core::SliderService;
use guesthouse_core::paths::database_path;
use guesthouse_db::{CoreFactory, setup_database};

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// Path to the `SQLite` database file.
    pub db_path: PathBuf,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Create config with default paths.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self {
            port: 8976,
            db_path: database_path()?,
            cors: CorsConfig::default(),
        })
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }
}

/// Application context for the Axum adapter.
///
/// Holds all initialized services the handlers use.
pub struct AxumContext {
    /// Slider service facade.
    pub sliders: SliderService,
}

/// Bootstrap the server with all services.
pub async fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    tracing::info!(
        target: "guesthouse.paths",
        database_path = %config.db_path.display(),
        "bootstrap resolved paths"
    );

    let pool = setup_database(&config.db_path).await?;
    let sliders = CoreFactory::build_slider_service(pool);

    Ok(AxumContext { sliders })
}

/// Start the web server on the configured port.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    let ctx = bootstrap(&config).await?;
    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("guesthouse API listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
