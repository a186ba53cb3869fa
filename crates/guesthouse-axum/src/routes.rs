//! Route definitions and router construction.
//!
//! Handlers delegate to the shared `SliderService` facade.

use axum::Router;
use axum::routing::{get, patch, put};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Build all API routes without the `/api` prefix (for nesting under /api).
///
/// The static `/sliders/reorder` route is registered alongside the
/// parameterized `/sliders/{id}`; axum matches statics first, so the
/// reorder endpoint is never shadowed by the id routes.
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/sliders",
            get(handlers::sliders::list).post(handlers::sliders::create),
        )
        .route("/sliders/reorder", put(handlers::sliders::reorder))
        .route(
            "/sliders/{id}",
            put(handlers::sliders::update).delete(handlers::sliders::remove),
        )
        .route("/sliders/{id}/publish", put(handlers::sliders::publish))
        .route("/sliders/{id}/move", patch(handlers::sliders::move_step))
        .route(
            "/sliders/{id}/update-position",
            put(handlers::sliders::update_position),
        )
}

/// Create the main Axum router with all API routes.
///
/// # Path Parameter Syntax
/// Axum 0.8 uses brace syntax for path parameters: `{id}`
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes().with_state(state).layer(cors))
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
