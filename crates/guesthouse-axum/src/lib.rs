//! Axum web adapter for the guesthouse content service.
//!
//! Exposes the slider API under `/api/sliders` plus a `/health` probe.
//! The composition root lives in [`bootstrap`]; handlers only talk to the
//! `SliderService` facade from `guesthouse-core`.

#![deny(unsafe_code)]

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use bootstrap::{AxumContext, CorsConfig, ServerConfig, bootstrap, start_server};
pub use error::HttpError;
pub use routes::create_router;
