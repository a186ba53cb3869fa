//! Service layer: orchestration over the repository ports.

pub mod slider_service;

pub use slider_service::{SliderService, SliderServiceError};
