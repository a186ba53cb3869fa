//! Core domain types, ports, and services for the guesthouse content API.
//!
//! This crate holds everything adapters share: the `Slider` domain model,
//! the `SliderRepository` port that storage backends implement, and the
//! `SliderService` orchestration layer the HTTP adapter calls into.
//! No adapter-specific crates (sqlx, axum, clap) appear here.

#![deny(unsafe_code)]

pub mod domain;
pub mod paths;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    MoveDirection, NewSlider, Slider, SliderFilter, SliderPosition, SliderStatus, SliderUpdate,
};
pub use ports::{SliderRepository, SliderRepositoryError};
pub use services::{SliderService, SliderServiceError};

// Re-export path utilities
pub use paths::{PathError, data_root, database_path};
