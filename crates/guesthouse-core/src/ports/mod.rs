//! Port definitions: traits that adapters implement.

pub mod slider_repository;

pub use slider_repository::{SliderRepository, SliderRepositoryError};
