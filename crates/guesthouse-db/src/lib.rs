//! `SQLite` persistence for the guesthouse content service.
//!
//! Implements the `SliderRepository` port from `guesthouse-core` on top of
//! `sqlx`. The position-mutating operations run inside single transactions
//! and stage rows through an out-of-range position band so the unique index
//! on `position` is never violated, even transiently.

#![deny(unsafe_code)]

pub mod factory;
pub mod repositories;
pub mod setup;

// Re-export factory for convenient access
pub use factory::CoreFactory;

// Re-export repository implementations
pub use repositories::SqliteSliderRepository;

// Re-export setup functions for convenient access
pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
