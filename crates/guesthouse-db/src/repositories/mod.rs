//! Repository implementations backed by `SQLite`.

pub mod sqlite_slider_repository;

pub use sqlite_slider_repository::SqliteSliderRepository;
