//! Slider repository trait and error types.
//!
//! The repository owns the dense-rank invariant: after every call that
//! returns `Ok`, and after every call that returns `Err`, the set of
//! `position` values over all sliders equals `{1..N}` exactly. Each of the
//! position-mutating operations is transaction-scoped in the implementation;
//! there is no partially-applied outcome observable to callers.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{MoveDirection, NewSlider, Slider, SliderFilter, SliderUpdate};

/// Domain-specific errors for slider storage operations.
///
/// Storage implementation details (SQL error codes, connection failures)
/// are folded into these variants; services never see raw driver errors.
#[derive(Debug, Error)]
pub enum SliderRepositoryError {
    /// The requested slider was not found.
    #[error("slider not found: {0}")]
    NotFound(String),

    /// The mutation lost a race or touched an unexpected number of rows.
    /// The transaction was rolled back; the caller should reload and retry.
    #[error("ordering conflict: {0}")]
    Conflict(String),

    /// Storage backend error (connection, transaction infrastructure).
    #[error("storage error: {0}")]
    Internal(String),
}

/// Repository trait for slider persistence and position management.
///
/// # Ordering contract
///
/// - `insert` appends at position N+1.
/// - `replace_order`, `move_step`, `set_position`, and
///   `delete_and_renumber` each run in a single transaction and either
///   fully apply or leave the store bit-for-bit unchanged.
/// - Implementations must never expose a transient duplicate position,
///   even mid-transaction, because the store enforces uniqueness eagerly.
#[async_trait]
pub trait SliderRepository: Send + Sync {
    /// Insert a new slider at the end of the ranking.
    async fn insert(&self, slider: NewSlider) -> Result<Slider, SliderRepositoryError>;

    /// Get a slider by id.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no slider with the given id exists
    async fn get_by_id(&self, id: Uuid) -> Result<Slider, SliderRepositoryError>;

    /// List sliders ordered by `(position ASC, created_at ASC)`.
    async fn list(&self, filter: SliderFilter) -> Result<Vec<Slider>, SliderRepositoryError>;

    /// List every slider id in the current ranking order.
    ///
    /// Used by the service layer to validate a full-reorder request before
    /// any transaction is opened.
    async fn list_ids(&self) -> Result<Vec<Uuid>, SliderRepositoryError>;

    /// Apply a partial update. Never touches `position`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no slider with the given id exists
    async fn update(
        &self,
        id: Uuid,
        update: SliderUpdate,
    ) -> Result<Slider, SliderRepositoryError>;

    /// Set the publish flag; `status` follows it (published/draft).
    async fn set_published(
        &self,
        id: Uuid,
        published: bool,
    ) -> Result<Slider, SliderRepositoryError>;

    /// Atomically set `position(ids[i]) = i + 1` for the whole collection.
    ///
    /// The caller must pass a permutation of the full current id set; the
    /// implementation re-checks the row count inside the transaction and
    /// returns `Conflict` on any mismatch, rolling everything back.
    async fn replace_order(&self, ids: &[Uuid]) -> Result<(), SliderRepositoryError>;

    /// Swap the slider with its nearest neighbor in the given direction.
    ///
    /// Returns the resulting position. A slider already at the extreme is a
    /// successful no-op returning its unchanged position.
    async fn move_step(
        &self,
        id: Uuid,
        direction: MoveDirection,
    ) -> Result<i64, SliderRepositoryError>;

    /// Move the slider to `target` (clamped into `[1, N]`), displacing the
    /// current occupant of that position into the vacated slot.
    ///
    /// Returns the resulting (clamped) position.
    async fn set_position(&self, id: Uuid, target: i64) -> Result<i64, SliderRepositoryError>;

    /// Delete the slider and renumber all remaining rows to `1..N-1`,
    /// preserving their prior relative order (ties broken by creation time).
    async fn delete_and_renumber(&self, id: Uuid) -> Result<(), SliderRepositoryError>;
}
