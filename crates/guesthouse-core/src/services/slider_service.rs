//! Slider service - input validation and orchestration over the repository.
//!
//! All request validation that does not need transaction context happens
//! here, before any transaction is opened: a rejected call leaves the store
//! untouched by construction. Conflicts that can only be detected inside a
//! transaction (affected-row mismatches, unique-index races) come back from
//! the repository as `SliderRepositoryError::Conflict`.

use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{
    MoveDirection, NewSlider, Slider, SliderFilter, SliderPosition, SliderUpdate,
};
use crate::ports::{SliderRepository, SliderRepositoryError};

/// Service-level errors for slider operations.
#[derive(Debug, thiserror::Error)]
pub enum SliderServiceError {
    /// Malformed or inconsistent input, rejected before any transaction.
    #[error("{0}")]
    Validation(String),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] SliderRepositoryError),
}

/// Service for managing the homepage slider collection.
pub struct SliderService {
    repo: Arc<dyn SliderRepository>,
}

impl SliderService {
    pub fn new(repo: Arc<dyn SliderRepository>) -> Self {
        Self { repo }
    }

    /// List sliders in ranking order, optionally filtered.
    pub async fn list(&self, filter: SliderFilter) -> Result<Vec<Slider>, SliderServiceError> {
        Ok(self.repo.list(filter).await?)
    }

    /// Create a slider, appended at the end of the ranking.
    pub async fn create(&self, slider: NewSlider) -> Result<Slider, SliderServiceError> {
        if slider.image_url.trim().is_empty() {
            return Err(SliderServiceError::Validation(
                "image_url is required".to_string(),
            ));
        }
        let created = self.repo.insert(slider).await?;
        tracing::info!(
            target: "guesthouse.sliders",
            id = %created.id,
            position = created.position,
            "slider created"
        );
        Ok(created)
    }

    /// Apply a partial update (title, image, publish flag, status).
    pub async fn update(
        &self,
        id: Uuid,
        update: SliderUpdate,
    ) -> Result<Slider, SliderServiceError> {
        Ok(self.repo.update(id, update).await?)
    }

    /// Toggle the publish flag; editorial status follows it.
    pub async fn set_published(
        &self,
        id: Uuid,
        published: bool,
    ) -> Result<Slider, SliderServiceError> {
        let slider = self.repo.set_published(id, published).await?;
        tracing::info!(
            target: "guesthouse.sliders",
            id = %id,
            published,
            "slider publish flag changed"
        );
        Ok(slider)
    }

    /// Replace the whole ranking with the supplied permutation.
    ///
    /// `ids` must contain every existing slider id exactly once. Each of
    /// the distinct failure modes is reported separately and none of them
    /// changes the store.
    pub async fn replace_order(&self, ids: &[Uuid]) -> Result<(), SliderServiceError> {
        if ids.is_empty() {
            return Err(SliderServiceError::Validation(
                "ids must be a non-empty array".to_string(),
            ));
        }

        let unique: HashSet<&Uuid> = ids.iter().collect();
        if unique.len() != ids.len() {
            return Err(SliderServiceError::Validation(
                "ids must be unique".to_string(),
            ));
        }

        let current = self.repo.list_ids().await?;
        let known: HashSet<&Uuid> = current.iter().collect();
        if let Some(unknown) = ids.iter().find(|id| !known.contains(id)) {
            return Err(SliderServiceError::Validation(format!(
                "unknown slider id: {unknown}"
            )));
        }
        if ids.len() != current.len() {
            return Err(SliderServiceError::Validation(format!(
                "ids length mismatch: got {}, have {}",
                ids.len(),
                current.len()
            )));
        }

        self.repo.replace_order(ids).await?;
        tracing::info!(target: "guesthouse.sliders", count = ids.len(), "full reorder applied");
        Ok(())
    }

    /// Swap the slider with its neighbor in the given direction.
    pub async fn move_step(
        &self,
        id: Uuid,
        direction: MoveDirection,
    ) -> Result<SliderPosition, SliderServiceError> {
        let position = self.repo.move_step(id, direction).await?;
        tracing::debug!(
            target: "guesthouse.sliders",
            id = %id,
            direction = direction.as_str(),
            position,
            "slider moved one step"
        );
        Ok(SliderPosition { id, position })
    }

    /// Move the slider to an explicit position, clamped into `[1, N]`.
    ///
    /// Non-positive targets are rejected here; targets above N are clamped
    /// by the repository (intentional policy, not an error).
    pub async fn set_position(
        &self,
        id: Uuid,
        target: i64,
    ) -> Result<SliderPosition, SliderServiceError> {
        if target < 1 {
            return Err(SliderServiceError::Validation(
                "position must be a positive integer".to_string(),
            ));
        }
        let position = self.repo.set_position(id, target).await?;
        tracing::debug!(
            target: "guesthouse.sliders",
            id = %id,
            requested = target,
            position,
            "slider position set"
        );
        Ok(SliderPosition { id, position })
    }

    /// Delete the slider and close the gap in the ranking.
    pub async fn delete(&self, id: Uuid) -> Result<(), SliderServiceError> {
        self.repo.delete_and_renumber(id).await?;
        tracing::info!(target: "guesthouse.sliders", id = %id, "slider deleted, ranking renumbered");
        Ok(())
    }
}
