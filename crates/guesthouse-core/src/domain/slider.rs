//! Homepage slider domain types.
//!
//! A slider is one entry of the admin-curated homepage carousel. Sliders
//! carry a `position` that forms a dense ranking 1..N across the whole
//! collection; every position mutation goes through the repository port so
//! the ranking never develops gaps or duplicates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Editorial state of a slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliderStatus {
    Draft,
    Review,
    Published,
}

impl SliderStatus {
    /// Stable string form used in the database and over the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            SliderStatus::Draft => "draft",
            SliderStatus::Review => "review",
            SliderStatus::Published => "published",
        }
    }

    /// Parse the stable string form. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(SliderStatus::Draft),
            "review" => Some(SliderStatus::Review),
            "published" => Some(SliderStatus::Published),
            _ => None,
        }
    }
}

/// Direction for a single-step position move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// Toward position 1.
    Up,
    /// Toward position N.
    Down,
}

impl MoveDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            MoveDirection::Up => "up",
            MoveDirection::Down => "down",
        }
    }

    /// Parse `"up"` / `"down"`. Anything else yields `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "up" => Some(MoveDirection::Up),
            "down" => Some(MoveDirection::Down),
            _ => None,
        }
    }
}

/// A persisted slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slider {
    pub id: Uuid,
    pub title: Option<String>,
    pub image_url: String,
    /// Dense rank in 1..N, unique across all sliders.
    pub position: i64,
    pub is_published: bool,
    pub status: SliderStatus,
    pub created_at: DateTime<Utc>,
}

/// Data for creating a slider. The position is assigned by the store
/// (appended at the end of the current ranking).
#[derive(Debug, Clone)]
pub struct NewSlider {
    pub title: Option<String>,
    pub image_url: String,
    pub is_published: bool,
}

impl NewSlider {
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            title: None,
            image_url: image_url.into(),
            is_published: false,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn published(mut self) -> Self {
        self.is_published = true;
        self
    }
}

/// Partial update for a slider. `None` fields are left untouched.
///
/// `position` is deliberately absent: position changes go through the
/// dedicated reorder/move operations so the dense ranking stays intact.
#[derive(Debug, Clone, Default)]
pub struct SliderUpdate {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub is_published: Option<bool>,
    pub status: Option<SliderStatus>,
}

/// Optional filters for listing sliders.
#[derive(Debug, Clone, Copy, Default)]
pub struct SliderFilter {
    pub published: Option<bool>,
    pub status: Option<SliderStatus>,
}

/// Result of a position mutation: the slider and where it ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SliderPosition {
    pub id: Uuid,
    pub position: i64,
}
