//! Slider handlers - CRUD plus the position management endpoints.
//!
//! Input validation that must answer 400 is done here by hand rather than
//! left to extractor rejections: the reorder body shape, the move
//! direction, the publish flag, and the update-position payload.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::HttpError;
use crate::state::AppState;
use guesthouse_core::{
    MoveDirection, NewSlider, Slider, SliderFilter, SliderPosition, SliderStatus, SliderUpdate,
};

/// Query parameters for the public listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub published: Option<String>,
    pub status: Option<String>,
}

/// Parse the `published` query value. Unrecognized values mean "no filter".
fn parse_published(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

impl ListQuery {
    fn into_filter(self) -> SliderFilter {
        SliderFilter {
            published: self.published.as_deref().and_then(parse_published),
            status: self
                .status
                .as_deref()
                .and_then(|s| SliderStatus::parse(&s.to_lowercase())),
        }
    }
}

/// List sliders in ranking order.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Slider>>, HttpError> {
    Ok(Json(state.sliders.list(query.into_filter()).await?))
}

/// Request to create a slider.
#[derive(Debug, Deserialize)]
pub struct CreateSliderRequest {
    pub title: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

/// Create a slider, appended at the end of the ranking.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateSliderRequest>,
) -> Result<(StatusCode, Json<Slider>), HttpError> {
    let Some(image_url) = req.image_url.filter(|u| !u.trim().is_empty()) else {
        return Err(HttpError::BadRequest("image_url is required".to_string()));
    };

    let slider = state
        .sliders
        .create(NewSlider {
            title: req.title,
            image_url,
            is_published: req.is_published,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(slider)))
}

/// Request for a partial update. Absent fields are left untouched;
/// unknown `status` values are ignored rather than rejected.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSliderRequest {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub is_published: Option<bool>,
    pub status: Option<String>,
}

/// Partially update a slider. Never touches `position`.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateSliderRequest>,
) -> Result<Json<Slider>, HttpError> {
    let update = SliderUpdate {
        title: req.title,
        image_url: req.image_url,
        is_published: req.is_published,
        status: req.status.as_deref().and_then(SliderStatus::parse),
    };
    Ok(Json(state.sliders.update(id, update).await?))
}

/// Request to toggle the publish flag.
#[derive(Debug, Deserialize)]
pub struct PublishRequest {
    pub is_published: Option<bool>,
}

/// Set the publish flag; editorial status follows it.
pub async fn publish(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<PublishRequest>,
) -> Result<Json<Slider>, HttpError> {
    let Some(is_published) = req.is_published else {
        return Err(HttpError::BadRequest("is_published required".to_string()));
    };
    Ok(Json(state.sliders.set_published(id, is_published).await?))
}

/// Replace the whole ranking: body is `{ "ids": [uuid, ...] }` holding a
/// permutation of every existing slider id.
///
/// The body is taken as a raw JSON value so shape problems (missing key,
/// non-array, non-uuid entries) come back as 400s with a useful message.
pub async fn reorder(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<StatusCode, HttpError> {
    let Some(raw_ids) = body.get("ids").and_then(|v| v.as_array()) else {
        return Err(HttpError::BadRequest(
            "ids must be a non-empty array".to_string(),
        ));
    };
    if raw_ids.is_empty() {
        return Err(HttpError::BadRequest(
            "ids must be a non-empty array".to_string(),
        ));
    }

    let mut ids = Vec::with_capacity(raw_ids.len());
    for (index, value) in raw_ids.iter().enumerate() {
        let id = value
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or_else(|| HttpError::BadRequest(format!("invalid id at index {index}")))?;
        ids.push(id);
    }

    state.sliders.replace_order(&ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Request to move a slider one step.
#[derive(Debug, Default, Deserialize)]
pub struct MoveRequest {
    pub direction: Option<String>,
}

/// Swap a slider with its neighbor in the requested direction.
///
/// A slider already at the extreme reports success with its unchanged
/// position.
pub async fn move_step(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<SliderPosition>, HttpError> {
    let direction = req
        .direction
        .as_deref()
        .and_then(MoveDirection::parse)
        .ok_or_else(|| HttpError::BadRequest("direction must be up|down".to_string()))?;

    Ok(Json(state.sliders.move_step(id, direction).await?))
}

/// Request to set an explicit position.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePositionRequest {
    pub position: Option<i64>,
}

/// Move a slider to an explicit position, displacing the occupant.
///
/// Targets above the collection size clamp to the end; missing or
/// non-positive values are a 400.
pub async fn update_position(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePositionRequest>,
) -> Result<Json<SliderPosition>, HttpError> {
    let Some(position) = req.position else {
        return Err(HttpError::BadRequest(
            "position must be a positive integer".to_string(),
        ));
    };
    Ok(Json(state.sliders.set_position(id, position).await?))
}

/// Delete a slider; the remaining ranking is renumbered to close the gap.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpError> {
    state.sliders.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
