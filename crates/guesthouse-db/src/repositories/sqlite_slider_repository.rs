//! `SQLite` implementation of the slider repository.
//!
//! This module owns the transactional position logic. The `sliders` table
//! carries a unique index on `position` that `SQLite` checks eagerly, per
//! row, so no multi-row position write can assign finals directly: rows are
//! first parked in a staging band above every legitimate position
//! (`max(position) + STAGING_OFFSET`) and only then given their final
//! values. Every mutating operation here is a single transaction; an early
//! return drops the transaction and `sqlx` rolls it back.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use guesthouse_core::domain::{
    MoveDirection, NewSlider, Slider, SliderFilter, SliderStatus, SliderUpdate,
};
use guesthouse_core::ports::{SliderRepository, SliderRepositoryError};

/// Offset added to `max(position)` to form the staging band. Staged values
/// must land strictly above every legitimate position.
const STAGING_OFFSET: i64 = 100_000;

/// `SQLite` implementation of the slider repository.
pub struct SqliteSliderRepository {
    pool: SqlitePool,
}

impl SqliteSliderRepository {
    /// Create a new `SQLite` slider repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Internal row types for database queries
// ─────────────────────────────────────────────────────────────────────────────

#[derive(sqlx::FromRow)]
struct SliderRow {
    id: String,
    title: Option<String>,
    image_url: String,
    position: i64,
    is_published: bool,
    status: String,
    created_at: String,
}

const SLIDER_COLUMNS: &str = "id, title, image_url, position, is_published, status, created_at";

// ─────────────────────────────────────────────────────────────────────────────
// Helper functions
// ─────────────────────────────────────────────────────────────────────────────

/// Parse a datetime string from `SQLite` to a `DateTime<Utc>`.
fn parse_datetime(s: &str) -> DateTime<Utc> {
    // `SQLite` stores datetime as "YYYY-MM-DD HH:MM:SS" format
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|dt| Utc.from_utc_datetime(&dt))
        .unwrap_or_else(|_| Utc::now())
}

/// Convert a `SliderRow` to the domain `Slider`.
fn row_to_slider(row: SliderRow) -> Result<Slider, SliderRepositoryError> {
    let id = Uuid::parse_str(&row.id)
        .map_err(|e| SliderRepositoryError::Internal(format!("malformed slider id: {e}")))?;
    // The CHECK constraint keeps status well-formed; default defensively.
    let status = SliderStatus::parse(&row.status).unwrap_or(SliderStatus::Draft);

    Ok(Slider {
        id,
        title: row.title,
        image_url: row.image_url,
        position: row.position,
        is_published: row.is_published,
        status,
        created_at: parse_datetime(&row.created_at),
    })
}

/// Map `SQLx` errors to `SliderRepositoryError`.
///
/// A unique-index failure on `position` means two mutations raced; the
/// whole transaction is already doomed, so it surfaces as a conflict the
/// caller can retry from a fresh read.
fn map_sqlx_error(e: sqlx::Error) -> SliderRepositoryError {
    let msg = e.to_string();
    if msg.contains("UNIQUE constraint failed") && msg.contains("position") {
        return SliderRepositoryError::Conflict("slider position already taken".to_string());
    }
    SliderRepositoryError::Internal(msg)
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl SliderRepository for SqliteSliderRepository {
    async fn insert(&self, slider: NewSlider) -> Result<Slider, SliderRepositoryError> {
        let id = Uuid::new_v4();

        // Position assignment and insert share a transaction so two
        // concurrent creates cannot both claim N+1; the loser hits the
        // unique index and surfaces as a conflict.
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let (next_position,): (i64,) =
            sqlx::query_as("SELECT COALESCE(MAX(position), 0) + 1 FROM sliders")
                .fetch_one(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;

        sqlx::query(
            r#"
            INSERT INTO sliders (id, title, image_url, position, is_published)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(&slider.title)
        .bind(&slider.image_url)
        .bind(next_position)
        .bind(slider.is_published)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;

        self.get_by_id(id).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Slider, SliderRepositoryError> {
        let row = sqlx::query_as::<_, SliderRow>(&format!(
            "SELECT {SLIDER_COLUMNS} FROM sliders WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or_else(|| SliderRepositoryError::NotFound(id.to_string()))?;

        row_to_slider(row)
    }

    async fn list(&self, filter: SliderFilter) -> Result<Vec<Slider>, SliderRepositoryError> {
        let mut sql = format!("SELECT {SLIDER_COLUMNS} FROM sliders");
        let mut clauses: Vec<&str> = Vec::new();
        if filter.published.is_some() {
            clauses.push("is_published = ?");
        }
        if filter.status.is_some() {
            clauses.push("status = ?");
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY position ASC, created_at ASC");

        let mut query = sqlx::query_as::<_, SliderRow>(&sql);
        if let Some(published) = filter.published {
            query = query.bind(published);
        }
        if let Some(status) = filter.status {
            query = query.bind(status.as_str());
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.into_iter().map(row_to_slider).collect()
    }

    async fn list_ids(&self) -> Result<Vec<Uuid>, SliderRepositoryError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT id FROM sliders ORDER BY position ASC, created_at ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        rows.iter()
            .map(|(id,)| {
                Uuid::parse_str(id).map_err(|e| {
                    SliderRepositoryError::Internal(format!("malformed slider id: {e}"))
                })
            })
            .collect()
    }

    async fn update(
        &self,
        id: Uuid,
        update: SliderUpdate,
    ) -> Result<Slider, SliderRepositoryError> {
        let current = self.get_by_id(id).await?;

        let title = update.title.or(current.title);
        let image_url = update.image_url.unwrap_or(current.image_url);
        let is_published = update.is_published.unwrap_or(current.is_published);
        let status = update.status.unwrap_or(current.status);

        sqlx::query(
            r#"
            UPDATE sliders
            SET title = ?, image_url = ?, is_published = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(&title)
        .bind(&image_url)
        .bind(is_published)
        .bind(status.as_str())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        self.get_by_id(id).await
    }

    async fn set_published(
        &self,
        id: Uuid,
        published: bool,
    ) -> Result<Slider, SliderRepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE sliders
            SET is_published = ?,
                status = CASE WHEN ? THEN 'published' ELSE 'draft' END
            WHERE id = ?
            "#,
        )
        .bind(published)
        .bind(published)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(SliderRepositoryError::NotFound(id.to_string()));
        }

        self.get_by_id(id).await
    }

    async fn replace_order(&self, ids: &[Uuid]) -> Result<(), SliderRepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        // Re-check the row count inside the transaction: the service
        // validated against a snapshot that a concurrent create/delete may
        // have invalidated. A mismatch here would strand rows in the
        // staging band, so it must abort before any write.
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sliders")
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        if count != ids.len() as i64 {
            return Err(SliderRepositoryError::Conflict(format!(
                "ids length mismatch: got {}, have {count}",
                ids.len()
            )));
        }

        let (max_position,): (i64,) =
            sqlx::query_as("SELECT COALESCE(MAX(position), 0) FROM sliders")
                .fetch_one(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;

        // Park every row above the legitimate range so the per-id final
        // assignments below never collide with a not-yet-moved row.
        sqlx::query("UPDATE sliders SET position = position + ?")
            .bind(max_position + STAGING_OFFSET)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        let mut affected: u64 = 0;
        for (index, id) in ids.iter().enumerate() {
            let result = sqlx::query("UPDATE sliders SET position = ? WHERE id = ?")
                .bind(index as i64 + 1)
                .bind(id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
            affected += result.rows_affected();
        }

        if affected != ids.len() as u64 {
            return Err(SliderRepositoryError::Conflict(format!(
                "affected rows mismatch: expected {}, got {affected}",
                ids.len()
            )));
        }

        // Backstop: a duplicated id could keep the affected count right
        // while leaving some other row stranded in the staging band. No row
        // may remain above the legitimate range at commit time.
        let (stranded,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sliders WHERE position > ?")
            .bind(count)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        if stranded != 0 {
            return Err(SliderRepositoryError::Conflict(
                "reorder left rows without a final position".to_string(),
            ));
        }

        tx.commit().await.map_err(map_sqlx_error)?;

        tracing::info!(
            target: "guesthouse.sliders",
            count = ids.len(),
            "slider order replaced"
        );
        Ok(())
    }

    async fn move_step(
        &self,
        id: Uuid,
        direction: MoveDirection,
    ) -> Result<i64, SliderRepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let current: Option<(i64,)> = sqlx::query_as("SELECT position FROM sliders WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        let Some((position,)) = current else {
            return Err(SliderRepositoryError::NotFound(id.to_string()));
        };

        let neighbor_sql = match direction {
            MoveDirection::Up => {
                "SELECT id, position FROM sliders WHERE position < ? ORDER BY position DESC LIMIT 1"
            }
            MoveDirection::Down => {
                "SELECT id, position FROM sliders WHERE position > ? ORDER BY position ASC LIMIT 1"
            }
        };
        let neighbor: Option<(String, i64)> = sqlx::query_as(neighbor_sql)
            .bind(position)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        // Already at the extreme: successful no-op.
        let Some((neighbor_id, neighbor_position)) = neighbor else {
            tx.commit().await.map_err(map_sqlx_error)?;
            return Ok(position);
        };

        let (max_position,): (i64,) =
            sqlx::query_as("SELECT COALESCE(MAX(position), 0) FROM sliders")
                .fetch_one(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
        let staged = max_position + STAGING_OFFSET;

        // Unique-index-safe swap through the staging band.
        sqlx::query("UPDATE sliders SET position = ? WHERE id = ?")
            .bind(staged)
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        sqlx::query("UPDATE sliders SET position = ? WHERE id = ?")
            .bind(position)
            .bind(&neighbor_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        sqlx::query("UPDATE sliders SET position = ? WHERE id = ?")
            .bind(neighbor_position)
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;

        tracing::debug!(
            target: "guesthouse.sliders",
            id = %id,
            direction = direction.as_str(),
            from = position,
            to = neighbor_position,
            "slider swapped with neighbor"
        );
        Ok(neighbor_position)
    }

    async fn set_position(&self, id: Uuid, target: i64) -> Result<i64, SliderRepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let current: Option<(i64,)> = sqlx::query_as("SELECT position FROM sliders WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        let Some((position,)) = current else {
            return Err(SliderRepositoryError::NotFound(id.to_string()));
        };

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sliders")
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        // Out-of-range targets clamp rather than reject; see DESIGN.md.
        let target = target.clamp(1, total);
        if target == position {
            tx.commit().await.map_err(map_sqlx_error)?;
            return Ok(position);
        }

        let occupant: Option<(String,)> = sqlx::query_as("SELECT id FROM sliders WHERE position = ?")
            .bind(target)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        let (max_position,): (i64,) =
            sqlx::query_as("SELECT COALESCE(MAX(position), 0) FROM sliders")
                .fetch_one(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
        let staged = max_position + STAGING_OFFSET;

        sqlx::query("UPDATE sliders SET position = ? WHERE id = ?")
            .bind(staged)
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        if let Some((occupant_id,)) = occupant {
            sqlx::query("UPDATE sliders SET position = ? WHERE id = ?")
                .bind(position)
                .bind(&occupant_id)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
        }
        sqlx::query("UPDATE sliders SET position = ? WHERE id = ?")
            .bind(target)
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;

        tracing::debug!(
            target: "guesthouse.sliders",
            id = %id,
            from = position,
            to = target,
            "slider position set"
        );
        Ok(target)
    }

    async fn delete_and_renumber(&self, id: Uuid) -> Result<(), SliderRepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let result = sqlx::query("DELETE FROM sliders WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        if result.rows_affected() == 0 {
            return Err(SliderRepositoryError::NotFound(id.to_string()));
        }

        // Full re-derivation of the ranking: park everything in the staging
        // band (the shift preserves relative order), then assign dense
        // ranks. SQLite updates rows in rowid order, so assigning ranks
        // without the shift could transiently collide with an unmoved row.
        let (max_position,): (i64,) =
            sqlx::query_as("SELECT COALESCE(MAX(position), 0) FROM sliders")
                .fetch_one(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
        sqlx::query("UPDATE sliders SET position = position + ?")
            .bind(max_position + STAGING_OFFSET)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        sqlx::query(
            r#"
            WITH ordered AS (
                SELECT id, ROW_NUMBER() OVER (ORDER BY position ASC, created_at ASC) AS rank
                FROM sliders
            )
            UPDATE sliders
            SET position = (SELECT rank FROM ordered WHERE ordered.id = sliders.id)
            "#,
        )
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;

        tracing::info!(target: "guesthouse.sliders", id = %id, "slider deleted and ranking renumbered");
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
