//! Event repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::event::{Event, NewEvent, UpdateEventRequest};
use crate::utils::errors::SksError;

const EVENT_COLUMNS: &str = "id, name, event_date, description, venue, location, image_url, event_type, message_template, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event
    pub async fn create(&self, event: NewEvent) -> Result<Event, SksError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (name, event_date, description, venue, location, image_url, event_type, message_template, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(event.name)
        .bind(event.event_date)
        .bind(event.description)
        .bind(event.venue)
        .bind(event.location)
        .bind(event.image_url)
        .bind(event.event_type)
        .bind(event.message_template)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>, SksError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Update the provided fields of an event
    pub async fn update(&self, id: i64, request: UpdateEventRequest) -> Result<Option<Event>, SksError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET name = COALESCE($2, name),
                event_date = COALESCE($3, event_date),
                description = COALESCE($4, description),
                venue = COALESCE($5, venue),
                location = COALESCE($6, location),
                image_url = COALESCE($7, image_url),
                event_type = COALESCE($8, event_type),
                message_template = COALESCE($9, message_template),
                updated_at = $10
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.name)
        .bind(request.date)
        .bind(request.description)
        .bind(request.venue)
        .bind(request.location)
        .bind(request.image_url)
        .bind(request.event_type)
        .bind(request.message_template)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Delete event, returning whether it existed
    pub async fn delete(&self, id: i64) -> Result<bool, SksError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List events, most recent date first; `limit = None` returns all
    pub async fn list(&self, limit: Option<i64>, offset: i64) -> Result<Vec<Event>, SksError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY event_date DESC, id DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Count total events
    pub async fn count(&self) -> Result<i64, SksError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
