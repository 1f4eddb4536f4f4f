//! Event catalog service

use crate::database::DatabaseService;
use crate::models::event::{CreateEventRequest, Event, EventPage, UpdateEventRequest};
use crate::models::user::PageQuery;
use crate::utils::errors::{Result, SksError};
use crate::utils::helpers::calculate_offset;
use crate::utils::logging::log_event_action;

#[derive(Clone, Debug)]
pub struct EventService {
    db: DatabaseService,
}

impl EventService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// All events, or one page when `page` or `limit` is given
    pub async fn list(&self, query: PageQuery) -> Result<EventPage> {
        let (limit, offset) = if query.page.is_some() || query.limit.is_some() {
            let (page, limit) = query.resolve();
            (Some(i64::from(limit)), calculate_offset(page, limit))
        } else {
            (None, 0)
        };

        let events = self.db.events.list(limit, offset).await?;
        let total = self.db.events.count().await?;

        Ok(EventPage { events, total })
    }

    pub async fn get(&self, event_id: i64) -> Result<Event> {
        self.db
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(SksError::EventNotFound { event_id })
    }

    pub async fn create(&self, admin_id: i64, request: CreateEventRequest) -> Result<Event> {
        let event = self.db.events.create(request.validate()?).await?;
        log_event_action(event.id, "create", admin_id);
        Ok(event)
    }

    pub async fn update(&self, admin_id: i64, event_id: i64, request: UpdateEventRequest) -> Result<Event> {
        let event = self
            .db
            .events
            .update(event_id, request.validate()?)
            .await?
            .ok_or(SksError::EventNotFound { event_id })?;

        log_event_action(event_id, "update", admin_id);
        Ok(event)
    }

    pub async fn delete(&self, admin_id: i64, event_id: i64) -> Result<()> {
        if !self.db.events.delete(event_id).await? {
            return Err(SksError::EventNotFound { event_id });
        }

        log_event_action(event_id, "delete", admin_id);
        Ok(())
    }
}
