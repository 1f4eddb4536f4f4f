//! Event model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::errors::{Result, SksError};
use crate::utils::helpers::is_present;

/// Capacity policy of an event
///
/// Only decides the initial registration status. No seat count is enforced
/// for `Limited`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "event_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Limited,
    #[default]
    Unlimited,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub name: String,
    #[serde(rename = "date")]
    pub event_date: NaiveDate,
    pub description: String,
    pub venue: String,
    pub location: String,
    pub image_url: Option<String>,
    pub event_type: EventType,
    pub message_template: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub event_type: Option<EventType>,
    pub message_template: Option<String>,
}

/// Validated input for a new event
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub event_date: NaiveDate,
    pub description: String,
    pub venue: String,
    pub location: String,
    pub image_url: Option<String>,
    pub event_type: EventType,
    pub message_template: Option<String>,
}

impl CreateEventRequest {
    pub fn validate(self) -> Result<NewEvent> {
        let mut missing = Vec::new();
        for (field, value) in [
            ("name", &self.name),
            ("description", &self.description),
            ("venue", &self.venue),
            ("location", &self.location),
        ] {
            if !is_present(value) {
                missing.push(field);
            }
        }
        if self.date.is_none() {
            missing.push("date");
        }

        match (self.name, self.date, self.description, self.venue, self.location) {
            (Some(name), Some(event_date), Some(description), Some(venue), Some(location))
                if missing.is_empty() =>
            {
                Ok(NewEvent {
                    name: name.trim().to_string(),
                    event_date,
                    description,
                    venue: venue.trim().to_string(),
                    location: location.trim().to_string(),
                    image_url: self.image_url.filter(|u| !u.trim().is_empty()),
                    event_type: self.event_type.unwrap_or_default(),
                    message_template: self.message_template,
                })
            }
            _ => Err(SksError::InvalidInput(format!(
                "Missing required fields: {}",
                missing.join(", ")
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub event_type: Option<EventType>,
    pub message_template: Option<String>,
}

impl UpdateEventRequest {
    /// Reject present-but-blank required fields and trim the rest
    pub fn validate(mut self) -> Result<Self> {
        let mut blank = Vec::new();
        for (field, value) in [
            ("name", &mut self.name),
            ("description", &mut self.description),
            ("venue", &mut self.venue),
            ("location", &mut self.location),
        ] {
            if let Some(v) = value {
                if v.trim().is_empty() {
                    blank.push(field);
                } else if field != "description" {
                    *v = v.trim().to_string();
                }
            }
        }

        if !blank.is_empty() {
            return Err(SksError::InvalidInput(format!(
                "Fields cannot be blank: {}",
                blank.join(", ")
            )));
        }

        self.image_url = self.image_url.filter(|u| !u.trim().is_empty());
        Ok(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EventPage {
    pub events: Vec<Event>,
    pub total: i64,
}
