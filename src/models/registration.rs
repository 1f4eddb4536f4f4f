//! Event registration model
//!
//! A registration is a user's application to attend one event. It starts
//! `pending` or `approved` depending on the event's type, may be moved
//! between approved and rejected by an admin, and can be marked attended
//! exactly once while approved.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use super::event::EventType;
use crate::utils::errors::{Result, SksError};
use crate::utils::helpers::{display_or_placeholder, full_name, is_present, PLACEHOLDER};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "registration_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
}

impl RegistrationStatus {
    /// Status a new registration starts in
    pub fn initial_for(event_type: EventType) -> Self {
        match event_type {
            EventType::Unlimited => RegistrationStatus::Approved,
            EventType::Limited => RegistrationStatus::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Approved => "approved",
            RegistrationStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[serde(skip)]
    pub id: i64,
    pub registration_id: String,
    #[serde(skip)]
    pub user_id: i64,
    pub event_id: i64,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub full_name: String,
    pub mobile: String,
    pub gender: String,
    pub age: i32,
    pub profession: Option<String>,
    pub address: String,
    pub sks_level: String,
    pub sks_miracle: String,
    pub other_details: Option<String>,
    pub for_whom: String,
    pub status: RegistrationStatus,
    pub attended: bool,
    pub attended_at: Option<DateTime<Utc>>,
    pub date_registered: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Registration {
    /// Check that this registration may be marked attended
    pub fn check_can_attend(&self) -> Result<()> {
        if self.status != RegistrationStatus::Approved {
            return Err(SksError::InvalidInput(format!(
                "Registration must be approved before marking attendance (current status: {})",
                self.status
            )));
        }

        if self.attended {
            return Err(SksError::InvalidInput(
                "Attendance already marked for this registration".to_string(),
            ));
        }

        Ok(())
    }
}

/// Entry in a user's attended-events list, unique per event
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub user_id: i64,
    pub event_id: i64,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub registration_id: String,
    pub attended_at: DateTime<Utc>,
}

/// Registration joined with its owning user
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationWithOwner {
    #[sqlx(flatten)]
    pub registration: Registration,
    pub owner_mobile: String,
    pub owner_first_name: Option<String>,
    pub owner_last_name: Option<String>,
}

/// Body of `POST /event-registrations`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegistrationRequest {
    pub event_id: Option<Value>,
    pub full_name: Option<String>,
    pub mobile: Option<String>,
    pub gender: Option<String>,
    pub age: Option<Value>,
    pub profession: Option<String>,
    pub address: Option<String>,
    pub sks_level: Option<String>,
    pub sks_miracle: Option<String>,
    pub other_details: Option<String>,
    pub for_whom: Option<String>,
}

/// Validated registrant input
#[derive(Debug, Clone, PartialEq)]
pub struct NewRegistration {
    pub event_id: i64,
    pub full_name: String,
    pub mobile: String,
    pub gender: String,
    pub age: i32,
    pub profession: Option<String>,
    pub address: String,
    pub sks_level: String,
    pub sks_miracle: String,
    pub other_details: Option<String>,
    pub for_whom: String,
}

/// Accept a JSON number or numeric string
fn integer_field(value: &Option<Value>) -> Option<Option<i64>> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => Some(n.as_i64()),
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(s.trim().parse().ok()),
        Some(_) => Some(None),
    }
}

fn required(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

fn optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl CreateRegistrationRequest {
    /// Check required fields and normalize the input
    pub fn validate(self) -> Result<NewRegistration> {
        let event_id = integer_field(&self.event_id);
        let age = integer_field(&self.age);

        let mut missing = Vec::new();
        if event_id.is_none() {
            missing.push("eventId");
        }
        for (field, value) in [
            ("fullName", &self.full_name),
            ("mobile", &self.mobile),
            ("gender", &self.gender),
            ("address", &self.address),
            ("sksLevel", &self.sks_level),
            ("sksMiracle", &self.sks_miracle),
            ("forWhom", &self.for_whom),
        ] {
            if !is_present(value) {
                missing.push(field);
            }
        }
        if age.is_none() {
            missing.push("age");
        }

        if !missing.is_empty() {
            return Err(SksError::InvalidInput(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let event_id = event_id
            .flatten()
            .ok_or_else(|| SksError::InvalidInput("eventId must be a number".to_string()))?;
        let age = age
            .flatten()
            .and_then(|a| i32::try_from(a).ok())
            .filter(|a| *a >= 0)
            .ok_or_else(|| SksError::InvalidInput("age must be a non-negative number".to_string()))?;

        Ok(NewRegistration {
            event_id,
            full_name: required(self.full_name),
            mobile: required(self.mobile),
            gender: required(self.gender),
            age,
            profession: optional(self.profession),
            address: required(self.address),
            sks_level: required(self.sks_level),
            sks_miracle: required(self.sks_miracle),
            other_details: optional(self.other_details),
            for_whom: required(self.for_whom),
        })
    }
}

/// Flattened registration for listings
///
/// Display fields never carry null: missing or blank values become `"-"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationView {
    pub registration_id: String,
    pub event_id: i64,
    pub event_name: String,
    pub event_date: String,
    pub full_name: String,
    pub mobile: String,
    pub gender: String,
    pub age: String,
    pub profession: String,
    pub address: String,
    pub sks_level: String,
    pub sks_miracle: String,
    pub other_details: String,
    pub for_whom: String,
    pub status: RegistrationStatus,
    pub attended: bool,
    pub attended_at: String,
    pub date_registered: String,
    pub user_id: i64,
    pub user_name: String,
    pub user_mobile: String,
}

impl RegistrationView {
    pub fn new(
        registration: Registration,
        owner_mobile: &str,
        owner_first_name: Option<&str>,
        owner_last_name: Option<&str>,
    ) -> Self {
        let owner_name = full_name(owner_first_name, owner_last_name);

        Self {
            registration_id: registration.registration_id,
            event_id: registration.event_id,
            event_name: display_or_placeholder(Some(&registration.event_name)),
            event_date: registration.event_date.to_string(),
            full_name: display_or_placeholder(Some(&registration.full_name)),
            mobile: display_or_placeholder(Some(&registration.mobile)),
            gender: display_or_placeholder(Some(&registration.gender)),
            age: registration.age.to_string(),
            profession: display_or_placeholder(registration.profession.as_deref()),
            address: display_or_placeholder(Some(&registration.address)),
            sks_level: display_or_placeholder(Some(&registration.sks_level)),
            sks_miracle: display_or_placeholder(Some(&registration.sks_miracle)),
            other_details: display_or_placeholder(registration.other_details.as_deref()),
            for_whom: display_or_placeholder(Some(&registration.for_whom)),
            status: registration.status,
            attended: registration.attended,
            attended_at: registration
                .attended_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            date_registered: registration.date_registered.to_rfc3339(),
            user_id: registration.user_id,
            user_name: display_or_placeholder(owner_name.as_deref()),
            user_mobile: display_or_placeholder(Some(owner_mobile)),
        }
    }
}

impl From<RegistrationWithOwner> for RegistrationView {
    fn from(row: RegistrationWithOwner) -> Self {
        RegistrationView::new(
            row.registration,
            &row.owner_mobile,
            row.owner_first_name.as_deref(),
            row.owner_last_name.as_deref(),
        )
    }
}

/// Body of the bulk registration endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct BulkRegistrationRequest {
    #[serde(alias = "registrationIds")]
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BulkResult {
    pub modified_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    pub(crate) fn registration(status: RegistrationStatus, attended: bool) -> Registration {
        Registration {
            id: 1,
            registration_id: "SKS-010125-000042".to_string(),
            user_id: 7,
            event_id: 3,
            event_name: "Satsang".to_string(),
            event_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            full_name: "Asha Patil".to_string(),
            mobile: "9999999999".to_string(),
            gender: "female".to_string(),
            age: 34,
            profession: None,
            address: "Pune".to_string(),
            sks_level: "2".to_string(),
            sks_miracle: "yes".to_string(),
            other_details: Some("   ".to_string()),
            for_whom: "self".to_string(),
            status,
            attended,
            attended_at: None,
            date_registered: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn valid_request() -> CreateRegistrationRequest {
        serde_json::from_value(json!({
            "eventId": 3,
            "fullName": "Asha Patil",
            "mobile": "9999999999",
            "gender": "female",
            "age": "34",
            "address": "Pune",
            "sksLevel": "2",
            "sksMiracle": "yes",
            "forWhom": "self"
        }))
        .unwrap()
    }

    #[test]
    fn test_initial_status_follows_event_type() {
        assert_eq!(
            RegistrationStatus::initial_for(EventType::Unlimited),
            RegistrationStatus::Approved
        );
        assert_eq!(
            RegistrationStatus::initial_for(EventType::Limited),
            RegistrationStatus::Pending
        );
    }

    #[test]
    fn test_valid_request_normalized() {
        let new = valid_request().validate().unwrap();
        assert_eq!(new.event_id, 3);
        assert_eq!(new.age, 34);
        assert_eq!(new.profession, None);
    }

    #[test]
    fn test_blank_required_field_rejected() {
        let mut req = valid_request();
        req.address = Some("   ".to_string());
        req.for_whom = None;
        assert_matches!(
            req.validate(),
            Err(SksError::InvalidInput(msg)) if msg.contains("address") && msg.contains("forWhom")
        );
    }

    #[test]
    fn test_non_numeric_age_rejected() {
        let mut req = valid_request();
        req.age = Some(json!("thirty"));
        assert_matches!(req.validate(), Err(SksError::InvalidInput(msg)) if msg.contains("age"));
    }

    #[test]
    fn test_attendance_preconditions() {
        assert!(registration(RegistrationStatus::Approved, false).check_can_attend().is_ok());

        assert_matches!(
            registration(RegistrationStatus::Pending, false).check_can_attend(),
            Err(SksError::InvalidInput(msg)) if msg.contains("approved")
        );
        assert_matches!(
            registration(RegistrationStatus::Approved, true).check_can_attend(),
            Err(SksError::InvalidInput(msg)) if msg.contains("already")
        );
    }

    #[test]
    fn test_view_uses_placeholders() {
        let view = RegistrationView::new(
            registration(RegistrationStatus::Pending, false),
            "9999999999",
            None,
            Some(""),
        );

        assert_eq!(view.profession, "-");
        assert_eq!(view.other_details, "-");
        assert_eq!(view.attended_at, "-");
        assert_eq!(view.user_name, "-");
        assert_eq!(view.user_mobile, "9999999999");
        assert!(!view.attended);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], json!("pending"));
        assert_eq!(json["attended"], json!(false));
        assert!(json.as_object().unwrap().values().all(|v| !v.is_null()));
    }

    #[test]
    fn test_bulk_request_accepts_alias() {
        let req: BulkRegistrationRequest =
            serde_json::from_value(json!({ "registrationIds": ["SKS-010125-000001"] })).unwrap();
        assert_eq!(req.ids.len(), 1);
    }
}
