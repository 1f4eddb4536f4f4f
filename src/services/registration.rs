//! Registration service implementation
//!
//! This service drives the registration lifecycle: creation against an
//! existing event and user, admin listings, status changes, attendance and
//! bulk moderation.

use tracing::{debug, info, warn};

use crate::database::DatabaseService;
use crate::models::registration::{
    BulkResult, CreateRegistrationRequest, Registration, RegistrationStatus, RegistrationView,
};
use crate::utils::errors::{Result, SksError};
use crate::utils::helpers::is_registration_id;
use crate::utils::logging::log_registration_action;

/// Registration service for managing event registrations
#[derive(Clone, Debug)]
pub struct RegistrationService {
    db: DatabaseService,
}

impl RegistrationService {
    /// Create a new RegistrationService instance
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// Register an existing user (looked up by mobile) for an event
    pub async fn create(&self, request: CreateRegistrationRequest) -> Result<Registration> {
        let registration = request.validate()?;

        let event = self
            .db
            .events
            .find_by_id(registration.event_id)
            .await?
            .ok_or(SksError::EventNotFound {
                event_id: registration.event_id,
            })?;

        let user = self
            .db
            .users
            .find_by_mobile(&registration.mobile)
            .await?
            .ok_or(SksError::UserNotFound)?;

        let status = RegistrationStatus::initial_for(event.event_type);
        let created = self
            .db
            .registrations
            .create(user.id, &registration, &event, status)
            .await?;

        info!(
            registration_id = %created.registration_id,
            user_id = user.id,
            event_id = event.id,
            status = %created.status,
            "Registration created"
        );

        Ok(created)
    }

    /// Every registration, flattened and normalized for display
    pub async fn list_all(&self) -> Result<Vec<RegistrationView>> {
        let rows = self.db.registrations.list_with_owner().await?;
        Ok(rows.into_iter().map(RegistrationView::from).collect())
    }

    /// Registrations of the user owning `mobile`; empty when there is none
    pub async fn list_by_mobile(&self, mobile: &str) -> Result<Vec<RegistrationView>> {
        let Some(user) = self.db.users.find_by_mobile(mobile.trim()).await? else {
            debug!(mobile = mobile, "No user for mobile, returning no registrations");
            return Ok(Vec::new());
        };

        let registrations = self.db.registrations.list_for_user(user.id).await?;
        Ok(registrations
            .into_iter()
            .map(|r| {
                RegistrationView::new(
                    r,
                    &user.mobile,
                    user.first_name.as_deref(),
                    user.last_name.as_deref(),
                )
            })
            .collect())
    }

    /// Set status to approved
    pub async fn approve(&self, registration_id: &str) -> Result<Registration> {
        self.set_status(registration_id, RegistrationStatus::Approved).await
    }

    /// Set status to rejected
    pub async fn reject(&self, registration_id: &str) -> Result<Registration> {
        self.set_status(registration_id, RegistrationStatus::Rejected).await
    }

    /// Overwrite the status; repeated or reversed calls are allowed
    pub async fn set_status(&self, registration_id: &str, status: RegistrationStatus) -> Result<Registration> {
        let not_found = || SksError::RegistrationNotFound {
            registration_id: registration_id.to_string(),
        };

        if !is_registration_id(registration_id) {
            return Err(not_found());
        }

        let registration = self
            .db
            .registrations
            .set_status(registration_id, status)
            .await?
            .ok_or_else(not_found)?;

        log_registration_action(registration_id, status.as_str(), None);
        Ok(registration)
    }

    /// Mark an approved, not yet attended registration as attended
    pub async fn mark_attended(&self, registration_id: &str) -> Result<Registration> {
        if !is_registration_id(registration_id) {
            return Err(SksError::RegistrationNotFound {
                registration_id: registration_id.to_string(),
            });
        }

        let registration = self.db.registrations.mark_attended(registration_id).await?;
        log_registration_action(registration_id, "attended", Some(&registration.event_name));
        Ok(registration)
    }

    /// Apply a status to each ID in turn, counting the ones that existed
    ///
    /// Unknown IDs are skipped. A failure on one item is logged and does not
    /// stop the batch or undo earlier items.
    pub async fn bulk_set_status(&self, ids: &[String], status: RegistrationStatus) -> Result<BulkResult> {
        let mut modified_count = 0;

        for id in ids {
            match self.set_status(id, status).await {
                Ok(_) => modified_count += 1,
                Err(SksError::RegistrationNotFound { .. }) => {
                    debug!(registration_id = %id, "Skipping unknown registration in bulk update");
                }
                Err(e) => {
                    warn!(registration_id = %id, error = %e, "Bulk registration update failed for item");
                }
            }
        }

        info!(
            requested = ids.len(),
            modified_count,
            status = %status,
            "Bulk registration update finished"
        );

        Ok(BulkResult { modified_count })
    }
}
