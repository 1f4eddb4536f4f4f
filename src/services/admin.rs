//! Admin user management service
//!
//! Paginated user listings, approval/rejection of applicants and the
//! WhatsApp-notified flag.

use tracing::{debug, info, warn};

use crate::database::DatabaseService;
use crate::models::registration::BulkResult;
use crate::models::user::{PageQuery, UserPage, UserSummary};
use crate::utils::errors::{Result, SksError};
use crate::utils::helpers::calculate_offset;
use crate::utils::logging::log_admin_action;

#[derive(Clone, Debug)]
pub struct AdminService {
    db: DatabaseService,
}

impl AdminService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// One page of users, optionally excluding admins
    pub async fn list_users(&self, query: PageQuery, non_admin_only: bool) -> Result<UserPage> {
        let (page, limit) = query.resolve();
        let offset = calculate_offset(page, limit);

        let users = self
            .db
            .users
            .list(i64::from(limit), offset, non_admin_only)
            .await?;
        let total = self.db.users.count(non_admin_only).await?;

        debug!(page, limit, total, non_admin_only, "Listed users");

        Ok(UserPage {
            users: users.into_iter().map(UserSummary::from).collect(),
            total,
        })
    }

    /// Approve (`selected = true`) or reject a single non-admin user
    pub async fn set_selection(&self, admin_id: i64, user_id: i64, selected: bool) -> Result<UserSummary> {
        let user = self
            .db
            .users
            .set_selection(user_id, selected)
            .await?
            .ok_or(SksError::UserNotFound)?;

        log_admin_action(
            admin_id,
            if selected { "approve_user" } else { "reject_user" },
            Some(&user_id.to_string()),
            None,
        );

        Ok(user.into())
    }

    /// Approve or reject each user in turn, counting matched non-admins
    pub async fn bulk_set_selection(&self, admin_id: i64, user_ids: &[i64], selected: bool) -> Result<BulkResult> {
        let mut modified_count = 0;

        for &user_id in user_ids {
            match self.db.users.set_selection(user_id, selected).await {
                Ok(Some(_)) => modified_count += 1,
                Ok(None) => debug!(user_id, "Skipping unknown or admin user in bulk update"),
                Err(e) => warn!(user_id, error = %e, "Bulk user update failed for item"),
            }
        }

        log_admin_action(
            admin_id,
            if selected { "bulk_approve_users" } else { "bulk_reject_users" },
            None,
            Some(&format!("{} of {} modified", modified_count, user_ids.len())),
        );

        Ok(BulkResult { modified_count })
    }

    /// Flip the WhatsApp-notified flag
    pub async fn toggle_whatsapp(&self, admin_id: i64, user_id: i64) -> Result<UserSummary> {
        let user = self
            .db
            .users
            .toggle_whatsapp(user_id)
            .await?
            .ok_or(SksError::UserNotFound)?;

        info!(admin_id, user_id, whatsapp_sent = ?user.whatsapp_sent, "WhatsApp flag toggled");
        Ok(user.into())
    }
}
