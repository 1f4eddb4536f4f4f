//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::helpers::full_name;

/// Default page for admin listings
pub const DEFAULT_PAGE: u32 = 1;
/// Default page size for admin listings
pub const DEFAULT_LIMIT: u32 = 5;
const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub mobile: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub is_admin: bool,
    pub is_selected: bool,
    pub is_rejected: bool,
    /// Older rows may carry NULL here.
    pub whatsapp_sent: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn display_name(&self) -> Option<String> {
        full_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub mobile: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub is_admin: bool,
}

/// User as returned by the admin API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub mobile: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub is_admin: bool,
    pub is_selected: bool,
    pub is_rejected: bool,
    pub whatsapp_sent: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        let name = user.display_name();
        Self {
            id: user.id,
            mobile: user.mobile,
            first_name: user.first_name,
            last_name: user.last_name,
            name,
            email: user.email,
            is_admin: user.is_admin,
            is_selected: user.is_selected,
            is_rejected: user.is_rejected,
            whatsapp_sent: user.whatsapp_sent.unwrap_or(false),
            created_at: user.created_at,
        }
    }
}

/// `page` / `limit` query parameters
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageQuery {
    /// Resolve to a concrete (page, limit), applying defaults
    pub fn resolve(self) -> (u32, u32) {
        let page = self.page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE);
        let limit = self
            .limit
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);
        (page, limit)
    }
}

/// Body of the bulk user endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct BulkUserRequest {
    #[serde(alias = "userIds")]
    pub ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserPage {
    pub users: Vec<UserSummary>,
    pub total: i64,
}
