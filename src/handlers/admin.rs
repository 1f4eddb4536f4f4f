//! Admin user management endpoints

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use super::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::AdminUser;
use crate::models::user::{BulkUserRequest, PageQuery, UserPage};
use crate::state::AppState;
use crate::utils::errors::Result;

/// `GET /api/admin/users`: applicants only
pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<UserPage>> {
    Ok(Json(state.services.admin_service.list_users(query, true).await?))
}

/// `GET /api/admin/all-users`
pub async fn list_all_users(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<UserPage>> {
    Ok(Json(state.services.admin_service.list_users(query, false).await?))
}

pub async fn approve_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<impl IntoResponse> {
    let user = state
        .services
        .admin_service
        .set_selection(admin.user_id, user_id, true)
        .await?;
    Ok(Json(json!({ "success": true, "user": user })))
}

pub async fn reject_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<impl IntoResponse> {
    let user = state
        .services
        .admin_service
        .set_selection(admin.user_id, user_id, false)
        .await?;
    Ok(Json(json!({ "success": true, "user": user })))
}

pub async fn bulk_approve_users(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiJson(request): ApiJson<BulkUserRequest>,
) -> Result<impl IntoResponse> {
    let result = state
        .services
        .admin_service
        .bulk_set_selection(admin.user_id, &request.ids, true)
        .await?;
    Ok(Json(json!({ "success": true, "modifiedCount": result.modified_count })))
}

pub async fn bulk_reject_users(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiJson(request): ApiJson<BulkUserRequest>,
) -> Result<impl IntoResponse> {
    let result = state
        .services
        .admin_service
        .bulk_set_selection(admin.user_id, &request.ids, false)
        .await?;
    Ok(Json(json!({ "success": true, "modifiedCount": result.modified_count })))
}

pub async fn toggle_whatsapp(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<impl IntoResponse> {
    let user = state
        .services
        .admin_service
        .toggle_whatsapp(admin.user_id, user_id)
        .await?;
    Ok(Json(json!({ "success": true, "user": user })))
}
