//! Event registration endpoints

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use super::extract::{ApiJson, ApiPath};
use crate::middleware::AdminUser;
use crate::models::registration::{
    BulkRegistrationRequest, CreateRegistrationRequest, RegistrationStatus, RegistrationView,
};
use crate::state::AppState;
use crate::utils::errors::Result;

/// `POST /api/event-registrations`, open to signed-up users without a token
pub async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateRegistrationRequest>,
) -> Result<impl IntoResponse> {
    let registration = state.services.registration_service.create(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Registration successful",
            "registrationId": registration.registration_id,
            "status": registration.status,
            "registration": registration,
        })),
    ))
}

/// `GET /api/event-registrations`
pub async fn list_all(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<Vec<RegistrationView>>> {
    let registrations = state.services.registration_service.list_all().await?;
    Ok(Json(registrations))
}

/// `GET /api/event-registrations/user/:mobile`
pub async fn list_by_mobile(
    State(state): State<AppState>,
    ApiPath(mobile): ApiPath<String>,
) -> Result<Json<Vec<RegistrationView>>> {
    let registrations = state
        .services
        .registration_service
        .list_by_mobile(&mobile)
        .await?;
    Ok(Json(registrations))
}

pub async fn approve(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiPath(registration_id): ApiPath<String>,
) -> Result<impl IntoResponse> {
    let registration = state
        .services
        .registration_service
        .approve(&registration_id)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Registration approved",
        "registration": registration,
    })))
}

pub async fn reject(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiPath(registration_id): ApiPath<String>,
) -> Result<impl IntoResponse> {
    let registration = state
        .services
        .registration_service
        .reject(&registration_id)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Registration rejected",
        "registration": registration,
    })))
}

pub async fn attend(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiPath(registration_id): ApiPath<String>,
) -> Result<impl IntoResponse> {
    let registration = state
        .services
        .registration_service
        .mark_attended(&registration_id)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Attendance marked",
        "registration": registration,
    })))
}

pub async fn bulk_approve(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiJson(request): ApiJson<BulkRegistrationRequest>,
) -> Result<impl IntoResponse> {
    bulk(state, request, RegistrationStatus::Approved).await
}

pub async fn bulk_reject(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiJson(request): ApiJson<BulkRegistrationRequest>,
) -> Result<impl IntoResponse> {
    bulk(state, request, RegistrationStatus::Rejected).await
}

async fn bulk(
    state: AppState,
    request: BulkRegistrationRequest,
    status: RegistrationStatus,
) -> Result<Json<serde_json::Value>> {
    let result = state
        .services
        .registration_service
        .bulk_set_status(&request.ids, status)
        .await?;

    Ok(Json(json!({
        "success": true,
        "modifiedCount": result.modified_count,
    })))
}
