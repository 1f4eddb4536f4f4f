//! Event catalog endpoints
//!
//! Reads are public; changes need an admin.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use super::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::AdminUser;
use crate::models::event::{CreateEventRequest, Event, EventPage, UpdateEventRequest};
use crate::models::user::PageQuery;
use crate::state::AppState;
use crate::utils::errors::Result;

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<EventPage>> {
    Ok(Json(state.services.event_service.list(query).await?))
}

pub async fn get(
    State(state): State<AppState>,
    ApiPath(event_id): ApiPath<i64>,
) -> Result<Json<Event>> {
    Ok(Json(state.services.event_service.get(event_id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiJson(request): ApiJson<CreateEventRequest>,
) -> Result<impl IntoResponse> {
    let event = state
        .services
        .event_service
        .create(admin.user_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn update(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiPath(event_id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateEventRequest>,
) -> Result<Json<Event>> {
    let event = state
        .services
        .event_service
        .update(admin.user_id, event_id, request)
        .await?;
    Ok(Json(event))
}

pub async fn delete(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiPath(event_id): ApiPath<i64>,
) -> Result<impl IntoResponse> {
    state
        .services
        .event_service
        .delete(admin.user_id, event_id)
        .await?;

    Ok(Json(json!({ "success": true, "message": "Event deleted" })))
}
