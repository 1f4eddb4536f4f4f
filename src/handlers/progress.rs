//! Course progress endpoints, always scoped to the caller

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use super::extract::ApiPath;
use crate::middleware::{AuthUser, ValidatedProgress};
use crate::models::progress::{LevelHistoryResponse, ProgressReportEntry};
use crate::state::AppState;
use crate::utils::errors::Result;

/// `POST /api/progress`
pub async fn record(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedProgress(request): ValidatedProgress,
) -> Result<impl IntoResponse> {
    let entry = state
        .services
        .progress_service
        .record(caller.user_id, request)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Progress updated",
        "entry": entry,
    })))
}

/// `GET /api/progress`
pub async fn report(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<Vec<ProgressReportEntry>>> {
    let report = state.services.progress_service.report(caller.user_id).await?;
    Ok(Json(report))
}

/// `GET /api/progress/:level`
pub async fn level_history(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ApiPath(level): ApiPath<i64>,
) -> Result<Json<LevelHistoryResponse>> {
    let history = state
        .services
        .progress_service
        .level_history(caller.user_id, level)
        .await?;
    Ok(Json(history))
}
