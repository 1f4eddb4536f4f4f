//! Liveness and database health

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;
use crate::utils::errors::Result;
use crate::VERSION;

pub async fn health(State(state): State<AppState>) -> Result<Json<Value>> {
    state.services.database.health_check().await?;
    Ok(Json(json!({ "status": "ok", "version": VERSION })))
}
