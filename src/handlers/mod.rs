//! HTTP handlers module
//!
//! This module contains the axum handlers organized by resource and the
//! router that mounts them under `/api`.

pub mod admin;
pub mod events;
pub mod extract;
pub mod fallback;
pub mod health;
pub mod progress;
pub mod registrations;

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post, put};
use axum::{middleware, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::config::ServerConfig;
use crate::middleware::log_requests;
use crate::state::AppState;

/// Build the application router
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.settings.server);

    let api = Router::new()
        .route("/health", get(health::health))
        .route(
            "/event-registrations",
            post(registrations::create).get(registrations::list_all),
        )
        .route(
            "/event-registrations/user/:mobile",
            get(registrations::list_by_mobile),
        )
        .route(
            "/event-registrations/bulk-approve",
            post(registrations::bulk_approve),
        )
        .route(
            "/event-registrations/bulk-reject",
            post(registrations::bulk_reject),
        )
        .route("/event-registrations/:id/approve", put(registrations::approve))
        .route("/event-registrations/:id/reject", put(registrations::reject))
        .route("/event-registrations/:id/attend", put(registrations::attend))
        .route("/progress", post(progress::record).get(progress::report))
        .route("/progress/:level", get(progress::level_history))
        .route("/events", get(events::list).post(events::create))
        .route(
            "/events/:id",
            get(events::get).put(events::update).delete(events::delete),
        )
        .route("/admin/users", get(admin::list_users))
        .route("/admin/all-users", get(admin::list_all_users))
        .route("/admin/users/bulk-approve", post(admin::bulk_approve_users))
        .route("/admin/users/bulk-reject", post(admin::bulk_reject_users))
        .route("/admin/users/:id/approve", put(admin::approve_user))
        .route("/admin/users/:id/reject", put(admin::reject_user))
        .route(
            "/admin/users/:id/toggle-whatsapp",
            put(admin::toggle_whatsapp),
        );

    Router::new()
        .nest("/api", api)
        .fallback(fallback::not_found)
        .layer(middleware::map_response(fallback::method_not_allowed))
        .layer(middleware::from_fn(log_requests))
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    if config.cors_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}
