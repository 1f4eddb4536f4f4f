//! JSON bodies for requests no route handles

use axum::http::header::{ALLOW, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::utils::errors::SksError;

/// Fallback for unknown paths
pub async fn not_found() -> SksError {
    SksError::RouteNotFound
}

/// Give the router's bare 405 responses an `{error}` body, keeping `Allow`
pub async fn method_not_allowed(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED
        || response.headers().contains_key(CONTENT_TYPE)
    {
        return response;
    }

    let allow = response.headers().get(ALLOW).cloned();
    let mut json = SksError::MethodNotAllowed.into_response();
    if let Some(allow) = allow {
        json.headers_mut().insert(ALLOW, allow);
    }
    json
}
