//! Extractors whose rejections use the portal's `{"error": ...}` body

use axum::extract::{FromRequest, FromRequestParts};

use crate::utils::errors::SksError;

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(SksError))]
pub struct ApiJson<T>(pub T);

/// Path parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(SksError))]
pub struct ApiPath<T>(pub T);

/// Query string parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(SksError))]
pub struct ApiQuery<T>(pub T);
