//! Request validation middleware
//!
//! Range checks that run before handlers see the request body.

use axum::extract::{FromRequest, Request};
use axum::Json;

use crate::models::progress::ProgressRequest;
use crate::utils::errors::SksError;

/// Progress write whose level and day, when present, are in range
#[derive(Debug, Clone)]
pub struct ValidatedProgress(pub ProgressRequest);

#[axum::async_trait]
impl<S> FromRequest<S> for ValidatedProgress
where
    S: Send + Sync,
{
    type Rejection = SksError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<ProgressRequest>::from_request(request, state).await?;
        body.validate_ranges()?;
        Ok(ValidatedProgress(body))
    }
}
