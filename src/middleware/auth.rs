//! Authentication middleware
//!
//! Extractors that turn the `Authorization: Bearer <token>` header into the
//! caller's identity and gate admin-only routes.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use tracing::{debug, warn};

use crate::config::settings::Settings;
use crate::services::auth::{AuthContext, AuthService};
use crate::utils::errors::{Result, SksError};

/// Authentication middleware
#[derive(Clone)]
pub struct AuthMiddleware {
    auth_service: AuthService,
    bypass: Option<AuthContext>,
}

impl AuthMiddleware {
    /// Create a new AuthMiddleware instance
    ///
    /// The configured bypass identity is dropped unless the crate was built
    /// with the `dev-auth-bypass` feature.
    pub fn new(auth_service: AuthService, settings: &Settings) -> Self {
        let bypass = if cfg!(feature = "dev-auth-bypass") {
            settings.auth.dev_bypass.as_ref().map(|identity| AuthContext {
                user_id: identity.user_id,
                mobile: identity.mobile.clone(),
                is_admin: identity.is_admin,
            })
        } else {
            None
        };

        if let Some(identity) = &bypass {
            warn!(
                user_id = identity.user_id,
                is_admin = identity.is_admin,
                "Auth bypass active: requests without a token act as this identity"
            );
        }

        Self {
            auth_service,
            bypass,
        }
    }

    /// Resolve the caller from request headers
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<AuthContext> {
        let Some(value) = headers.get(AUTHORIZATION) else {
            if let Some(identity) = &self.bypass {
                debug!(user_id = identity.user_id, "No token, using bypass identity");
                return Ok(identity.clone());
            }
            return Err(SksError::Authentication(
                "No token, authorization denied".to_string(),
            ));
        };

        let token = value
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| SksError::Authentication("Malformed authorization header".to_string()))?;

        let claims = self.auth_service.verify_token(token)?;
        Ok(claims.into())
    }

    /// Check if the caller is authorized for admin routes
    pub fn check_admin_auth(&self, context: &AuthContext) -> Result<()> {
        match self.auth_service.require_admin(context) {
            Ok(()) => {
                debug!(user_id = context.user_id, "Admin authentication successful");
                Ok(())
            }
            Err(e) => {
                warn!(user_id = context.user_id, "Unauthorized admin access attempt");
                Err(e)
            }
        }
    }
}

/// Any authenticated caller
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthContext);

/// An authenticated caller with the admin flag
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthContext);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AuthMiddleware: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = SksError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let auth = AuthMiddleware::from_ref(state);
        auth.authenticate(&parts.headers).map(AuthUser)
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    AuthMiddleware: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = SksError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let auth = AuthMiddleware::from_ref(state);
        let context = auth.authenticate(&parts.headers)?;
        auth.check_admin_auth(&context)?;
        Ok(AdminUser(context))
    }
}
