//! Authentication service implementation
//!
//! This service issues and verifies the bearer tokens presented to the API.
//! Tokens are HS256 JWTs signed with the shared secret from configuration
//! and carry the user's ID, mobile number and admin flag.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AuthConfig;
use crate::utils::errors::{Result, SksError};

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub mobile: String,
    #[serde(default)]
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
}

/// Identity of the caller of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: i64,
    pub mobile: String,
    pub is_admin: bool,
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            mobile: claims.mobile,
            is_admin: claims.is_admin,
        }
    }
}

/// Token issuing and verification
#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            token_ttl: Duration::hours(config.token_ttl_hours),
        }
    }

    /// Issue a token for an explicit identity
    pub fn issue_token_for(&self, user_id: i64, mobile: &str, is_admin: bool) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            mobile: mobile.to_string(),
            is_admin,
            iat: now.timestamp(),
            exp: (now + self.token_ttl).timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    /// Verify a token's signature and expiry
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        debug!(user_id = data.claims.sub, "Token verified");
        Ok(data.claims)
    }

    /// Require admin rights
    pub fn require_admin(&self, context: &AuthContext) -> Result<()> {
        if context.is_admin {
            Ok(())
        } else {
            Err(SksError::PermissionDenied("Admin access required".to_string()))
        }
    }
}
