//! Middleware module
//!
//! This module contains middleware for request processing

pub mod auth;
pub mod logging;
pub mod validation;

// Re-export commonly used middleware
pub use auth::{AdminUser, AuthMiddleware, AuthUser};
pub use logging::log_requests;
pub use validation::ValidatedProgress;
