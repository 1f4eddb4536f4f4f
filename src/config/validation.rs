//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{Result, SksError};

const MIN_SECRET_LEN: usize = 32;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_auth_config(&settings.auth, settings.is_production())?;
    validate_progress_config(&settings.progress)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(SksError::Config("Database URL is required".to_string()));
    }

    if config.max_connections == 0 {
        return Err(SksError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(SksError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate bearer token configuration
fn validate_auth_config(config: &super::AuthConfig, production: bool) -> Result<()> {
    if config.jwt_secret.is_empty() {
        return Err(SksError::Config("JWT secret is required".to_string()));
    }

    if config.jwt_secret.len() < MIN_SECRET_LEN {
        return Err(SksError::Config(format!(
            "JWT secret must be at least {} bytes",
            MIN_SECRET_LEN
        )));
    }

    if config.token_ttl_hours <= 0 {
        return Err(SksError::Config(
            "Token lifetime must be greater than 0".to_string(),
        ));
    }

    if production && config.dev_bypass.is_some() {
        return Err(SksError::Config(
            "Auth bypass cannot be configured in production".to_string(),
        ));
    }

    Ok(())
}

/// Validate progress reporting configuration
fn validate_progress_config(config: &super::ProgressConfig) -> Result<()> {
    if config.video_durations.is_empty() {
        return Err(SksError::Config(
            "At least one video duration is required".to_string(),
        ));
    }

    if config.report_days == 0 || config.report_days > crate::models::progress::MAX_DAY {
        return Err(SksError::Config(format!(
            "Report days must be between 1 and {}",
            crate::models::progress::MAX_DAY
        )));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(SksError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(SksError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}
