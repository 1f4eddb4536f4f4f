//! Services module
//!
//! This module contains business logic services

pub mod admin;
pub mod auth;
pub mod event;
pub mod progress;
pub mod registration;

// Re-export commonly used services
pub use admin::AdminService;
pub use auth::{AuthContext, AuthService, Claims};
pub use event::EventService;
pub use progress::ProgressService;
pub use registration::RegistrationService;

use crate::config::settings::Settings;
use crate::database::DatabaseService;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub database: DatabaseService,
    pub auth_service: AuthService,
    pub registration_service: RegistrationService,
    pub progress_service: ProgressService,
    pub admin_service: AdminService,
    pub event_service: EventService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: &Settings, database: DatabaseService) -> Self {
        Self {
            auth_service: AuthService::new(&settings.auth),
            registration_service: RegistrationService::new(database.clone()),
            progress_service: ProgressService::new(database.clone(), settings.progress.clone()),
            admin_service: AdminService::new(database.clone()),
            event_service: EventService::new(database.clone()),
            database,
        }
    }
}
