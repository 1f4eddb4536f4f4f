//! Shared application state
//!
//! Handed to every axum handler; cheap to clone.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::middleware::auth::AuthMiddleware;
use crate::services::ServiceFactory;

#[derive(Clone)]
pub struct AppState {
    pub services: Arc<ServiceFactory>,
    pub auth: AuthMiddleware,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings, database: DatabaseService) -> Self {
        let services = ServiceFactory::new(&settings, database);
        let auth = AuthMiddleware::new(services.auth_service.clone(), &settings);

        Self {
            services: Arc::new(services),
            auth,
            settings: Arc::new(settings),
        }
    }
}

impl FromRef<AppState> for AuthMiddleware {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
