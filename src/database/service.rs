//! Database service layer
//!
//! This module bundles the repositories that share one connection pool

use crate::database::{
    DatabasePool, EventRepository, ProgressRepository, RegistrationRepository, UserRepository,
};
use crate::utils::errors::SksError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pool: DatabasePool,
    pub users: UserRepository,
    pub events: EventRepository,
    pub registrations: RegistrationRepository,
    pub progress: ProgressRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            registrations: RegistrationRepository::new(pool.clone()),
            progress: ProgressRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check the underlying pool can serve a query
    pub async fn health_check(&self) -> Result<(), SksError> {
        super::connection::health_check(&self.pool).await
    }
}
