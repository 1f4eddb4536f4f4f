//! Event registration repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::event::Event;
use crate::models::registration::{
    AttendanceRecord, NewRegistration, Registration, RegistrationStatus, RegistrationWithOwner,
};
use crate::utils::errors::SksError;
use crate::utils::helpers::generate_registration_id;

const REGISTRATION_COLUMNS: &str = "id, registration_id, user_id, event_id, event_name, event_date, full_name, mobile, gender, age, profession, address, sks_level, sks_miracle, other_details, for_whom, status, attended, attended_at, date_registered, updated_at";

const JOINED_COLUMNS: &str = "r.id, r.registration_id, r.user_id, r.event_id, r.event_name, r.event_date, r.full_name, r.mobile, r.gender, r.age, r.profession, r.address, r.sks_level, r.sks_miracle, r.other_details, r.for_whom, r.status, r.attended, r.attended_at, r.date_registered, r.updated_at, u.mobile AS owner_mobile, u.first_name AS owner_first_name, u.last_name AS owner_last_name";

/// Attempts at drawing an unused registration ID
const MAX_ID_ATTEMPTS: usize = 5;

#[derive(Clone, Debug)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a registration for `user_id`, drawing a fresh registration ID
    pub async fn create(
        &self,
        user_id: i64,
        registration: &NewRegistration,
        event: &Event,
        status: RegistrationStatus,
    ) -> Result<Registration, SksError> {
        let mut last_error = None;

        for attempt in 1..=MAX_ID_ATTEMPTS {
            let now = Utc::now();
            let registration_id = generate_registration_id(now.date_naive(), &mut rand::thread_rng());

            let result = sqlx::query_as::<_, Registration>(&format!(
                r#"
                INSERT INTO event_registrations (
                    registration_id, user_id, event_id, event_name, event_date, full_name, mobile,
                    gender, age, profession, address, sks_level, sks_miracle, other_details,
                    for_whom, status, attended, date_registered, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, FALSE, $17, $17)
                RETURNING {REGISTRATION_COLUMNS}
                "#
            ))
            .bind(&registration_id)
            .bind(user_id)
            .bind(event.id)
            .bind(&event.name)
            .bind(event.event_date)
            .bind(&registration.full_name)
            .bind(&registration.mobile)
            .bind(&registration.gender)
            .bind(registration.age)
            .bind(&registration.profession)
            .bind(&registration.address)
            .bind(&registration.sks_level)
            .bind(&registration.sks_miracle)
            .bind(&registration.other_details)
            .bind(&registration.for_whom)
            .bind(status)
            .bind(now)
            .fetch_one(&self.pool)
            .await;

            match result {
                Ok(registration) => return Ok(registration),
                Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                    tracing::warn!(registration_id = %registration_id, attempt, "Registration ID collision, retrying");
                    last_error = Some(sqlx::Error::Database(e));
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(last_error
            .map(SksError::from)
            .unwrap_or_else(|| SksError::Internal("Could not allocate a registration ID".to_string())))
    }

    /// Find registration by its public ID
    pub async fn find_by_registration_id(&self, registration_id: &str) -> Result<Option<Registration>, SksError> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM event_registrations WHERE registration_id = $1"
        ))
        .bind(registration_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Every registration with its owner, newest first
    pub async fn list_with_owner(&self) -> Result<Vec<RegistrationWithOwner>, SksError> {
        let rows = sqlx::query_as::<_, RegistrationWithOwner>(&format!(
            r#"
            SELECT {JOINED_COLUMNS}
            FROM event_registrations r
            INNER JOIN users u ON u.id = r.user_id
            ORDER BY r.date_registered DESC, r.id DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// A user's registrations in the order they were made
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Registration>, SksError> {
        let registrations = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM event_registrations WHERE user_id = $1 ORDER BY date_registered ASC, id ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    /// Overwrite the status of a registration
    pub async fn set_status(
        &self,
        registration_id: &str,
        status: RegistrationStatus,
    ) -> Result<Option<Registration>, SksError> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            r#"
            UPDATE event_registrations
            SET status = $2, updated_at = $3
            WHERE registration_id = $1
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(registration_id)
        .bind(status)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Mark an approved registration attended and record the attendance
    ///
    /// Runs in one transaction with the registration row locked, so two
    /// concurrent calls cannot both succeed.
    pub async fn mark_attended(&self, registration_id: &str) -> Result<Registration, SksError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM event_registrations WHERE registration_id = $1 FOR UPDATE"
        ))
        .bind(registration_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| SksError::RegistrationNotFound {
            registration_id: registration_id.to_string(),
        })?;

        current.check_can_attend()?;

        let now = Utc::now();
        let updated = sqlx::query_as::<_, Registration>(&format!(
            r#"
            UPDATE event_registrations
            SET attended = TRUE, attended_at = $2, updated_at = $2
            WHERE id = $1
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(current.id)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO events_attended (user_id, event_id, event_name, event_date, registration_id, attended_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, event_id) DO NOTHING
            "#,
        )
        .bind(updated.user_id)
        .bind(updated.event_id)
        .bind(&updated.event_name)
        .bind(updated.event_date)
        .bind(&updated.registration_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(updated)
    }

    /// Events a user has attended, oldest first
    pub async fn attended_events(&self, user_id: i64) -> Result<Vec<AttendanceRecord>, SksError> {
        let records = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            SELECT user_id, event_id, event_name, event_date, registration_id, attended_at
            FROM events_attended
            WHERE user_id = $1
            ORDER BY attended_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
