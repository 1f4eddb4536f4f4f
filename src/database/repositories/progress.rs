//! Course progress repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::progress::{CourseHistory, CourseLevel, Courses, FeedbackRow, ProgressRow, ProgressUpdate};
use crate::utils::errors::SksError;

#[derive(Clone, Debug)]
pub struct ProgressRepository {
    pool: PgPool,
}

impl ProgressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or replace one (level, day) entry
    ///
    /// Feedback, when present, is written to the entry and to the feedback
    /// table in the same transaction.
    pub async fn upsert(&self, user_id: i64, update: &ProgressUpdate) -> Result<(), SksError> {
        let level = i16::from(update.level.number());
        let day = i16::try_from(update.entry.day)
            .map_err(|_| SksError::InvalidInput("Day out of range".to_string()))?;
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO course_progress (user_id, level, day, entry_date, watch_time_minutes, completed, feedback, video_duration_seconds, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_id, level, day) DO UPDATE
            SET entry_date = EXCLUDED.entry_date,
                watch_time_minutes = EXCLUDED.watch_time_minutes,
                completed = EXCLUDED.completed,
                feedback = COALESCE(EXCLUDED.feedback, course_progress.feedback),
                video_duration_seconds = COALESCE(EXCLUDED.video_duration_seconds, course_progress.video_duration_seconds),
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(user_id)
        .bind(level)
        .bind(day)
        .bind(update.entry.date)
        .bind(update.entry.watch_time_minutes)
        .bind(update.entry.completed)
        .bind(&update.entry.feedback)
        .bind(update.video_duration_seconds)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if let Some(feedback) = &update.entry.feedback {
            sqlx::query(
                r#"
                INSERT INTO course_feedback (user_id, level, day, feedback, submitted_at)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (user_id, level, day) DO UPDATE
                SET feedback = EXCLUDED.feedback, submitted_at = EXCLUDED.submitted_at
                "#,
            )
            .bind(user_id)
            .bind(level)
            .bind(day)
            .bind(feedback)
            .bind(update.entry.date.unwrap_or(now))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Load every level for a user
    pub async fn load(&self, user_id: i64) -> Result<Courses, SksError> {
        let entries = sqlx::query_as::<_, ProgressRow>(
            "SELECT level, day, entry_date, watch_time_minutes, completed, feedback FROM course_progress WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let feedback = sqlx::query_as::<_, FeedbackRow>(
            "SELECT level, day, feedback, submitted_at FROM course_feedback WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Courses::from_rows(entries, feedback))
    }

    /// Load a single level for a user
    pub async fn load_level(&self, user_id: i64, level: CourseLevel) -> Result<CourseHistory, SksError> {
        let level_number = i16::from(level.number());

        let entries = sqlx::query_as::<_, ProgressRow>(
            "SELECT level, day, entry_date, watch_time_minutes, completed, feedback FROM course_progress WHERE user_id = $1 AND level = $2",
        )
        .bind(user_id)
        .bind(level_number)
        .fetch_all(&self.pool)
        .await?;

        let feedback = sqlx::query_as::<_, FeedbackRow>(
            "SELECT level, day, feedback, submitted_at FROM course_feedback WHERE user_id = $1 AND level = $2",
        )
        .bind(user_id)
        .bind(level_number)
        .fetch_all(&self.pool)
        .await?;

        Ok(Courses::from_rows(entries, feedback).level(level))
    }
}
