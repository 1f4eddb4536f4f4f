//! Progress service implementation

use chrono::Utc;

use crate::config::ProgressConfig;
use crate::database::DatabaseService;
use crate::models::progress::{
    build_report, CourseLevel, DayEntry, LevelHistoryResponse, ProgressReportEntry,
    ProgressRequest, ProgressUpdate,
};
use crate::utils::errors::{Result, SksError};
use crate::utils::logging::log_progress_update;

/// Course progress tracking for the calling user
#[derive(Clone, Debug)]
pub struct ProgressService {
    db: DatabaseService,
    config: ProgressConfig,
}

impl ProgressService {
    pub fn new(db: DatabaseService, config: ProgressConfig) -> Self {
        Self { db, config }
    }

    /// Record one day of a level for `user_id`
    pub async fn record(&self, user_id: i64, request: ProgressRequest) -> Result<DayEntry> {
        let update = ProgressUpdate::from_request(request, Utc::now())?;

        if self.db.users.find_by_id(user_id).await?.is_none() {
            return Err(SksError::UserNotFound);
        }

        self.db.progress.upsert(user_id, &update).await?;
        log_progress_update(
            user_id,
            update.level.number(),
            update.entry.day,
            update.entry.completed,
        );

        Ok(update.entry)
    }

    /// Fixed-shape report over every level
    pub async fn report(&self, user_id: i64) -> Result<Vec<ProgressReportEntry>> {
        let courses = self.db.progress.load(user_id).await?;
        Ok(build_report(
            &courses,
            self.config.report_days,
            &self.config.video_durations,
        ))
    }

    /// Dense history and feedback for one level
    pub async fn level_history(&self, user_id: i64, level: i64) -> Result<LevelHistoryResponse> {
        let level = CourseLevel::new(level)?;
        let history = self.db.progress.load_level(user_id, level).await?;

        Ok(LevelHistoryResponse {
            level: level.key(),
            history: history.dense_history(),
            feedback: history.dense_feedback(),
        })
    }
}
