//! Course progress model
//!
//! Progress is kept per user as a mapping from (level, day) to a day entry.
//! Days that were never written read back as zeroed placeholders, so a
//! level's history always appears dense from day 1 up to its highest
//! recorded day.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::errors::{Result, SksError};

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 5;
pub const MIN_DAY: u16 = 1;
pub const MAX_DAY: u16 = 30;

/// Course level, 1 through 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CourseLevel(u8);

impl CourseLevel {
    pub fn new(level: i64) -> Result<Self> {
        u8::try_from(level)
            .ok()
            .filter(|l| (MIN_LEVEL..=MAX_LEVEL).contains(l))
            .map(CourseLevel)
            .ok_or_else(|| {
                SksError::InvalidInput(format!(
                    "Level must be between {} and {}",
                    MIN_LEVEL, MAX_LEVEL
                ))
            })
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Key used for this level in course payloads, e.g. `level2`
    pub fn key(self) -> String {
        format!("level{}", self.0)
    }

    pub fn all() -> impl Iterator<Item = CourseLevel> {
        (MIN_LEVEL..=MAX_LEVEL).map(CourseLevel)
    }
}

/// Validate a day number against the writable range
pub fn course_day(day: i64) -> Result<u16> {
    u16::try_from(day)
        .ok()
        .filter(|d| (MIN_DAY..=MAX_DAY).contains(d))
        .ok_or_else(|| {
            SksError::InvalidInput(format!("Day must be between {} and {}", MIN_DAY, MAX_DAY))
        })
}

/// Whole minutes watched, truncating partial minutes
pub fn watch_minutes(watched_seconds: Option<f64>) -> i32 {
    match watched_seconds {
        Some(seconds) if seconds.is_finite() && seconds > 0.0 => {
            (seconds / 60.0).floor().min(f64::from(i32::MAX)) as i32
        }
        _ => 0,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    pub day: u16,
    pub date: Option<DateTime<Utc>>,
    pub watch_time_minutes: i32,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl DayEntry {
    /// Zeroed entry standing in for a day with no record
    pub fn placeholder(day: u16) -> Self {
        Self {
            day,
            date: None,
            watch_time_minutes: 0,
            completed: false,
            feedback: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    pub day: u16,
    pub feedback: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
}

/// One level's day entries and feedback, keyed by day
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseHistory {
    entries: BTreeMap<u16, DayEntry>,
    feedback: BTreeMap<u16, FeedbackEntry>,
}

impl CourseHistory {
    /// Insert or replace the entry for `entry.day`
    pub fn record(&mut self, entry: DayEntry) {
        if let Some(text) = &entry.feedback {
            self.feedback.insert(
                entry.day,
                FeedbackEntry {
                    day: entry.day,
                    feedback: Some(text.clone()),
                    submitted_at: entry.date,
                },
            );
        }
        self.entries.insert(entry.day, entry);
    }

    pub fn record_feedback(&mut self, entry: FeedbackEntry) {
        self.feedback.insert(entry.day, entry);
    }

    /// Entry for a day, or a placeholder when none was written
    pub fn day(&self, day: u16) -> DayEntry {
        self.entries
            .get(&day)
            .cloned()
            .unwrap_or_else(|| DayEntry::placeholder(day))
    }

    pub fn max_day(&self) -> u16 {
        self.entries.keys().next_back().copied().unwrap_or(0)
    }

    /// Days `1..=max_day` in order, gaps filled with placeholders
    pub fn dense_history(&self) -> Vec<DayEntry> {
        (MIN_DAY..=self.max_day()).map(|d| self.day(d)).collect()
    }

    /// Feedback aligned with `dense_history`
    pub fn dense_feedback(&self) -> Vec<FeedbackEntry> {
        let last = self
            .feedback
            .keys()
            .next_back()
            .copied()
            .unwrap_or(0)
            .max(self.max_day());

        (MIN_DAY..=last)
            .map(|d| {
                self.feedback.get(&d).cloned().unwrap_or(FeedbackEntry {
                    day: d,
                    feedback: None,
                    submitted_at: None,
                })
            })
            .collect()
    }
}

/// A user's progress across all levels
#[derive(Debug, Clone, Default)]
pub struct Courses {
    levels: BTreeMap<CourseLevel, CourseHistory>,
}

impl Courses {
    pub fn from_rows(entries: Vec<ProgressRow>, feedback: Vec<FeedbackRow>) -> Self {
        let mut courses = Courses::default();

        for row in entries {
            if let Some((level, entry)) = row.into_entry() {
                courses.levels.entry(level).or_default().record(entry);
            }
        }
        for row in feedback {
            if let Some((level, entry)) = row.into_entry() {
                courses.levels.entry(level).or_default().record_feedback(entry);
            }
        }

        courses
    }

    pub fn level(&self, level: CourseLevel) -> CourseHistory {
        self.levels.get(&level).cloned().unwrap_or_default()
    }

    pub fn level_mut(&mut self, level: CourseLevel) -> &mut CourseHistory {
        self.levels.entry(level).or_default()
    }
}

/// One row of the progress report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReportEntry {
    pub level: u8,
    pub day: u16,
    pub completed: bool,
    pub watched_seconds: i64,
    pub video_duration: u32,
    pub feedback: Option<String>,
}

/// Fixed-shape report: every level, days `1..=report_days`
///
/// `video_duration` comes from `durations`, cycled by day, and ignores any
/// duration submitted on write.
pub fn build_report(courses: &Courses, report_days: u16, durations: &[u32]) -> Vec<ProgressReportEntry> {
    let mut report = Vec::with_capacity(usize::from(MAX_LEVEL) * usize::from(report_days));

    for level in CourseLevel::all() {
        let history = courses.level(level);
        for day in MIN_DAY..=report_days {
            let entry = history.day(day);
            let video_duration = if durations.is_empty() {
                0
            } else {
                durations[usize::from(day - 1) % durations.len()]
            };

            report.push(ProgressReportEntry {
                level: level.number(),
                day,
                completed: entry.completed,
                watched_seconds: i64::from(entry.watch_time_minutes) * 60,
                video_duration,
                feedback: entry.feedback,
            });
        }
    }

    report
}

/// Body of `POST /progress`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRequest {
    pub level: Option<i64>,
    pub day: Option<i64>,
    pub completed: Option<bool>,
    pub completed_at: Option<DateTime<Utc>>,
    pub watched_seconds: Option<f64>,
    pub video_duration: Option<f64>,
    pub feedback: Option<String>,
}

impl ProgressRequest {
    /// Range checks for whichever of level/day are present
    pub fn validate_ranges(&self) -> Result<()> {
        if let Some(level) = self.level {
            CourseLevel::new(level)?;
        }
        if let Some(day) = self.day {
            course_day(day)?;
        }
        Ok(())
    }
}

/// Validated progress write
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    pub level: CourseLevel,
    pub entry: DayEntry,
    pub video_duration_seconds: Option<i32>,
}

impl ProgressUpdate {
    pub fn from_request(request: ProgressRequest, now: DateTime<Utc>) -> Result<Self> {
        let (Some(level), Some(day)) = (request.level, request.day) else {
            return Err(SksError::InvalidInput("Level and day are required".to_string()));
        };

        let level = CourseLevel::new(level)?;
        let day = course_day(day)?;
        let feedback = request
            .feedback
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty());

        Ok(Self {
            level,
            entry: DayEntry {
                day,
                date: Some(request.completed_at.unwrap_or(now)),
                watch_time_minutes: watch_minutes(request.watched_seconds),
                completed: request.completed.unwrap_or(false),
                feedback,
            },
            video_duration_seconds: request
                .video_duration
                .filter(|d| d.is_finite() && *d >= 0.0)
                .map(|d| d.round().min(f64::from(i32::MAX)) as i32),
        })
    }
}

/// Stored day entry
#[derive(Debug, Clone, FromRow)]
pub struct ProgressRow {
    pub level: i16,
    pub day: i16,
    pub entry_date: Option<DateTime<Utc>>,
    pub watch_time_minutes: i32,
    pub completed: bool,
    pub feedback: Option<String>,
}

impl ProgressRow {
    fn into_entry(self) -> Option<(CourseLevel, DayEntry)> {
        let level = CourseLevel::new(i64::from(self.level)).ok()?;
        let day = u16::try_from(self.day).ok()?;
        Some((
            level,
            DayEntry {
                day,
                date: self.entry_date,
                watch_time_minutes: self.watch_time_minutes,
                completed: self.completed,
                feedback: self.feedback,
            },
        ))
    }
}

/// Stored feedback entry
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackRow {
    pub level: i16,
    pub day: i16,
    pub feedback: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl FeedbackRow {
    fn into_entry(self) -> Option<(CourseLevel, FeedbackEntry)> {
        let level = CourseLevel::new(i64::from(self.level)).ok()?;
        let day = u16::try_from(self.day).ok()?;
        Some((
            level,
            FeedbackEntry {
                day,
                feedback: self.feedback,
                submitted_at: self.submitted_at,
            },
        ))
    }
}

/// Response of `GET /progress/:level`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelHistoryResponse {
    pub level: String,
    pub history: Vec<DayEntry>,
    pub feedback: Vec<FeedbackEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    fn entry(day: u16, minutes: i32, completed: bool) -> DayEntry {
        DayEntry {
            day,
            date: Some(Utc::now()),
            watch_time_minutes: minutes,
            completed,
            feedback: None,
        }
    }

    #[test]
    fn test_watch_minutes_truncates() {
        assert_eq!(watch_minutes(Some(650.0)), 10);
        assert_eq!(watch_minutes(Some(59.9)), 0);
        assert_eq!(watch_minutes(Some(-5.0)), 0);
        assert_eq!(watch_minutes(None), 0);
    }

    #[test]
    fn test_gap_reads_as_placeholder() {
        let mut history = CourseHistory::default();
        history.record(entry(4, 12, true));

        let dense = history.dense_history();
        assert_eq!(dense.len(), 4);
        for placeholder in &dense[..3] {
            assert!(!placeholder.completed);
            assert_eq!(placeholder.watch_time_minutes, 0);
        }
        assert_eq!(dense[3].watch_time_minutes, 12);
        assert_eq!(dense.iter().map(|e| e.day).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_feedback_stored_in_both_places() {
        let mut history = CourseHistory::default();
        let mut day_two = entry(2, 5, true);
        day_two.feedback = Some("Very calming".to_string());
        history.record(day_two);

        assert_eq!(history.day(2).feedback.as_deref(), Some("Very calming"));
        let feedback = history.dense_feedback();
        assert_eq!(feedback.len(), 2);
        assert_eq!(feedback[0].feedback, None);
        assert_eq!(feedback[1].feedback.as_deref(), Some("Very calming"));
    }

    #[test]
    fn test_report_has_fixed_shape() {
        let mut courses = Courses::default();
        let level = CourseLevel::new(2).unwrap();
        courses.level_mut(level).record(entry(1, 10, true));
        courses.level_mut(level).record(entry(20, 30, true));

        let report = build_report(&courses, 3, &[600, 900, 1200]);
        assert_eq!(report.len(), 15);

        let level_two_day_one = report.iter().find(|e| e.level == 2 && e.day == 1).unwrap();
        assert!(level_two_day_one.completed);
        assert_eq!(level_two_day_one.watched_seconds, 600);
        assert!(report.iter().all(|e| e.day <= 3));
        assert_eq!(
            report.iter().take(3).map(|e| e.video_duration).collect::<Vec<_>>(),
            vec![600, 900, 1200]
        );
    }

    #[test]
    fn test_update_requires_level_and_day() {
        let request = ProgressRequest {
            day: Some(1),
            ..Default::default()
        };
        assert_matches!(
            ProgressUpdate::from_request(request, Utc::now()),
            Err(SksError::InvalidInput(msg)) if msg == "Level and day are required"
        );
    }

    #[test]
    fn test_range_validation() {
        let request = ProgressRequest {
            level: Some(6),
            day: Some(1),
            ..Default::default()
        };
        assert!(request.validate_ranges().is_err());

        let request = ProgressRequest {
            level: Some(5),
            day: Some(31),
            ..Default::default()
        };
        assert!(request.validate_ranges().is_err());

        let request = ProgressRequest {
            level: None,
            day: Some(30),
            ..Default::default()
        };
        assert!(request.validate_ranges().is_ok());
    }

    #[test]
    fn test_level_key() {
        assert_eq!(CourseLevel::new(3).unwrap().key(), "level3");
        assert_eq!(CourseLevel::all().count(), 5);
    }

    proptest! {
        #[test]
        fn prop_writing_a_later_day_keeps_existing_days(
            existing in proptest::collection::btree_map(1u16..=30, (0i32..120, any::<bool>()), 0..10),
            new_day in 1u16..=30,
        ) {
            let mut history = CourseHistory::default();
            for (day, (minutes, completed)) in &existing {
                history.record(entry(*day, *minutes, *completed));
            }
            let before = history.dense_history();

            history.record(entry(new_day, 7, true));
            let after = history.dense_history();

            prop_assert_eq!(after.len(), usize::from(new_day.max(history.max_day())));
            for (index, previous) in before.iter().enumerate() {
                if previous.day != new_day {
                    prop_assert_eq!(&after[index], previous);
                }
            }
            for (index, current) in after.iter().enumerate() {
                prop_assert_eq!(usize::from(current.day), index + 1);
                if current.day != new_day && !existing.contains_key(&current.day) {
                    prop_assert!(!current.completed);
                    prop_assert_eq!(current.watch_time_minutes, 0);
                }
            }
        }
    }
}
