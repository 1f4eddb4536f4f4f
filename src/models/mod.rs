//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod event;
pub mod progress;
pub mod registration;
pub mod user;

// Re-export commonly used models
pub use event::{CreateEventRequest, Event, EventPage, EventType, NewEvent, UpdateEventRequest};
pub use progress::{
    CourseHistory, CourseLevel, Courses, DayEntry, FeedbackEntry, LevelHistoryResponse,
    ProgressReportEntry, ProgressRequest, ProgressUpdate,
};
pub use registration::{
    AttendanceRecord, BulkRegistrationRequest, BulkResult, CreateRegistrationRequest,
    NewRegistration, Registration, RegistrationStatus, RegistrationView, RegistrationWithOwner,
};
pub use user::{BulkUserRequest, CreateUserRequest, PageQuery, User, UserPage, UserSummary};
