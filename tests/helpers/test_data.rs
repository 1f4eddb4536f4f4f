//! Test data builders

use serde_json::{json, Value};

/// A complete registration body for `event_id` and `mobile`
pub fn registration_body(event_id: i64, mobile: &str) -> Value {
    json!({
        "eventId": event_id,
        "fullName": "Asha Patil",
        "mobile": mobile,
        "gender": "female",
        "age": 34,
        "profession": "Teacher",
        "address": "12 Lake Road, Pune",
        "sksLevel": "Level 2",
        "sksMiracle": "Yes",
        "forWhom": "self"
    })
}

pub fn progress_body(level: i64, day: i64, completed: bool, watched_seconds: f64) -> Value {
    json!({
        "level": level,
        "day": day,
        "completed": completed,
        "watchedSeconds": watched_seconds
    })
}
