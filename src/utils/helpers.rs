//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use std::sync::OnceLock;

use chrono::NaiveDate;
use rand::Rng;
use regex::Regex;

/// Prefix carried by every registration ID
pub const REGISTRATION_ID_PREFIX: &str = "SKS";

/// Value shown in place of a missing or blank display field
pub const PLACEHOLDER: &str = "-";

/// Generate a registration ID of the form `SKS-DDMMYY-######`
///
/// The suffix is random and not checked for collisions here; the
/// repository retries on a unique-index conflict.
pub fn generate_registration_id<R: Rng + ?Sized>(date: NaiveDate, rng: &mut R) -> String {
    let suffix: u32 = rng.gen_range(0..1_000_000);
    format!(
        "{}-{}-{:06}",
        REGISTRATION_ID_PREFIX,
        date.format("%d%m%y"),
        suffix
    )
}

fn registration_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^SKS-\d{6}-\d{6}$").expect("registration id pattern compiles")
    })
}

/// Check whether a string has the shape of a registration ID
pub fn is_registration_id(value: &str) -> bool {
    registration_id_pattern().is_match(value)
}

/// Return the trimmed value, or the placeholder when absent or blank
pub fn display_or_placeholder(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// True when the option holds a non-blank string
pub fn is_present(value: &Option<String>) -> bool {
    value.as_deref().map_or(false, |v| !v.trim().is_empty())
}

/// Calculate pagination offset
pub fn calculate_offset(page: u32, page_size: u32) -> i64 {
    i64::from(page.saturating_sub(1)) * i64::from(page_size)
}

/// Join first and last name, skipping empty parts
pub fn full_name(first_name: Option<&str>, last_name: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [first_name, last_name]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}
