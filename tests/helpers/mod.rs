//! Test helpers module
//!
//! Utilities for driving the portal router in-process and for setting up a
//! Postgres test database when one is available.

#![allow(dead_code)]

pub mod database_helper;
pub mod test_app;
pub mod test_data;

pub use database_helper::*;
pub use test_app::*;
pub use test_data::*;
