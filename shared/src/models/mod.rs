//! Data models
//!
//! Shared between the admin services and the frontend (via documents).
//! Weekday-keyed maps always use [`crate::weekday::WeekdayId`] keys.

pub mod attendance;
pub mod menu;

// Re-exports
pub use attendance::*;
pub use menu::*;
