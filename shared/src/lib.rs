//! Shared types for the cafeteria administration tool
//!
//! The pure core: text normalization, the weekday registry and comparator,
//! the menu data reconciler, and the data models and error types used by
//! the admin services.

pub mod error;
pub mod models;
pub mod reconcile;
pub mod text;
pub mod types;
pub mod util;
pub mod weekday;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use reconcile::{ReconcileError, ReconcileReport, Reconciliation, reconcile, reconcile_with_report};
pub use serde::{Deserialize, Serialize};
pub use weekday::{NotAWeekday, WeekdayId, are_equal, matches, resolve};
