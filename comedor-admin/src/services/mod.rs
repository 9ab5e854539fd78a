//! Services
//!
//! - [`MenuService`] - weekly menu CRUD and publication
//! - [`AttendanceService`] - attendance confirmations and summaries

pub mod attendance;
pub mod menu;

pub use attendance::AttendanceService;
pub use menu::MenuService;
