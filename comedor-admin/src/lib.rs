//! Comedor admin - weekly menu and attendance administration
//!
//! # Module layout
//!
//! ```text
//! comedor-admin/src/
//! ├── core/          # configuration, environment setup
//! ├── auth/          # claims, current user, permission checks
//! ├── store/         # document store port + in-memory store
//! ├── services/      # menu and attendance services
//! └── utils/         # logging
//! ```
//!
//! The weekday/reconciliation core lives in the `shared` crate.

pub mod auth;
pub mod core;
pub mod services;
pub mod store;
pub mod utils;

// Re-export public types
pub use auth::{Claims, CurrentUser};
pub use crate::core::{Config, setup_environment};
pub use services::{AttendanceService, MenuService};
pub use store::{DocumentStore, MemoryStore, StoreError, StoreResult};
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
