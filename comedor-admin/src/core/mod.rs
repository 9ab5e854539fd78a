//! Core module - configuration and environment setup
//!
//! - [`Config`] - service configuration
//! - [`setup_environment`] - `.env` loading and logging

pub mod config;

pub use config::Config;

use crate::utils::logger::init_logger_with_file;
use shared::error::{AppError, AppResult};

/// Load `.env`, read the configuration and initialize logging
pub fn setup_environment() -> AppResult<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();

    if let Some(dir) = &config.log_dir {
        std::fs::create_dir_all(dir)
            .map_err(|e| AppError::config(format!("Cannot create log dir {dir}: {e}")))?;
    }

    init_logger_with_file(
        Some(&config.log_level),
        Some(config.log_json),
        config.log_dir.as_deref(),
    );

    Ok(config)
}
