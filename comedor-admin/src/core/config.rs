/// Admin service configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | tracing max level |
/// | LOG_JSON | false | JSON log lines |
/// | LOG_DIR | (unset) | directory for daily rolling log files |
/// | MENUS_COLLECTION | weekly_menus | collection holding menu documents |
/// | ATTENDANCE_COLLECTION | attendance | collection holding confirmations |
///
/// # Example
///
/// ```ignore
/// LOG_LEVEL=debug MENUS_COLLECTION=menus_staging comedor-admin menu.json
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    /// Rolling log file directory, stdout when unset
    pub log_dir: Option<String>,
    pub menus_collection: String,
    pub attendance_collection: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            menus_collection: std::env::var("MENUS_COLLECTION")
                .unwrap_or_else(|_| "weekly_menus".into()),
            attendance_collection: std::env::var("ATTENDANCE_COLLECTION")
                .unwrap_or_else(|_| "attendance".into()),
        }
    }

    /// Override the collection names
    ///
    /// Used by tests to isolate documents.
    pub fn with_collections(menus: impl Into<String>, attendance: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.menus_collection = menus.into();
        config.attendance_collection = attendance.into();
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
