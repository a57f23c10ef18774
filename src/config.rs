use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info};
use validator::Validate;

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const CONFIG_DIR: &str = "config";
const DEFAULT_SESSION_TTL_HOURS: i64 = 12;
// Reminder look-ahead windows, in days.
const DEFAULT_VACCINATION_REMINDER_DAYS: i64 = 30;
const DEFAULT_CALVING_REMINDER_DAYS: i64 = 4;

/// Application configuration with validation
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct AppConfig {
    /// Database connection URL (SQLite or PostgreSQL)
    pub database_url: String,

    /// Host address to bind the HTTP server to
    pub host: String,

    /// Port to bind the HTTP server to
    #[validate(range(min = 1))]
    pub port: u16,

    /// Runtime environment name ("development", "production", ...)
    pub environment: String,

    /// Log level: trace, debug, info, warn, error
    pub log_level: String,

    /// Run schema migrations at startup
    #[serde(default = "default_true")]
    pub auto_migrate: bool,

    /// Hours a login session stays valid
    #[serde(default = "default_session_ttl_hours")]
    #[validate(range(min = 1, max = 720))]
    pub session_ttl_hours: i64,

    /// Look-ahead window for vaccination due-date reminders, in days
    #[serde(default = "default_vaccination_reminder_days")]
    #[validate(range(min = 1, max = 365))]
    pub vaccination_reminder_days: i64,

    /// Look-ahead window for expected-calving reminders, in days
    #[serde(default = "default_calving_reminder_days")]
    #[validate(range(min = 1, max = 365))]
    pub calving_reminder_days: i64,
}

fn default_true() -> bool {
    true
}

fn default_session_ttl_hours() -> i64 {
    DEFAULT_SESSION_TTL_HOURS
}

fn default_vaccination_reminder_days() -> i64 {
    DEFAULT_VACCINATION_REMINDER_DAYS
}

fn default_calving_reminder_days() -> i64 {
    DEFAULT_CALVING_REMINDER_DAYS
}

impl AppConfig {
    /// Construct a configuration directly, used by tests and the CLI.
    pub fn new(database_url: String, host: String, port: u16, environment: String) -> Self {
        Self {
            database_url,
            host,
            port,
            environment,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            auto_migrate: true,
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            vaccination_reminder_days: DEFAULT_VACCINATION_REMINDER_DAYS,
            calving_reminder_days: DEFAULT_CALVING_REMINDER_DAYS,
        }
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ConfigError),

    #[error("configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Load configuration from defaults, optional config files and `APP__`
/// prefixed environment variables, in that order of precedence.
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());
    info!("Loading configuration for environment: {}", run_env);

    if !Path::new(CONFIG_DIR).exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            CONFIG_DIR
        );
    }

    let config = Config::builder()
        .set_default("database_url", "sqlite://farmledger.db?mode=rwc")?
        .set_default("host", DEFAULT_HOST)?
        .set_default("port", DEFAULT_PORT)?
        .set_default("environment", DEFAULT_ENV)?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .add_source(File::with_name(&format!("{}/default", CONFIG_DIR)).required(false))
        .add_source(File::with_name(&format!("{}/{}", CONFIG_DIR, run_env)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    app_config.validate().map_err(|e| {
        error!("Configuration validation failed: {:?}", e);
        AppConfigError::Validation(e)
    })?;

    info!("Configuration loaded successfully");
    Ok(app_config)
}

/// Initialize the tracing subscriber. `RUST_LOG` overrides the configured
/// level when set.
pub fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_directive = format!("farmledger_api={},tower_http=debug", level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    let _ = fmt()
        .with_env_filter(EnvFilter::new(filter_directive))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            8080,
            "test".to_string(),
        );
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.vaccination_reminder_days, 30);
        assert_eq!(cfg.calving_reminder_days, 4);
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            8080,
            "test".to_string(),
        );
        cfg.port = 0;
        assert!(cfg.validate().is_err());
    }
}
