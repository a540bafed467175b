use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address the trigger/UI endpoints listen on
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: "data/logs".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SchedulerConfig {
    /// Half-width of the time-of-day acceptance window in minutes.
    /// A schedule set to 09:00 with the default fires from 08:55 to 09:05.
    #[serde(default = "default_window_minutes")]
    pub window_minutes: i64,
    /// Operational timezone as a fixed UTC offset in hours.
    /// Schedule times are wall-clock in this zone (default: +9, Asia/Tokyo).
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
    /// Timeout in seconds applied to every outbound HTTP call
    #[serde(default = "default_http_timeout_sec")]
    pub http_timeout_sec: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            window_minutes: default_window_minutes(),
            utc_offset_hours: default_utc_offset_hours(),
            http_timeout_sec: default_http_timeout_sec(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8787".to_string()
}

fn default_window_minutes() -> i64 {
    5
}

fn default_utc_offset_hours() -> i32 {
    9
}

fn default_http_timeout_sec() -> u64 {
    30
}

impl Config {
    pub fn load() -> Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config.toml").required(false))
            .add_source(config::Environment::with_prefix("AUTOPRESS").separator("__"));

        builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    pub fn log_level(&self) -> tracing::Level {
        match self.logging.level.to_lowercase().as_str() {
            "error" => tracing::Level::ERROR,
            "warn" => tracing::Level::WARN,
            "info" => tracing::Level::INFO,
            "debug" => tracing::Level::DEBUG,
            "trace" => tracing::Level::TRACE,
            _ => tracing::Level::INFO,
        }
    }
}
