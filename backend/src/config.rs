//! Configuration management for the FloodWatch alert service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with FLOODWATCH_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::AlertThresholds;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Email provider configuration
    pub email: EmailConfig,

    /// Scheduled monitoring configuration
    pub monitor: MonitorConfig,

    /// Alert classification thresholds
    #[serde(default)]
    pub thresholds: AlertThresholds,

    /// Admin access to broadcast and monitoring endpoints
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL; empty selects the in-memory store
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

impl DatabaseConfig {
    pub fn is_in_memory(&self) -> bool {
        self.url.trim().is_empty()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    /// Email API endpoint
    pub api_endpoint: String,

    /// Email API key
    pub api_key: String,

    /// From address for alert emails
    pub alert_sender: String,

    /// From address for registration confirmations
    pub registration_sender: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MonitorConfig {
    /// Seconds between scheduled passes; 0 disables the scheduler
    pub interval_seconds: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AdminConfig {
    /// Bearer token for admin endpoints; unset leaves them open
    pub token: Option<String>,
}

impl AdminConfig {
    /// Configured token, ignoring blank values
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("FLOODWATCH_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = Self::defaults(&environment)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FLOODWATCH_ prefix)
            .add_source(
                Environment::with_prefix("FLOODWATCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Configuration built from code defaults only, without files or
    /// environment overrides
    pub fn with_defaults(environment: &str) -> Result<Self, ConfigError> {
        Self::defaults(environment)?.build()?.try_deserialize()
    }

    /// Builder seeded with default values only
    fn defaults(
        environment: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("environment", environment)?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.url", "")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("weather.api_endpoint", "https://api.openweathermap.org/data/2.5")?
            .set_default("weather.api_key", "")?
            .set_default("email.api_endpoint", "https://api.resend.com")?
            .set_default("email.api_key", "")?
            .set_default("email.alert_sender", "FloodWatch System <noreply@resend.dev>")?
            .set_default(
                "email.registration_sender",
                "Weather Forecasting System <onboarding@resend.dev>",
            )?
            .set_default("monitor.interval_seconds", 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_defaults_deserialize() {
        let config = Config::with_defaults("test").unwrap();

        assert_eq!(config.environment, "test");
        assert_eq!(config.server.port, 3000);
        assert!(config.database.is_in_memory());
        assert_eq!(config.monitor.interval_seconds, 0);
        assert_eq!(config.thresholds, AlertThresholds::default());
        assert!(config.admin.token().is_none());
    }

    #[test]
    fn test_threshold_override() {
        let config: Config = Config::defaults("test")
            .unwrap()
            .set_override("thresholds.critical_rainfall", 40)
            .unwrap()
            .set_override("admin.token", "  ")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.thresholds.critical_rainfall, Decimal::from(40));
        assert_eq!(config.thresholds.warning_rainfall, Decimal::from(25));
        assert!(config.admin.token().is_none());
    }
}
