//! Weather data models and alert-level classification

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Current conditions for one monitored location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSample {
    pub location: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub temperature: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub humidity: Decimal,
    /// Millimetres of rain in the last hour
    #[serde(with = "rust_decimal::serde::float")]
    pub rainfall_last_hour: Decimal,
    /// Kilometres per hour
    #[serde(with = "rust_decimal::serde::float")]
    pub wind_speed: Decimal,
    pub description: String,
    /// Hectopascals
    #[serde(with = "rust_decimal::serde::float")]
    pub pressure: Decimal,
}

/// Compact view of a sample reported back by a monitoring pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    #[serde(with = "rust_decimal::serde::float")]
    pub temperature: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub rainfall: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub wind_speed: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub humidity: Decimal,
    pub description: String,
}

impl From<&WeatherSample> for WeatherSnapshot {
    fn from(sample: &WeatherSample) -> Self {
        Self {
            temperature: sample.temperature,
            rainfall: sample.rainfall_last_hour,
            wind_speed: sample.wind_speed,
            humidity: sample.humidity,
            description: sample.description.clone(),
        }
    }
}

/// Severity of a flood alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Safe,
    Warning,
    Critical,
}

impl AlertLevel {
    pub const ALL: [AlertLevel; 3] = [AlertLevel::Critical, AlertLevel::Warning, AlertLevel::Safe];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Critical => "critical",
            AlertLevel::Warning => "warning",
            AlertLevel::Safe => "safe",
        }
    }

    /// Only warning and critical conditions trigger a broadcast
    pub fn requires_broadcast(&self) -> bool {
        matches!(self, AlertLevel::Warning | AlertLevel::Critical)
    }

    pub fn icon(&self) -> &'static str {
        match self {
            AlertLevel::Critical => "🚨",
            AlertLevel::Warning => "⚠️",
            AlertLevel::Safe => "✅",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(AlertLevel::Critical),
            "warning" => Ok(AlertLevel::Warning),
            "safe" => Ok(AlertLevel::Safe),
            other => Err(format!("Unknown alert level: {}", other)),
        }
    }
}

/// Threshold configuration for alert classification
///
/// Units match [`WeatherSample`]: mm/hour, km/h and percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    pub critical_rainfall: Decimal,
    pub warning_rainfall: Decimal,
    pub critical_wind_speed: Decimal,
    pub warning_wind_speed: Decimal,
    pub critical_humidity: Decimal,
    pub warning_humidity: Decimal,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            critical_rainfall: Decimal::from(50),
            warning_rainfall: Decimal::from(25),
            critical_wind_speed: Decimal::from(80),
            warning_wind_speed: Decimal::from(50),
            critical_humidity: Decimal::from(95),
            warning_humidity: Decimal::from(85),
        }
    }
}

/// Classify a weather sample into an alert level
///
/// Critical is checked before warning; any single driver at or above its
/// threshold is enough.
pub fn classify(sample: &WeatherSample, thresholds: &AlertThresholds) -> AlertLevel {
    if sample.rainfall_last_hour >= thresholds.critical_rainfall
        || sample.wind_speed >= thresholds.critical_wind_speed
        || sample.humidity >= thresholds.critical_humidity
    {
        return AlertLevel::Critical;
    }

    if sample.rainfall_last_hour >= thresholds.warning_rainfall
        || sample.wind_speed >= thresholds.warning_wind_speed
        || sample.humidity >= thresholds.warning_humidity
    {
        return AlertLevel::Warning;
    }

    AlertLevel::Safe
}
