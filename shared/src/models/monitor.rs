//! Monitoring pass report models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::weather::{AlertLevel, WeatherSample, WeatherSnapshot};

/// Outcome category for one location in a monitoring pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationStatus {
    Error,
    AlertSent,
    Normal,
}

/// Per-location result of a monitoring pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationResult {
    pub location: String,
    pub status: LocationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_level: Option<AlertLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherSnapshot>,
}

impl LocationResult {
    pub fn error(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            status: LocationStatus::Error,
            alert_level: None,
            message: Some(message.into()),
            weather: None,
        }
    }

    pub fn alert_sent(sample: &WeatherSample, level: AlertLevel) -> Self {
        Self {
            location: sample.location.clone(),
            status: LocationStatus::AlertSent,
            alert_level: Some(level),
            message: None,
            weather: Some(WeatherSnapshot::from(sample)),
        }
    }

    pub fn normal(sample: &WeatherSample) -> Self {
        Self {
            location: sample.location.clone(),
            status: LocationStatus::Normal,
            alert_level: None,
            message: None,
            weather: Some(WeatherSnapshot::from(sample)),
        }
    }
}

/// Summary returned by a monitoring pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorReport {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub locations_checked: usize,
    pub results: Vec<LocationResult>,
}

impl MonitorReport {
    pub fn new(results: Vec<LocationResult>) -> Self {
        Self {
            success: true,
            message: "Weather monitoring completed".to_string(),
            timestamp: Utc::now(),
            locations_checked: results.len(),
            results,
        }
    }

    pub fn alerts_sent(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status == LocationStatus::AlertSent)
            .count()
    }

    pub fn errors(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status == LocationStatus::Error)
            .count()
    }
}
