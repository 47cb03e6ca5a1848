//! Location alert broadcast models

use serde::{Deserialize, Serialize};

use super::weather::{AlertLevel, WeatherSample};

/// Free-form snapshot of the conditions behind an alert
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertConditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rainfall: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<String>,
}

impl AlertConditions {
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Labelled, populated entries in display order
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("Water Level", &self.water_level),
            ("Rainfall", &self.rainfall),
            ("Temperature", &self.temperature),
            ("Wind Speed", &self.wind_speed),
            ("Humidity", &self.humidity),
            ("Pressure", &self.pressure),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(|v| (label, v))
        })
        .collect()
    }
}

impl From<&WeatherSample> for AlertConditions {
    fn from(sample: &WeatherSample) -> Self {
        let water_level = if sample.rainfall_last_hour > rust_decimal::Decimal::ZERO {
            format!("{}mm rainfall/hour", sample.rainfall_last_hour)
        } else {
            "Normal".to_string()
        };

        Self {
            water_level: Some(water_level),
            rainfall: Some(format!("{}mm in last hour", sample.rainfall_last_hour)),
            temperature: Some(format!("{}°C", sample.temperature)),
            wind_speed: Some(format!("{} km/h", sample.wind_speed.round_dp(2))),
            humidity: Some(format!("{}%", sample.humidity)),
            pressure: Some(format!("{} hPa", sample.pressure)),
        }
    }
}

/// An alert to be fanned out to the subscribers of one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertMessage {
    pub location: String,
    pub alert_level: AlertLevel,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<AlertConditions>,
}

/// Outcome of a single recipient send
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryResult {
    pub email: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeliveryResult {
    pub fn sent(email: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            success: true,
            id: Some(id.into()),
            error: None,
        }
    }

    pub fn failed(email: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            success: false,
            id: None,
            error: Some(error.into()),
        }
    }
}

/// Aggregate outcome of a location alert broadcast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastSummary {
    pub success: bool,
    pub message: String,
    pub location: String,
    pub alert_level: AlertLevel,
    pub emails_sent: usize,
    pub emails_failed: usize,
    /// Registrations matching location and alert level, before the
    /// email-channel filter
    pub total_matched: usize,
    pub results: Vec<DeliveryResult>,
}

impl BroadcastSummary {
    pub fn from_results(alert: &AlertMessage, total_matched: usize, results: Vec<DeliveryResult>) -> Self {
        let emails_sent = results.iter().filter(|r| r.success).count();
        let emails_failed = results.len() - emails_sent;

        let message = if total_matched == 0 {
            format!(
                "No users registered for {} alerts in {}",
                alert.alert_level, alert.location
            )
        } else {
            "Location alert sent successfully".to_string()
        };

        Self {
            success: true,
            message,
            location: alert.location.clone(),
            alert_level: alert.alert_level,
            emails_sent,
            emails_failed,
            total_matched,
            results,
        }
    }
}
