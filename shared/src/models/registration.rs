//! Subscriber registration models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::weather::AlertLevel;

/// Channels a subscriber wants to be notified on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationChannels {
    pub email: bool,
    pub sms: bool,
    pub push: bool,
}

impl NotificationChannels {
    pub fn any(&self) -> bool {
        self.email || self.sms || self.push
    }

    /// Human-readable channel names, in a stable order
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.email {
            labels.push("email");
        }
        if self.sms {
            labels.push("sms");
        }
        if self.push {
            labels.push("push");
        }
        labels
    }
}

/// Alert levels a subscriber wants to receive
///
/// Levels left out of a submitted object are off. Only a missing object
/// falls back to [`AlertSubscriptions::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSubscriptions {
    #[serde(default)]
    pub critical: bool,
    #[serde(default)]
    pub warning: bool,
    #[serde(default)]
    pub safe: bool,
}

impl Default for AlertSubscriptions {
    /// New subscribers receive critical alerts unless they say otherwise
    fn default() -> Self {
        Self {
            critical: true,
            warning: false,
            safe: false,
        }
    }
}

impl AlertSubscriptions {
    pub fn includes(&self, level: AlertLevel) -> bool {
        match level {
            AlertLevel::Critical => self.critical,
            AlertLevel::Warning => self.warning,
            AlertLevel::Safe => self.safe,
        }
    }

    pub fn any(&self) -> bool {
        self.critical || self.warning || self.safe
    }

    pub fn labels(&self) -> Vec<&'static str> {
        AlertLevel::ALL
            .iter()
            .filter(|level| self.includes(**level))
            .map(|level| level.as_str())
            .collect()
    }
}

/// A persisted subscriber
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub notifications: NotificationChannels,
    pub alert_levels: AlertSubscriptions,
    pub created_at: DateTime<Utc>,
}

impl Registration {
    /// Whether this subscriber should receive an email for `level` in `location`
    pub fn wants_email_for(&self, location: &str, level: AlertLevel) -> bool {
        self.location == location && self.alert_levels.includes(level) && self.notifications.email
    }
}

/// A registration as submitted by a subscriber
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRegistration {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub location: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub notifications: NotificationChannels,
    #[serde(default)]
    pub alert_levels: AlertSubscriptions,
}

impl NewRegistration {
    /// Trim text fields and drop empty optional ones
    pub fn normalized(self) -> Self {
        fn optional(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: optional(self.phone),
            location: self.location.trim().to_string(),
            state: optional(self.state),
            notifications: self.notifications,
            alert_levels: self.alert_levels,
        }
    }

    /// Assign an identity and creation time
    pub fn into_registration(self) -> Registration {
        Registration {
            id: Uuid::new_v4(),
            name: self.name,
            email: self.email,
            phone: self.phone,
            location: self.location,
            state: self.state,
            notifications: self.notifications,
            alert_levels: self.alert_levels,
            created_at: Utc::now(),
        }
    }
}
