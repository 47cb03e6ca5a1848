//! Location alert broadcasting
//!
//! Selects the subscribers of a location and alert level, then emails each
//! of them concurrently. One recipient failing never affects the others.

use chrono::Utc;
use futures_util::future::join_all;
use shared::{validate_alert_message, AlertMessage, BroadcastSummary, DeliveryResult, Registration};
use std::sync::Arc;

use super::templates;
use crate::error::AppResult;
use crate::external::{EmailSender, OutgoingEmail};
use crate::store::RegistrationStore;

/// Notification service for fanning out location alerts
#[derive(Clone)]
pub struct NotificationService {
    store: Arc<dyn RegistrationStore>,
    email: Arc<dyn EmailSender>,
    sender: String,
}

impl NotificationService {
    pub fn new(
        store: Arc<dyn RegistrationStore>,
        email: Arc<dyn EmailSender>,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            store,
            email,
            sender: sender.into(),
        }
    }

    /// Send `alert` to every email subscriber of its location and level
    pub async fn broadcast(&self, alert: &AlertMessage) -> AppResult<BroadcastSummary> {
        validate_alert_message(alert)?;

        tracing::info!(
            location = %alert.location,
            level = %alert.alert_level,
            "Sending location alert: {}",
            alert.title
        );

        let matched = self
            .store
            .find_subscribers(&alert.location, alert.alert_level)
            .await?;

        if matched.is_empty() {
            tracing::info!(
                "No users registered for {} alerts in {}",
                alert.alert_level,
                alert.location
            );
            return Ok(BroadcastSummary::from_results(alert, 0, Vec::new()));
        }

        tracing::debug!(
            "Found {} registered users for {}",
            matched.len(),
            alert.location
        );

        let sends = matched
            .iter()
            .filter(|r| r.wants_email_for(&alert.location, alert.alert_level))
            .map(|recipient| self.deliver(alert, recipient));
        let results = join_all(sends).await;

        let summary = BroadcastSummary::from_results(alert, matched.len(), results);
        tracing::info!(
            location = %alert.location,
            "Alert sent to {} users, {} failures",
            summary.emails_sent,
            summary.emails_failed
        );

        Ok(summary)
    }

    async fn deliver(&self, alert: &AlertMessage, recipient: &Registration) -> DeliveryResult {
        let email = OutgoingEmail {
            from: self.sender.clone(),
            to: vec![recipient.email.clone()],
            subject: templates::alert_subject(alert.alert_level, &recipient.location),
            html: templates::alert_email_html(alert, recipient, Utc::now()),
        };

        match self.email.send(email).await {
            Ok(id) => {
                tracing::debug!("Email sent to {}: {}", recipient.email, id);
                DeliveryResult::sent(&recipient.email, id)
            }
            Err(e) => {
                tracing::warn!("Failed to send email to {}: {}", recipient.email, e);
                DeliveryResult::failed(&recipient.email, e.to_string())
            }
        }
    }
}
