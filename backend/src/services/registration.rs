//! Subscriber registration

use serde::Serialize;
use shared::{validate_registration, NewRegistration, Registration};
use std::sync::Arc;

use super::templates;
use crate::error::AppResult;
use crate::external::{EmailSender, OutgoingEmail};
use crate::store::RegistrationStore;

/// Response body for a successful registration
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationOutcome {
    pub success: bool,
    pub registration: Registration,
    pub confirmation_sent: bool,
}

#[derive(Clone)]
pub struct RegistrationService {
    store: Arc<dyn RegistrationStore>,
    email: Arc<dyn EmailSender>,
    sender: String,
}

impl RegistrationService {
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

    /// Validate, persist and confirm a new registration
    ///
    /// The confirmation email is best effort: a send failure is logged and
    /// reported through `confirmation_sent`.
    pub async fn register(&self, input: NewRegistration) -> AppResult<RegistrationOutcome> {
        let input = input.normalized();
        validate_registration(&input)?;

        let registration = input.into_registration();
        self.store.insert(&registration).await?;

        tracing::info!(
            id = %registration.id,
            location = %registration.location,
            "Registered subscriber"
        );

        let email = OutgoingEmail {
            from: self.sender.clone(),
            to: vec![registration.email.clone()],
            subject: templates::REGISTRATION_SUBJECT.to_string(),
            html: templates::registration_email_html(&registration),
        };

        let confirmation_sent = match self.email.send(email).await {
            Ok(id) => {
                tracing::debug!("Confirmation email sent to {}: {}", registration.email, id);
                true
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to send confirmation email to {}: {}",
                    registration.email,
                    e
                );
                false
            }
        };

        Ok(RegistrationOutcome {
            success: true,
            registration,
            confirmation_sent,
        })
    }
}
