//! Transactional email delivery
//!
//! Sends HTML email through the Resend HTTP API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// A single outbound email
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Anything that can deliver an [`OutgoingEmail`]
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send one email and return the provider's message id
    async fn send(&self, email: OutgoingEmail) -> AppResult<String>;
}

/// Resend API client
#[derive(Clone)]
pub struct ResendClient {
    api_key: String,
    base_url: String,
    http_client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ResendSendResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ResendErrorResponse {
    message: Option<String>,
}

impl ResendClient {
    /// Create a new Resend client
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, "https://api.resend.com".to_string())
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl EmailSender for ResendClient {
    async fn send(&self, email: OutgoingEmail) -> AppResult<String> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "Email API key is not configured".to_string(),
            ));
        }

        let response = self
            .http_client
            .post(format!("{}/emails", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&email)
            .send()
            .await
            .map_err(|e| AppError::EmailDelivery(format!("Failed to send email: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<ResendErrorResponse>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(AppError::EmailDelivery(format!("{} - {}", status, message)));
        }

        let body: ResendSendResponse = response.json().await.map_err(|e| {
            AppError::EmailDelivery(format!("Failed to parse email response: {}", e))
        })?;

        Ok(body.id)
    }
}
