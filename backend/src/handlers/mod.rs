//! HTTP request handlers

pub mod alerts;
pub mod health;
pub mod locations;
pub mod monitor;
pub mod registrations;

pub use alerts::broadcast_alert;
pub use health::health_check;
pub use locations::list_locations;
pub use monitor::run_monitor;
pub use registrations::create_registration;

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON body extractor that reports malformed bodies as validation errors
pub struct ValidJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| ValidJson(value))
            .map_err(|rejection| AppError::Validation {
                field: "body".to_string(),
                message: rejection.body_text(),
            })
    }
}
