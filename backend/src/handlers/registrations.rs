//! HTTP handlers for subscriber registration

use axum::{extract::State, http::StatusCode, Json};
use shared::NewRegistration;

use super::ValidJson;
use crate::error::AppResult;
use crate::services::RegistrationOutcome;
use crate::AppState;

/// Register a subscriber and send the confirmation email
pub async fn create_registration(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<NewRegistration>,
) -> AppResult<(StatusCode, Json<RegistrationOutcome>)> {
    let outcome = state.registration_service().register(input).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}
