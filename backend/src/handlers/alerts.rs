//! HTTP handlers for location alert broadcasts

use axum::{extract::State, Json};
use shared::{AlertMessage, BroadcastSummary};

use super::ValidJson;
use crate::error::AppResult;
use crate::AppState;

/// Email an alert to every subscriber of its location and level
pub async fn broadcast_alert(
    State(state): State<AppState>,
    ValidJson(alert): ValidJson<AlertMessage>,
) -> AppResult<Json<BroadcastSummary>> {
    let summary = state.notification_service().broadcast(&alert).await?;
    Ok(Json(summary))
}
