//! HTTP handlers for on-demand weather monitoring

use axum::{extract::State, Json};
use shared::MonitorReport;

use crate::error::AppResult;
use crate::AppState;

/// Run one monitoring pass
///
/// Responds once every location is classified; alert emails keep going in
/// the background.
pub async fn run_monitor(State(state): State<AppState>) -> AppResult<Json<MonitorReport>> {
    let pass = state.monitor_service().run_pass().await?;
    Ok(Json(pass.report))
}
