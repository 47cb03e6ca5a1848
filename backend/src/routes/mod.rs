//! Route definitions for the FloodWatch API

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::require_admin, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Public routes
        .route("/health", get(handlers::health_check))
        .route("/locations", get(handlers::list_locations))
        .route("/registrations", post(handlers::create_registration))
        // Admin routes, token-guarded when configured
        .merge(admin_routes(state))
}

/// Alert broadcast and monitoring routes
fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/alerts/broadcast", post(handlers::broadcast_alert))
        .route("/monitor/run", post(handlers::run_monitor))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}
