//! FloodWatch flood-alert notification service
//!
//! Polls current weather for every registered city, classifies flood risk
//! and emails subscribers of the affected locations.

use axum::{routing::get, Router};
use shared::AlertThresholds;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod store;

pub use config::Config;

use external::{EmailSender, WeatherProvider};
use services::{MonitorService, NotificationService, RegistrationService};
use store::RegistrationStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RegistrationStore>,
    pub weather: Arc<dyn WeatherProvider>,
    pub email: Arc<dyn EmailSender>,
    pub thresholds: Arc<AlertThresholds>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn RegistrationStore>,
        weather: Arc<dyn WeatherProvider>,
        email: Arc<dyn EmailSender>,
    ) -> Self {
        Self {
            store,
            weather,
            email,
            thresholds: Arc::new(config.thresholds.clone()),
            config: Arc::new(config),
        }
    }

    pub fn notification_service(&self) -> NotificationService {
        NotificationService::new(
            self.store.clone(),
            self.email.clone(),
            &self.config.email.alert_sender,
        )
    }

    pub fn registration_service(&self) -> RegistrationService {
        RegistrationService::new(
            self.store.clone(),
            self.email.clone(),
            &self.config.email.registration_sender,
        )
    }

    pub fn monitor_service(&self) -> MonitorService {
        MonitorService::new(
            self.store.clone(),
            self.weather.clone(),
            self.notification_service(),
            self.thresholds.clone(),
        )
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "FloodWatch Alert API v1"
}
