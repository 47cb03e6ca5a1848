//! Weather monitoring passes
//!
//! A pass fetches current conditions for every registered location,
//! classifies them and hands warning and critical alerts to the notifier
//! as detached tasks. The scheduler repeats passes on a fixed interval.

use futures_util::future::join_all;
use shared::{classify, AlertThresholds, LocationResult, MonitorReport};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;

use super::notification::NotificationService;
use super::templates;
use crate::error::AppResult;
use crate::external::WeatherProvider;
use crate::store::RegistrationStore;

/// Report of a pass plus the alert dispatches it started
pub struct MonitorPass {
    pub report: MonitorReport,
    /// Detached notifier tasks; callers may drop these
    pub dispatches: Vec<JoinHandle<()>>,
}

#[derive(Clone)]
pub struct MonitorService {
    store: Arc<dyn RegistrationStore>,
    weather: Arc<dyn WeatherProvider>,
    notifier: NotificationService,
    thresholds: Arc<AlertThresholds>,
}

impl MonitorService {
    pub fn new(
        store: Arc<dyn RegistrationStore>,
        weather: Arc<dyn WeatherProvider>,
        notifier: NotificationService,
        thresholds: Arc<AlertThresholds>,
    ) -> Self {
        Self {
            store,
            weather,
            notifier,
            thresholds,
        }
    }

    /// Run one poll-classify-dispatch cycle over every registered location
    pub async fn run_pass(&self) -> AppResult<MonitorPass> {
        self.weather.ensure_configured()?;

        let locations = self.store.distinct_locations().await?;
        tracing::info!(
            provider = self.weather.provider_name(),
            "Monitoring {} locations: {:?}",
            locations.len(),
            locations
        );

        let fetches = locations.iter().map(|location| async move {
            (location, self.weather.current_conditions(location).await)
        });
        let samples = join_all(fetches).await;

        let mut results = Vec::with_capacity(samples.len());
        let mut dispatches = Vec::new();

        for (location, outcome) in samples {
            let sample = match outcome {
                Ok(sample) => sample,
                Err(e) => {
                    tracing::warn!("Error fetching weather for {}: {}", location, e);
                    results.push(LocationResult::error(
                        location.clone(),
                        format!("Failed to fetch weather data: {}", e),
                    ));
                    continue;
                }
            };

            let level = classify(&sample, &self.thresholds);
            tracing::info!(
                "{}: {}°C, {}mm/hr, {}km/h - {}",
                location,
                sample.temperature,
                sample.rainfall_last_hour,
                sample.wind_speed,
                level.as_str().to_uppercase()
            );

            if !level.requires_broadcast() {
                results.push(LocationResult::normal(&sample));
                continue;
            }

            let alert = templates::alert_for_sample(level, &sample);
            let notifier = self.notifier.clone();
            dispatches.push(tokio::spawn(async move {
                match notifier.broadcast(&alert).await {
                    Ok(summary) => tracing::info!(
                        "Alert result for {}: {} sent, {} failed",
                        alert.location,
                        summary.emails_sent,
                        summary.emails_failed
                    ),
                    Err(e) => tracing::error!("Failed to send alert for {}: {}", alert.location, e),
                }
            }));

            results.push(LocationResult::alert_sent(&sample, level));
        }

        Ok(MonitorPass {
            report: MonitorReport::new(results),
            dispatches,
        })
    }

    /// Run passes every `interval_seconds` until `shutdown` flips to true
    /// or its sender is dropped
    ///
    /// A failed pass is logged and the loop carries on.
    pub async fn run_scheduled(self, interval_seconds: u64, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(Duration::from_secs(interval_seconds));

        tracing::info!("Weather monitoring started (interval: {}s)", interval_seconds);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match self.run_pass().await {
                        Ok(pass) => tracing::info!(
                            "Monitoring pass checked {} locations, {} alerts, {} errors",
                            pass.report.locations_checked,
                            pass.report.alerts_sent(),
                            pass.report.errors()
                        ),
                        Err(e) => tracing::error!("Monitoring pass failed: {}", e),
                    }
                }

                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("Weather monitoring stopped");
    }
}
