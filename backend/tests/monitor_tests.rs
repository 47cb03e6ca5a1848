//! Weather monitoring pass tests

mod common;

use common::{
    registration, sample, seeded_store, test_state, FakeWeather, RecordingSender, SlowSender,
};
use floodwatch_backend::error::AppError;
use floodwatch_backend::external::WeatherClient;
use floodwatch_backend::{AppState, Config};
use shared::{AlertLevel, LocationStatus};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

#[tokio::test]
async fn test_pass_classifies_each_location_and_dispatches_alerts() {
    let store = seeded_store(&[
        registration("m1@example.com", "Mumbai", (true, false, false)),
        registration("m2@example.com", "Mumbai", (true, true, false)),
        registration("c1@example.com", "Chennai", (true, true, false)),
        registration("d1@example.com", "Delhi", (true, true, true)),
    ])
    .await;
    let weather = FakeWeather::default()
        .with(sample("Mumbai", "60", "10", "50"))
        .with(sample("Chennai", "30", "10", "50"))
        .with(sample("Delhi", "5", "10", "40"));
    let sender = Arc::new(RecordingSender::default());
    let state = test_state(store, weather, sender.clone());

    let pass = state.monitor_service().run_pass().await.unwrap();
    let report = &pass.report;

    assert!(report.success);
    assert_eq!(report.message, "Weather monitoring completed");
    assert_eq!(report.locations_checked, 3);
    assert_eq!(report.alerts_sent(), 2);
    assert_eq!(report.errors(), 0);

    let mumbai = report.results.iter().find(|r| r.location == "Mumbai").unwrap();
    assert_eq!(mumbai.status, LocationStatus::AlertSent);
    assert_eq!(mumbai.alert_level, Some(AlertLevel::Critical));
    assert!(mumbai.weather.is_some());

    let delhi = report.results.iter().find(|r| r.location == "Delhi").unwrap();
    assert_eq!(delhi.status, LocationStatus::Normal);
    assert_eq!(delhi.alert_level, None);

    for dispatch in pass.dispatches {
        dispatch.await.unwrap();
    }

    // Delhi is safe, so only Mumbai's two critical and Chennai's warning
    // subscribers are emailed
    assert_eq!(
        sender.recipients(),
        vec![
            "c1@example.com".to_string(),
            "m1@example.com".to_string(),
            "m2@example.com".to_string(),
        ]
    );
    let subjects: Vec<String> = sender.attempts().into_iter().map(|e| e.subject).collect();
    assert!(subjects.contains(&"🚨 CRITICAL FLOOD ALERT - Mumbai".to_string()));
    assert!(subjects.contains(&"⚠️ WARNING FLOOD ALERT - Chennai".to_string()));
}

#[tokio::test]
async fn test_fetch_failure_is_isolated_to_its_location() {
    let store = seeded_store(&[
        registration("a@example.com", "Atlantis", (true, false, false)),
        registration("b@example.com", "Jaipur", (true, false, false)),
    ])
    .await;
    let weather = FakeWeather::default().with(sample("Jaipur", "55", "10", "50"));
    let sender = Arc::new(RecordingSender::default());
    let state = test_state(store, weather, sender.clone());

    let pass = state.monitor_service().run_pass().await.unwrap();

    assert_eq!(pass.report.locations_checked, 2);
    assert_eq!(pass.report.errors(), 1);

    let failed = pass
        .report
        .results
        .iter()
        .find(|r| r.location == "Atlantis")
        .unwrap();
    assert_eq!(failed.status, LocationStatus::Error);
    assert!(failed.message.as_deref().unwrap().contains("Failed to fetch weather data"));

    for dispatch in pass.dispatches {
        dispatch.await.unwrap();
    }
    assert_eq!(sender.recipients(), vec!["b@example.com".to_string()]);
}

#[tokio::test]
async fn test_pass_with_no_registrations_is_empty() {
    let store = seeded_store(&[]).await;
    let state = test_state(store, FakeWeather::default(), Arc::new(RecordingSender::default()));

    let pass = state.monitor_service().run_pass().await.unwrap();

    assert_eq!(pass.report.locations_checked, 0);
    assert!(pass.report.results.is_empty());
    assert!(pass.dispatches.is_empty());
}

#[tokio::test]
async fn test_pass_returns_before_alert_emails_finish() {
    let store = seeded_store(&[registration("slow@example.com", "Mumbai", (true, false, false))]).await;
    let weather = FakeWeather::default().with(sample("Mumbai", "60", "10", "50"));
    let sender = Arc::new(SlowSender::new(Duration::from_secs(2)));
    let config = Config::with_defaults("test").unwrap();
    let state = AppState::new(config, store, Arc::new(weather), sender.clone());

    let started = Instant::now();
    let pass = state.monitor_service().run_pass().await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(pass.report.alerts_sent(), 1);
    assert_eq!(pass.dispatches.len(), 1);
    assert_eq!(sender.delivered_count(), 0);

    for dispatch in pass.dispatches {
        dispatch.await.unwrap();
    }
    assert_eq!(sender.delivered_count(), 1);
}

#[tokio::test]
async fn test_missing_weather_key_rejects_whole_pass() {
    let store = seeded_store(&[registration("a@example.com", "Mumbai", (true, false, false))]).await;
    let weather = WeatherClient::with_base_url(String::new(), "http://127.0.0.1:9".to_string());
    let sender = Arc::new(RecordingSender::default());
    let config = Config::with_defaults("test").unwrap();
    let state = AppState::new(config, store, Arc::new(weather), sender.clone());

    let result = state.monitor_service().run_pass().await;

    assert!(matches!(result, Err(AppError::Configuration(_))));
    assert!(sender.attempts().is_empty());
}

#[tokio::test]
async fn test_scheduler_stops_on_shutdown() {
    let store = seeded_store(&[]).await;
    let state = test_state(store, FakeWeather::default(), Arc::new(RecordingSender::default()));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let scheduler = tokio::spawn(state.monitor_service().run_scheduled(3600, shutdown_rx));
    shutdown_tx.send(true).unwrap();

    tokio::time::timeout(Duration::from_secs(5), scheduler)
        .await
        .expect("scheduler did not stop")
        .unwrap();
}
