//! Fakes and builders shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use floodwatch_backend::error::{AppError, AppResult};
use floodwatch_backend::external::{EmailSender, OutgoingEmail, WeatherProvider};
use floodwatch_backend::store::{MemoryStore, RegistrationStore};
use floodwatch_backend::{AppState, Config};
use rust_decimal::Decimal;
use shared::{AlertSubscriptions, NewRegistration, NotificationChannels, Registration, WeatherSample};
use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn sample(location: &str, rainfall: &str, wind: &str, humidity: &str) -> WeatherSample {
    WeatherSample {
        location: location.to_string(),
        temperature: dec("28"),
        humidity: dec(humidity),
        rainfall_last_hour: dec(rainfall),
        wind_speed: dec(wind),
        description: "moderate rain".to_string(),
        pressure: dec("1004"),
    }
}

/// Weather provider serving canned samples; unknown locations fail
#[derive(Default)]
pub struct FakeWeather {
    samples: HashMap<String, WeatherSample>,
}

impl FakeWeather {
    pub fn with(mut self, sample: WeatherSample) -> Self {
        self.samples.insert(sample.location.clone(), sample);
        self
    }
}

#[async_trait]
impl WeatherProvider for FakeWeather {
    async fn current_conditions(&self, location: &str) -> AppResult<WeatherSample> {
        self.samples
            .get(location)
            .cloned()
            .ok_or_else(|| AppError::WeatherService(format!("no data for {}", location)))
    }

    fn provider_name(&self) -> &str {
        "fake"
    }
}

/// Email sender that records every attempt and fails for chosen addresses
#[derive(Default)]
pub struct RecordingSender {
    pub attempts: Mutex<Vec<OutgoingEmail>>,
    failing: HashSet<String>,
}

impl RecordingSender {
    pub fn failing_for(addresses: &[&str]) -> Self {
        Self {
            attempts: Mutex::new(Vec::new()),
            failing: addresses.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn recipients(&self) -> Vec<String> {
        let mut recipients: Vec<String> = self
            .attempts
            .lock()
            .unwrap()
            .iter()
            .flat_map(|e| e.to.clone())
            .collect();
        recipients.sort();
        recipients
    }

    pub fn attempts(&self) -> Vec<OutgoingEmail> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for RecordingSender {
    async fn send(&self, email: OutgoingEmail) -> AppResult<String> {
        let recipient = email.to.first().cloned().unwrap_or_default();
        self.attempts.lock().unwrap().push(email);

        if self.failing.contains(&recipient) {
            return Err(AppError::EmailDelivery(format!("rejected {}", recipient)));
        }
        Ok(format!("msg-{}", recipient))
    }
}

/// Email sender that takes `delay` to deliver each message
pub struct SlowSender {
    delay: Duration,
    pub delivered: Mutex<Vec<String>>,
}

impl SlowSender {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            delivered: Mutex::new(Vec::new()),
        }
    }

    pub fn delivered_count(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }
}

#[async_trait]
impl EmailSender for SlowSender {
    async fn send(&self, email: OutgoingEmail) -> AppResult<String> {
        tokio::time::sleep(self.delay).await;
        let recipient = email.to.first().cloned().unwrap_or_default();
        self.delivered.lock().unwrap().push(recipient.clone());
        Ok(format!("msg-{}", recipient))
    }
}

pub fn new_registration(email: &str, location: &str, levels: (bool, bool, bool)) -> NewRegistration {
    NewRegistration {
        name: email.split('@').next().unwrap_or_default().to_string(),
        email: email.to_string(),
        phone: None,
        location: location.to_string(),
        state: None,
        notifications: NotificationChannels {
            email: true,
            sms: false,
            push: false,
        },
        alert_levels: AlertSubscriptions {
            critical: levels.0,
            warning: levels.1,
            safe: levels.2,
        },
    }
}

pub fn registration(email: &str, location: &str, levels: (bool, bool, bool)) -> Registration {
    new_registration(email, location, levels).into_registration()
}

pub async fn seeded_store(registrations: &[Registration]) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    for r in registrations {
        store.insert(r).await.unwrap();
    }
    store
}

pub fn test_state(
    store: Arc<MemoryStore>,
    weather: FakeWeather,
    email: Arc<RecordingSender>,
) -> AppState {
    let config = Config::with_defaults("test").unwrap();
    AppState::new(config, store, Arc::new(weather), email)
}
