//! In-memory registration store used when no database is configured

use async_trait::async_trait;
use shared::{AlertLevel, Registration};
use std::collections::BTreeSet;
use tokio::sync::RwLock;

use super::RegistrationStore;
use crate::error::AppResult;

#[derive(Default)]
pub struct MemoryStore {
    registrations: RwLock<Vec<Registration>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored registrations
    pub async fn len(&self) -> usize {
        self.registrations.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn insert(&self, registration: &Registration) -> AppResult<()> {
        self.registrations.write().await.push(registration.clone());
        Ok(())
    }

    async fn find_subscribers(
        &self,
        location: &str,
        level: AlertLevel,
    ) -> AppResult<Vec<Registration>> {
        let registrations = self.registrations.read().await;
        Ok(registrations
            .iter()
            .filter(|r| r.location == location && r.alert_levels.includes(level))
            .cloned()
            .collect())
    }

    async fn distinct_locations(&self) -> AppResult<Vec<String>> {
        let registrations = self.registrations.read().await;
        let locations: BTreeSet<&str> = registrations
            .iter()
            .map(|r| r.location.as_str())
            .filter(|l| !l.trim().is_empty())
            .collect();
        Ok(locations.into_iter().map(str::to_string).collect())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
