//! Registration storage
//!
//! Handlers and services only see [`RegistrationStore`]; the server picks
//! Postgres or the in-memory store at startup.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use shared::{AlertLevel, Registration};

use crate::error::AppResult;

pub use memory::MemoryStore;
pub use postgres::PgRegistrationStore;

/// Persistence for subscriber registrations
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Persist a new registration
    async fn insert(&self, registration: &Registration) -> AppResult<()>;

    /// Registrations for exactly `location` subscribed to `level`,
    /// regardless of notification channel
    async fn find_subscribers(
        &self,
        location: &str,
        level: AlertLevel,
    ) -> AppResult<Vec<Registration>>;

    /// Distinct, non-empty locations with at least one registration
    async fn distinct_locations(&self) -> AppResult<Vec<String>>;

    /// Whether the backing storage is reachable
    async fn is_healthy(&self) -> bool {
        true
    }

    /// Short backend name reported by the health endpoint
    fn backend_name(&self) -> &'static str;
}
