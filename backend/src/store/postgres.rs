//! PostgreSQL registration store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{AlertLevel, AlertSubscriptions, NotificationChannels, Registration};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::RegistrationStore;
use crate::error::AppResult;

const SELECT_COLUMNS: &str = r#"
    SELECT id, name, email, phone, location, state,
           notification_email, notification_sms, notification_push,
           alert_critical, alert_warning, alert_safe, created_at
    FROM user_registrations
"#;

#[derive(Clone)]
pub struct PgRegistrationStore {
    db: PgPool,
}

/// Row shape of `user_registrations`
#[derive(Debug, FromRow)]
struct RegistrationRow {
    id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    location: String,
    state: Option<String>,
    notification_email: bool,
    notification_sms: bool,
    notification_push: bool,
    alert_critical: bool,
    alert_warning: bool,
    alert_safe: bool,
    created_at: DateTime<Utc>,
}

impl From<RegistrationRow> for Registration {
    fn from(row: RegistrationRow) -> Self {
        Registration {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            location: row.location,
            state: row.state,
            notifications: NotificationChannels {
                email: row.notification_email,
                sms: row.notification_sms,
                push: row.notification_push,
            },
            alert_levels: AlertSubscriptions {
                critical: row.alert_critical,
                warning: row.alert_warning,
                safe: row.alert_safe,
            },
            created_at: row.created_at,
        }
    }
}

/// Subscription column for an alert level
fn level_column(level: AlertLevel) -> &'static str {
    match level {
        AlertLevel::Critical => "alert_critical",
        AlertLevel::Warning => "alert_warning",
        AlertLevel::Safe => "alert_safe",
    }
}

impl PgRegistrationStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RegistrationStore for PgRegistrationStore {
    async fn insert(&self, registration: &Registration) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_registrations (
                id, name, email, phone, location, state,
                notification_email, notification_sms, notification_push,
                alert_critical, alert_warning, alert_safe, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(registration.id)
        .bind(&registration.name)
        .bind(&registration.email)
        .bind(&registration.phone)
        .bind(&registration.location)
        .bind(&registration.state)
        .bind(registration.notifications.email)
        .bind(registration.notifications.sms)
        .bind(registration.notifications.push)
        .bind(registration.alert_levels.critical)
        .bind(registration.alert_levels.warning)
        .bind(registration.alert_levels.safe)
        .bind(registration.created_at)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn find_subscribers(
        &self,
        location: &str,
        level: AlertLevel,
    ) -> AppResult<Vec<Registration>> {
        let query = format!(
            "{} WHERE location = $1 AND {} = TRUE ORDER BY created_at",
            SELECT_COLUMNS,
            level_column(level)
        );

        let rows = sqlx::query_as::<_, RegistrationRow>(&query)
            .bind(location)
            .fetch_all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Registration::from).collect())
    }

    async fn distinct_locations(&self) -> AppResult<Vec<String>> {
        let locations = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT location
            FROM user_registrations
            WHERE btrim(location) <> ''
            ORDER BY location
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(locations)
    }

    async fn is_healthy(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.db).await.is_ok()
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
