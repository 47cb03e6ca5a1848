//! Monitored city listing

use axum::Json;
use shared::{CityInfo, MONITORED_CITIES};

/// List the cities the weather monitor can look up
pub async fn list_locations() -> Json<Vec<CityInfo>> {
    Json(MONITORED_CITIES.iter().map(CityInfo::from).collect())
}
