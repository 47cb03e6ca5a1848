//! Weather API client for fetching current conditions
//!
//! Integrates with OpenWeatherMap's current-weather endpoint. Locations are
//! resolved to coordinates through the shared city gazetteer.

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{find_city, GpsCoordinates, WeatherSample};

use crate::error::{AppError, AppResult};

/// Source of current weather conditions for a named location
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch current conditions for `location`
    async fn current_conditions(&self, location: &str) -> AppResult<WeatherSample>;

    /// Fail fast when the provider cannot make requests at all
    fn ensure_configured(&self) -> AppResult<()> {
        Ok(())
    }

    /// Name of this provider for logging
    fn provider_name(&self) -> &str;
}

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    weather: Vec<OWMWeather>,
    main: OWMMain,
    wind: OWMWind,
    rain: Option<OWMRain>,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    pressure: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    /// Metres per second
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OWMRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(
            api_key,
            "https://api.openweathermap.org/data/2.5".to_string(),
        )
    }

    /// Create a new WeatherClient with custom base URL (for testing)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch current weather conditions by GPS coordinates
    pub async fn get_current_weather(
        &self,
        location: &str,
        coordinates: GpsCoordinates,
    ) -> AppResult<WeatherSample> {
        let url = format!("{}/weather", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", coordinates.latitude.to_string()),
                ("lon", coordinates.longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::WeatherService(format!("Weather API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherService(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        let data: OWMCurrentResponse = response.json().await.map_err(|e| {
            AppError::WeatherService(format!("Failed to parse weather response: {}", e))
        })?;

        convert_current_response(location, data)
    }
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    async fn current_conditions(&self, location: &str) -> AppResult<WeatherSample> {
        self.ensure_configured()?;

        let city = find_city(location)
            .ok_or_else(|| AppError::UnknownLocation(location.to_string()))?;

        self.get_current_weather(location, city.coordinates()).await
    }

    fn ensure_configured(&self) -> AppResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "OpenWeather API key not configured".to_string(),
            ));
        }
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "openweathermap"
    }
}

fn decimal(field: &str, value: f64) -> AppResult<Decimal> {
    Decimal::from_f64(value).ok_or_else(|| {
        AppError::WeatherService(format!("Unrepresentable {} value: {}", field, value))
    })
}

/// Convert OpenWeatherMap current response to our format
///
/// Measurements are kept unrounded so threshold checks stay exact.
fn convert_current_response(location: &str, data: OWMCurrentResponse) -> AppResult<WeatherSample> {
    let rainfall = data.rain.and_then(|r| r.one_hour).unwrap_or(0.0);

    Ok(WeatherSample {
        location: location.to_string(),
        temperature: decimal("temperature", data.main.temp)?,
        humidity: decimal("humidity", data.main.humidity)?,
        rainfall_last_hour: decimal("rainfall", rainfall)?,
        // m/s to km/h
        wind_speed: decimal("wind speed", data.wind.speed)? * Decimal::new(36, 1),
        description: data
            .weather
            .first()
            .map(|w| w.description.clone())
            .unwrap_or_default(),
        pressure: decimal("pressure", data.main.pressure)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{classify, AlertLevel, AlertThresholds};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_convert_response_with_rain() {
        let json = r#"{
            "weather": [{"main": "Rain", "description": "heavy intensity rain", "icon": "10d"}],
            "main": {"temp": 27.4, "feels_like": 30.1, "pressure": 1002, "humidity": 91},
            "wind": {"speed": 15.0, "deg": 220},
            "rain": {"1h": 52.3},
            "name": "Mumbai"
        }"#;
        let data: OWMCurrentResponse = serde_json::from_str(json).unwrap();
        let sample = convert_current_response("Mumbai", data).unwrap();

        assert_eq!(sample.location, "Mumbai");
        assert_eq!(sample.rainfall_last_hour, dec("52.3"));
        assert_eq!(sample.wind_speed, dec("54"));
        assert_eq!(sample.humidity, dec("91"));
        assert_eq!(sample.pressure, dec("1002"));
        assert_eq!(sample.description, "heavy intensity rain");
    }

    #[test]
    fn test_convert_response_without_rain_block() {
        let json = r#"{
            "weather": [],
            "main": {"temp": 31.0, "pressure": 1010, "humidity": 40},
            "wind": {"speed": 2.5}
        }"#;
        let data: OWMCurrentResponse = serde_json::from_str(json).unwrap();
        let sample = convert_current_response("Jaipur", data).unwrap();

        assert_eq!(sample.rainfall_last_hour, Decimal::ZERO);
        assert_eq!(sample.wind_speed, dec("9"));
        assert_eq!(sample.description, "");
    }

    fn wind_only(speed_ms: f64) -> WeatherSample {
        let json = format!(
            r#"{{"weather": [], "main": {{"temp": 28.0, "pressure": 1008, "humidity": 40}}, "wind": {{"speed": {}}}}}"#,
            speed_ms
        );
        let data: OWMCurrentResponse = serde_json::from_str(&json).unwrap();
        convert_current_response("Surat", data).unwrap()
    }

    #[test]
    fn test_wind_just_below_critical_stays_warning() {
        let sample = wind_only(22.2222);
        assert_eq!(sample.wind_speed, dec("79.99992"));
        assert_eq!(
            classify(&sample, &AlertThresholds::default()),
            AlertLevel::Warning
        );
    }

    #[test]
    fn test_wind_just_below_warning_stays_safe() {
        let sample = wind_only(13.8888);
        assert_eq!(sample.wind_speed, dec("49.99968"));
        assert_eq!(
            classify(&sample, &AlertThresholds::default()),
            AlertLevel::Safe
        );
    }

    #[test]
    fn test_unrepresentable_measurement_is_weather_error() {
        let err = decimal("temperature", f64::NAN).unwrap_err();
        assert!(matches!(err, AppError::WeatherService(_)));
    }

    #[tokio::test]
    async fn test_missing_api_key_is_configuration_error() {
        let client = WeatherClient::with_base_url("  ".into(), "http://127.0.0.1:9".into());
        assert!(matches!(
            client.ensure_configured(),
            Err(AppError::Configuration(_))
        ));
        assert!(matches!(
            client.current_conditions("Mumbai").await,
            Err(AppError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_location_is_rejected_without_request() {
        let client = WeatherClient::with_base_url("key".into(), "http://127.0.0.1:9".into());
        let err = client.current_conditions("Atlantis").await.unwrap_err();
        assert!(matches!(err, AppError::UnknownLocation(loc) if loc == "Atlantis"));
    }
}
