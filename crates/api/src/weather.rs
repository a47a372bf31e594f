//! OpenWeatherMap forecast client.
//!
//! Event detail responses include a short-term forecast when the first
//! bookable date falls within the provider's 5-day window. The client is
//! optional: without `WEATHER_API_KEY` events are served without forecasts.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default OpenWeatherMap API base URL.
pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org/data/2.5";

/// Timeout for forecast requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Zoom level used in generated weather map links.
const MAP_ZOOM: u8 = 10;

/// Forecast provider configuration.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub api_key: String,
    pub base_url: String,
}

impl WeatherConfig {
    /// Load forecast configuration from environment variables.
    ///
    /// Returns `None` when `WEATHER_API_KEY` is unset, which disables
    /// forecast lookups.
    ///
    /// | Variable           | Default                                  | Description        |
    /// |--------------------|------------------------------------------|--------------------|
    /// | `WEATHER_API_KEY`  | (none)                                   | API key, required  |
    /// | `WEATHER_BASE_URL` | `http://api.openweathermap.org/data/2.5` | Provider base URL  |
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("WEATHER_API_KEY").ok()?;

        let base_url =
            std::env::var("WEATHER_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Some(Self { api_key, base_url })
    }
}

/// Errors that can occur while fetching a forecast.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Forecast request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Forecast provider returned HTTP status {0}")]
    HttpStatus(u16),
}

/// Raw 5-day/3-hour forecast response from the provider.
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub city: ForecastCity,
    pub list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastCity {
    pub name: String,
}

/// One 3-hour forecast slot.
#[derive(Debug, Deserialize)]
pub struct ForecastEntry {
    /// Forecast time (unix timestamp, seconds).
    pub dt: i64,
    pub main: ForecastMain,
    #[serde(default)]
    pub weather: Vec<ForecastCondition>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastMain {
    /// Temperature in degrees Celsius (`units=metric`).
    pub temp: f64,
}

#[derive(Debug, Deserialize)]
pub struct ForecastCondition {
    pub main: String,
    pub description: String,
}

/// Forecast summary attached to event detail responses.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub city: String,
    pub temperature: f64,
    pub conditions: String,
    pub description: String,
    pub map_link: String,
}

/// HTTP client for the OpenWeatherMap forecast API.
pub struct WeatherClient {
    client: reqwest::Client,
    config: WeatherConfig,
}

impl WeatherClient {
    pub fn new(config: WeatherConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");

        Self { client, config }
    }

    /// Fetch the raw 5-day forecast for a coordinate pair.
    pub async fn forecast(&self, lat: f64, lng: f64) -> Result<ForecastResponse, WeatherError> {
        let url = format!("{}/forecast", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lng.to_string()),
                ("units", "metric".to_string()),
                ("appid", self.config.api_key.clone()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WeatherError::HttpStatus(response.status().as_u16()));
        }

        Ok(response.json::<ForecastResponse>().await?)
    }

    /// Build a forecast summary for the given coordinates and target time.
    ///
    /// Returns `Ok(None)` when the provider has no forecast entries.
    pub async fn report_for(
        &self,
        lat: f64,
        lng: f64,
        target_unix: i64,
    ) -> Result<Option<WeatherReport>, WeatherError> {
        let forecast = self.forecast(lat, lng).await?;

        let Some(entry) = closest_entry(&forecast.list, target_unix) else {
            return Ok(None);
        };

        let (conditions, description) = entry
            .weather
            .first()
            .map(|c| (c.main.clone(), c.description.clone()))
            .unwrap_or_default();

        Ok(Some(WeatherReport {
            city: forecast.city.name,
            temperature: entry.main.temp,
            conditions,
            description,
            map_link: map_link(lat, lng),
        }))
    }
}

/// Pick the forecast entry whose time is closest to the target timestamp.
pub fn closest_entry(entries: &[ForecastEntry], target: i64) -> Option<&ForecastEntry> {
    entries.iter().min_by_key(|e| (e.dt - target).abs())
}

/// Link to an interactive temperature map centered on the coordinates.
pub fn map_link(lat: f64, lng: f64) -> String {
    format!(
        "https://openweathermap.org/weathermap?basemap=map&cities=true&layer=temperature&lat={lat}&lon={lng}&zoom={MAP_ZOOM}"
    )
}
