//! Current weather and UV index from an HTTP provider.
//!
//! The provider only reports what it measures; the calculator decides what
//! the numbers mean. Any non-success status is surfaced as [`Error::Fetch`].

use crate::config::{WeatherConfig, API_KEY_ENV};
use crate::{Error, Location, Result, WeatherSnapshot};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

/// Source of current UV and weather conditions
pub trait UvProvider {
    fn current(&self, location: &Location) -> Result<WeatherSnapshot>;
}

// OpenWeather response shapes (only the fields we read)

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    name: Option<String>,
    main: MainSection,
    #[serde(default)]
    weather: Vec<Condition>,
    sys: Option<SysSection>,
}

#[derive(Debug, Deserialize)]
struct MainSection {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct SysSection {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UvResponse {
    value: f64,
}

/// Build a snapshot from the `/weather` and `/uvi` response bodies
pub fn parse_snapshot(weather_body: &str, uv_body: &str) -> Result<WeatherSnapshot> {
    let weather: WeatherResponse = serde_json::from_str(weather_body)?;
    let uv: UvResponse = serde_json::from_str(uv_body)?;

    Ok(WeatherSnapshot {
        uv_index: uv.value,
        temperature_c: weather.main.temp,
        description: weather
            .weather
            .into_iter()
            .next()
            .map(|c| c.description)
            .unwrap_or_default(),
        place: weather.name.filter(|n| !n.is_empty()),
        country: weather.sys.and_then(|s| s.country),
    })
}

/// OpenWeather client (current weather + UV index endpoints)
#[derive(Clone, Debug)]
pub struct OpenWeatherProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherProvider {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let api_key = config.resolved_api_key().ok_or_else(|| {
            Error::Config(format!(
                "no weather API key; set weather.api_key or {}",
                API_KEY_ENV
            ))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<String> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Weather API {} returned {}", endpoint, status);
            return Err(Error::Fetch(format!(
                "Weather API request failed ({})",
                status
            )));
        }

        Ok(response.text()?)
    }
}

impl UvProvider for OpenWeatherProvider {
    fn current(&self, location: &Location) -> Result<WeatherSnapshot> {
        let coords = [
            ("lat", location.latitude.to_string()),
            ("lon", location.longitude.to_string()),
        ];

        let mut weather_params = coords.to_vec();
        weather_params.push(("units", "metric".to_string()));

        let weather_body = self.get("weather", &weather_params)?;
        let uv_body = self.get("uvi", &coords)?;

        let snapshot = parse_snapshot(&weather_body, &uv_body)?;
        tracing::info!(
            "Fetched UV {:.1} at {:.2}, {:.2}",
            snapshot.uv_index,
            location.latitude,
            location.longitude
        );
        Ok(snapshot)
    }
}
