use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{
    config::OpenWeatherConfig,
    error::FetchError,
    model::{Category, Coordinates, WeatherCondition},
};

use super::WeatherProvider;

const CURRENT_PATH: &str = "/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    lang: String,
    http: Client,
}

/// Which selector a request carries; decides how a 404 is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    Coordinates,
    City,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, config: &OpenWeatherConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        // Zero disables the timeout.
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let http = builder.build().context("Failed to build HTTP client for OpenWeather")?;

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            lang: config.lang.clone(),
            http,
        })
    }

    async fn fetch_current(
        &self,
        selector: &[(&str, String)],
        lookup: Lookup,
    ) -> Result<WeatherCondition, FetchError> {
        let url = format!("{}{}", self.base_url, CURRENT_PATH);

        let res = self
            .http
            .get(&url)
            .query(selector)
            .query(&[
                ("units", "metric"),
                ("lang", self.lang.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| network("Failed to send request to OpenWeather", e.without_url()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| network("Failed to read OpenWeather response body", e.without_url()))?;

        if status == StatusCode::NOT_FOUND && lookup == Lookup::City {
            debug!(status = %status, "OpenWeather reported unknown city");
            return Err(FetchError::CityNotFound);
        }

        if !status.is_success() {
            warn!(status = %status, body = %truncate_body(&body), "OpenWeather request failed");
            return Err(FetchError::Network(format!(
                "OpenWeather request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| network("Failed to parse OpenWeather current JSON", e))?;

        Ok(parsed.into_condition())
    }
}

/// reqwest errors must have their URL stripped first: the query carries the API key.
fn network(context: &str, err: impl std::fmt::Display) -> FetchError {
    warn!(error = %err, "{context}");
    FetchError::Network(format!("{context}: {err}"))
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: Option<i64>,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl OwCurrentResponse {
    fn into_condition(self) -> WeatherCondition {
        let (category, description) = self
            .weather
            .into_iter()
            .next()
            .map(|w| (Category::from_provider(&w.main), w.description))
            .unwrap_or((Category::Other, String::new()));

        let observed_at = self.dt.and_then(unix_to_utc).unwrap_or_else(Utc::now);

        WeatherCondition::builder(category, self.name)
            .description(description)
            .temperature_c(self.main.temp)
            .feels_like_c(self.main.feels_like)
            .humidity_pct(self.main.humidity)
            .wind_speed_mps(self.wind.speed)
            .observed_at(observed_at)
            .build()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn by_coordinates(&self, at: Coordinates) -> Result<WeatherCondition, FetchError> {
        let selector = [("lat", at.latitude.to_string()), ("lon", at.longitude.to_string())];
        self.fetch_current(&selector, Lookup::Coordinates).await
    }

    async fn by_city_name(&self, name: &str) -> Result<WeatherCondition, FetchError> {
        let selector = [("q", name.to_string())];
        self.fetch_current(&selector, Lookup::City).await
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
