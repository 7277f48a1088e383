//! Current-temperature lookup by locality name.
//!
//! Two strategies behind one capability, chosen once at startup:
//! - `WeatherApiProvider`: `GET {base}/v1/current.json?key=..&q=..`
//! - `SimulatedWeatherProvider`: fixed reading, used when no API key is
//!   configured. The weather service is never contacted in that mode.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::HeaderMap;
use opentelemetry::Context;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::config::EnrichmentConfig;
use crate::domain::TemperatureSample;
use crate::observability::inject_context;

/// Reading reported in simulated mode, in °C.
pub const SIMULATED_CELSIUS: f64 = 25.0;

#[derive(Debug, Error)]
pub enum WeatherError {
    /// Transport or decode failure. The URL is stripped since it carries the key.
    #[error("weather request failed: {0}")]
    Transport(reqwest::Error),

    #[error("weather service returned status {0}")]
    Status(StatusCode),
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::Transport(err.without_url())
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current temperature at `locality`, in °C.
    async fn current(&self, locality: &str, cx: &Context) -> Result<TemperatureSample, WeatherError>;

    /// Short label for logs.
    fn name(&self) -> &'static str;
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    current: Current,
}

#[derive(Debug, Deserialize)]
struct Current {
    temp_c: f64,
}

/// WeatherAPI-compatible service over HTTP.
#[derive(Clone)]
pub struct WeatherApiProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherApiProvider {
    pub fn new(client: Client, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

impl std::fmt::Debug for WeatherApiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn current(&self, locality: &str, cx: &Context) -> Result<TemperatureSample, WeatherError> {
        let mut headers = HeaderMap::new();
        inject_context(cx, &mut headers);

        let response = self
            .client
            .get(format!("{}/v1/current.json", self.base_url))
            .query(&[("key", self.api_key.as_str()), ("q", locality)])
            .headers(headers)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status));
        }

        let conditions: CurrentConditions = response.json().await?;
        Ok(TemperatureSample {
            celsius: conditions.current.temp_c,
        })
    }

    fn name(&self) -> &'static str {
        "weatherapi"
    }
}

/// Fixed reading for deployments without a weather key.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedWeatherProvider {
    celsius: f64,
}

impl SimulatedWeatherProvider {
    pub fn new(celsius: f64) -> Self {
        Self { celsius }
    }
}

impl Default for SimulatedWeatherProvider {
    fn default() -> Self {
        Self::new(SIMULATED_CELSIUS)
    }
}

#[async_trait]
impl WeatherProvider for SimulatedWeatherProvider {
    async fn current(&self, _locality: &str, _cx: &Context) -> Result<TemperatureSample, WeatherError> {
        Ok(TemperatureSample { celsius: self.celsius })
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}

/// Pick the weather strategy for this process.
pub fn weather_provider(config: &EnrichmentConfig, client: Client) -> Arc<dyn WeatherProvider> {
    match config.weather_api_key.as_deref().filter(|k| !k.is_empty()) {
        Some(key) => Arc::new(WeatherApiProvider::new(client, &config.weather_url, key)),
        None => {
            tracing::warn!(
                celsius = SIMULATED_CELSIUS,
                "No weather API key configured, reporting simulated temperature"
            );
            Arc::new(SimulatedWeatherProvider::default())
        }
    }
}
