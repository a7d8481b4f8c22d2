//! SMHI open-data point-forecast client
//!
//! Fetches the pmp3g point forecast for a coordinate. The endpoint requires
//! no authentication and returns a `timeSeries` array of hourly entries, each
//! carrying a `validTime` and a list of named parameters.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::NordcastError;
use crate::locations::Location;
use crate::Result;

/// SMHI point-forecast response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointForecast {
    #[serde(rename = "timeSeries", default)]
    pub time_series: Vec<ForecastEntry>,
}

/// One timestamped forecast entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    #[serde(rename = "validTime")]
    pub valid_time: DateTime<Utc>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

/// A named forecast parameter, e.g. `t` (air temperature) or `ws` (wind
/// speed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "levelType", skip_serializing_if = "Option::is_none")]
    pub level_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default)]
    pub values: Vec<f64>,
}

impl ForecastEntry {
    /// Permissive lookup of a named parameter: the first value of the first
    /// parameter with that name, or `None` when the entry doesn't carry it.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<f64> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .and_then(|p| p.values.first())
            .copied()
    }
}

/// HTTP client for the SMHI forecast API
pub struct SmhiClient {
    client: Client,
    base_url: String,
}

impl SmhiClient {
    /// Create a new client with the configured timeout
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_seconds.into()))
            .user_agent(concat!("nordcast/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the point forecast for a location
    #[must_use]
    pub fn forecast_url(&self, location: &Location) -> String {
        format!(
            "{}/api/category/pmp3g/version/2/geotype/point/lon/{}/lat/{}/data.json",
            self.base_url, location.lon, location.lat
        )
    }

    /// Fetch the point forecast for one location. A failure marks this
    /// location only; there is no retry.
    pub async fn fetch(&self, location: &Location) -> Result<PointForecast> {
        let url = self.forecast_url(location);
        debug!("Fetching forecast for {} from {}", location.name, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| NordcastError::fetch(&location.name, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NordcastError::status(&location.name, status));
        }

        let forecast: PointForecast = response
            .json()
            .await
            .map_err(|e| NordcastError::fetch(&location.name, e))?;

        debug!(
            "{}: {} forecast entries",
            location.name,
            forecast.time_series.len()
        );
        Ok(forecast)
    }
}
