use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{Config, WeatherError, WeatherQueryResult, WeatherRequest};

use super::WeatherProvider;

/// Tolerance in °F for the Celsius/Fahrenheit sanity warning.
const UNIT_TOLERANCE_F: f64 = 0.5;

/// WeatherAPI.com `forecast.json` client.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String, config: &Config) -> Result<Self, WeatherError> {
        let mut builder = Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let http = builder.build()?;

        Ok(Self { api_key, base_url: config.base_url.trim_end_matches('/').to_string(), http })
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast.json", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct WaErrorEnvelope {
    error: WaError,
}

#[derive(Debug, Deserialize)]
struct WaError {
    code: Option<u32>,
    message: String,
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    #[instrument(skip_all, fields(place = %request.place, dt = %request.forecast_date))]
    async fn get_weather(
        &self,
        request: &WeatherRequest,
    ) -> Result<WeatherQueryResult, WeatherError> {
        let dt = request.forecast_date.format("%Y-%m-%d").to_string();

        let res = self
            .http
            .get(self.forecast_url())
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", request.place.as_str()),
                ("days", "1"),
                ("dt", dt.as_str()),
            ])
            .send()
            .await
            // The query string carries the API key.
            .map_err(|e| WeatherError::Network(e.without_url()))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| WeatherError::Network(e.without_url()))?;
        debug!(status = status.as_u16(), bytes = body.len(), "WeatherAPI responded");

        if !status.is_success() {
            return Err(upstream_error(status.as_u16(), &body));
        }

        let parsed = WeatherQueryResult::from_json(&body)?;

        if !parsed.current.fahrenheit_matches_celsius(UNIT_TOLERANCE_F) {
            warn!(
                temp_c = parsed.current.temp_c,
                temp_f = parsed.current.temp_f,
                "Upstream Celsius and Fahrenheit readings disagree"
            );
        }

        Ok(parsed)
    }
}

fn upstream_error(status: u16, body: &str) -> WeatherError {
    match serde_json::from_str::<WaErrorEnvelope>(body) {
        Ok(envelope) => WeatherError::Upstream {
            status,
            code: envelope.error.code,
            message: envelope.error.message,
        },
        Err(_) => WeatherError::Upstream { status, code: None, message: truncate_body(body) },
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
