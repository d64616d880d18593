use crate::{
    Config, WeatherError, WeatherQueryResult, WeatherRequest,
    model::PlaceName,
    provider::weatherapi::WeatherApiProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Issue exactly one request for `request` and parse the answer.
    async fn get_weather(&self, request: &WeatherRequest)
    -> Result<WeatherQueryResult, WeatherError>;

    /// Current conditions plus tomorrow's forecast for a free-text place name.
    ///
    /// "Tomorrow" is the client's local date plus one, not the date at the
    /// queried location, so near midnight the two can differ by a day.
    async fn fetch_weather(&self, place: &str) -> Result<WeatherQueryResult, WeatherError> {
        let place = PlaceName::new(place)?;
        let today = chrono::Local::now().date_naive();
        self.get_weather(&WeatherRequest::for_tomorrow(place, today)).await
    }
}

/// Construct the WeatherAPI.com provider from config.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>, WeatherError> {
    let api_key = config.resolve_api_key().ok_or(WeatherError::MissingApiKey)?;
    let provider = WeatherApiProvider::new(api_key, config)?;
    Ok(Box::new(provider))
}
