use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// A trimmed, non-empty place name as submitted to the weather API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceName(String);

impl PlaceName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, WeatherError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(WeatherError::EmptyPlaceName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlaceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One fetch: which place, and which calendar day the forecast should start at.
#[derive(Debug, Clone)]
pub struct WeatherRequest {
    pub place: PlaceName,
    pub forecast_date: NaiveDate,
}

impl WeatherRequest {
    /// Request the forecast for the day after `today`.
    pub fn for_tomorrow(place: PlaceName, today: NaiveDate) -> Self {
        // Only `NaiveDate::MAX` has no successor; it saturates there.
        let forecast_date = today.checked_add_days(Days::new(1)).unwrap_or(today);
        Self { place, forecast_date }
    }
}

/// Location, current conditions and the forecast days returned for one query.
///
/// Mirrors the WeatherAPI.com `forecast.json` response; fields the client does
/// not read are ignored on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherQueryResult {
    pub location: Location,
    pub current: Current,
    pub forecast: Forecast,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Current {
    pub temp_c: f64,
    pub temp_f: f64,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    /// Icon reference as returned upstream, usually protocol-relative (`//cdn...`).
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub day: DaySummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    #[serde(alias = "avgtemp_c")]
    pub avg_c: f64,
    #[serde(alias = "avgtemp_f")]
    pub avg_f: f64,
    pub condition: Condition,
}

impl WeatherQueryResult {
    /// Parse and validate a response body.
    ///
    /// Missing fields, wrong types and a forecast that is not ascending by date
    /// all fail with [`WeatherError::MalformedResponse`].
    pub fn from_json(body: &str) -> Result<Self, WeatherError> {
        let parsed: Self = serde_json::from_str(body)
            .map_err(|e| WeatherError::MalformedResponse(e.to_string()))?;
        parsed.validate()?;
        Ok(parsed)
    }

    fn validate(&self) -> Result<(), WeatherError> {
        let ascending = self
            .forecast
            .forecastday
            .windows(2)
            .all(|pair| pair[0].date < pair[1].date);

        if !ascending {
            return Err(WeatherError::MalformedResponse(
                "forecastday entries are not in ascending date order".to_string(),
            ));
        }
        Ok(())
    }

    /// The nearest forecast day, if the response carried any.
    pub fn tomorrow(&self) -> Option<&ForecastDay> {
        self.forecast.forecastday.first()
    }
}

impl Current {
    /// Whether `temp_f` agrees with `temp_c` within `tolerance` degrees Fahrenheit.
    ///
    /// Diagnostic only: upstream values are trusted and never rejected on this.
    pub fn fahrenheit_matches_celsius(&self, tolerance: f64) -> bool {
        (celsius_to_fahrenheit(self.temp_c) - self.temp_f).abs() <= tolerance
    }
}

pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

/// Turn an upstream icon reference into an absolute URL.
pub fn icon_url(icon: &str) -> String {
    if icon.starts_with("//") {
        format!("https:{icon}")
    } else {
        icon.to_string()
    }
}
