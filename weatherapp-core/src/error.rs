use thiserror::Error;

/// Failures of a single weather fetch.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Place name must not be empty")]
    EmptyPlaceName,

    #[error(
        "No WeatherAPI key configured.\n\
         Hint: run `weatherapp configure` or set WEATHERAPI_KEY."
    )]
    MissingApiKey,

    /// Connectivity, DNS, timeout or body read failure.
    #[error("Network error talking to WeatherAPI: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("WeatherAPI request failed with status {status}: {message}")]
    Upstream {
        status: u16,
        /// WeatherAPI's own error code, e.g. 1006 for "No matching location found".
        code: Option<u32>,
        message: String,
    },

    #[error("Malformed WeatherAPI response: {0}")]
    MalformedResponse(String),
}

impl WeatherError {
    /// True when the API rejected the place name itself.
    pub fn is_unknown_place(&self) -> bool {
        matches!(self, WeatherError::Upstream { code: Some(1006), .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_place_detection() {
        let err = WeatherError::Upstream {
            status: 400,
            code: Some(1006),
            message: "No matching location found.".into(),
        };
        assert!(err.is_unknown_place());
        assert!(err.to_string().contains("status 400"));

        let err = WeatherError::Upstream { status: 401, code: Some(2006), message: "bad key".into() };
        assert!(!err.is_unknown_place());
    }

    #[test]
    fn missing_key_has_hint() {
        assert!(WeatherError::MissingApiKey.to_string().contains("weatherapp configure"));
    }
}
