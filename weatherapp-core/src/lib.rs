//! Core library for the `weatherapp` client.
//!
//! This crate defines:
//! - The weather data contract (location, current conditions, forecast day)
//! - The WeatherAPI.com provider and the error taxonomy of a fetch
//! - Configuration & credentials handling
//! - The panel state a front end binds its input and display to
//!
//! It is used by `weatherapp-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod model;
pub mod panel;
pub mod provider;

pub use config::Config;
pub use error::WeatherError;
pub use model::{PlaceName, WeatherQueryResult, WeatherRequest};
pub use panel::WeatherPanel;
pub use provider::{WeatherProvider, provider_from_config};
