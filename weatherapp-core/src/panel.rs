//! Query text plus the single display slot a front end renders from.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::{WeatherError, WeatherProvider, WeatherQueryResult};

/// What the display currently shows; `None` until the first successful fetch.
pub type DisplaySlot = Option<Arc<WeatherQueryResult>>;

/// Owns the place-name input and the latest result.
///
/// Fetches are not coordinated with each other: when several overlap, the one
/// that resolves last overwrites the slot, whatever order they were issued in.
/// A failed fetch leaves the slot as it was.
#[derive(Debug)]
pub struct WeatherPanel {
    provider: Arc<dyn WeatherProvider>,
    query: String,
    slot: watch::Sender<DisplaySlot>,
}

impl WeatherPanel {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        let (slot, _) = watch::channel(None);
        Self { provider, query: String::new(), slot }
    }

    /// Input side of the binding.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Fetch whatever the query text holds right now.
    pub async fn fetch(&self) -> Result<Arc<WeatherQueryResult>, WeatherError> {
        self.fetch_place(&self.query).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_place(&self, place: &str) -> Result<Arc<WeatherQueryResult>, WeatherError> {
        let result = Arc::new(self.provider.fetch_weather(place).await?);
        debug!(location = %result.location.name, "Display slot updated");
        self.slot.send_replace(Some(Arc::clone(&result)));
        Ok(result)
    }

    pub fn current(&self) -> DisplaySlot {
        self.slot.borrow().clone()
    }

    /// Observe slot changes, e.g. from a render loop.
    pub fn subscribe(&self) -> watch::Receiver<DisplaySlot> {
        self.slot.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        WeatherRequest,
        model::{Condition, Current, DaySummary, Forecast, ForecastDay, Location},
    };
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio::sync::Notify;

    fn sample(place: &str, request: &WeatherRequest) -> WeatherQueryResult {
        let condition = Condition { text: "Sunny".into(), icon: "//cdn/113.png".into() };
        WeatherQueryResult {
            location: Location { name: place.into(), region: String::new(), country: "Nowhere".into() },
            current: Current { temp_c: 20.0, temp_f: 68.0, condition: condition.clone() },
            forecast: Forecast {
                forecastday: vec![ForecastDay {
                    date: request.forecast_date,
                    day: DaySummary { avg_c: 18.0, avg_f: 64.4, condition },
                }],
            },
        }
    }

    /// Answers every place except "Atlantis", which is unknown upstream.
    #[derive(Debug)]
    struct Canned;

    #[async_trait]
    impl WeatherProvider for Canned {
        async fn get_weather(
            &self,
            request: &WeatherRequest,
        ) -> Result<WeatherQueryResult, WeatherError> {
            if request.place.as_str() == "Atlantis" {
                return Err(WeatherError::Upstream {
                    status: 400,
                    code: Some(1006),
                    message: "No matching location found.".into(),
                });
            }
            Ok(sample(request.place.as_str(), request))
        }
    }

    /// Holds each request until its place's gate is opened.
    #[derive(Debug)]
    struct Gated {
        gates: HashMap<String, Arc<Notify>>,
    }

    impl Gated {
        fn with(places: &[&str]) -> Self {
            let gates = places.iter().map(|p| (p.to_string(), Arc::new(Notify::new()))).collect();
            Self { gates }
        }

        fn open(&self, place: &str) {
            self.gates[place].notify_one();
        }
    }

    #[async_trait]
    impl WeatherProvider for Gated {
        async fn get_weather(
            &self,
            request: &WeatherRequest,
        ) -> Result<WeatherQueryResult, WeatherError> {
            self.gates[request.place.as_str()].notified().await;
            Ok(sample(request.place.as_str(), request))
        }
    }

    #[tokio::test]
    async fn fetch_reads_query_text_at_call_time() {
        let mut panel = WeatherPanel::new(Arc::new(Canned));
        assert!(panel.current().is_none());

        panel.set_query("London");
        let shown = panel.fetch().await.unwrap();
        assert_eq!(shown.location.name, "London");

        panel.set_query("Paris");
        assert_eq!(panel.query(), "Paris");
        panel.fetch().await.unwrap();
        assert_eq!(panel.current().unwrap().location.name, "Paris");
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_display() {
        let mut panel = WeatherPanel::new(Arc::new(Canned));
        panel.set_query("London");
        panel.fetch().await.unwrap();

        panel.set_query("Atlantis");
        let err = panel.fetch().await.unwrap_err();
        assert!(err.is_unknown_place());
        assert_eq!(panel.current().unwrap().location.name, "London");

        panel.set_query("");
        assert!(matches!(panel.fetch().await, Err(WeatherError::EmptyPlaceName)));
        assert_eq!(panel.current().unwrap().location.name, "London");
    }

    #[tokio::test]
    async fn subscribers_see_updates() {
        let panel = WeatherPanel::new(Arc::new(Canned));
        let mut rx = panel.subscribe();

        panel.fetch_place("Rome").await.unwrap();

        assert!(rx.has_changed().unwrap());
        let shown = rx.borrow_and_update().clone().unwrap();
        assert_eq!(shown.location.name, "Rome");
    }

    #[tokio::test]
    async fn last_resolved_fetch_wins() {
        let provider = Arc::new(Gated::with(&["Berlin", "Paris"]));
        let panel = WeatherPanel::new(provider.clone());
        let mut rx = panel.subscribe();

        // Berlin is issued first but resolves after Paris.
        let berlin = panel.fetch_place("Berlin");
        let paris = panel.fetch_place("Paris");
        let release = async {
            provider.open("Paris");
            rx.wait_for(|slot| slot.as_ref().is_some_and(|r| r.location.name == "Paris"))
                .await
                .unwrap();
            provider.open("Berlin");
        };

        let (berlin, paris, ()) = tokio::join!(berlin, paris, release);
        berlin.unwrap();
        paris.unwrap();

        assert_eq!(panel.current().unwrap().location.name, "Berlin");
    }
}
