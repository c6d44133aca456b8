//! The single operation this crate exists for: look up a city's current weather.

use std::sync::Arc;

use crate::{
    error::LookupError,
    model::{LookupRequest, WeatherSummary},
    provider::WeatherProvider,
};

#[derive(Debug, Clone)]
pub struct WeatherLookupService {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherLookupService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Validate the inputs, query the provider and record the outcome.
    ///
    /// One log event is emitted per call. Callers that want it tagged with the
    /// client's address should run this inside a span carrying that field.
    pub async fn fetch(
        &self,
        city: Option<&str>,
        units: Option<&str>,
    ) -> Result<WeatherSummary, LookupError> {
        let result = match LookupRequest::new(city, units) {
            Ok(request) => self.provider.current(&request).await,
            Err(err) => Err(err),
        };

        match &result {
            Ok(summary) => {
                tracing::info!(outcome = "ok", city = %summary.city, "Weather data fetched");
            }
            Err(err) => {
                tracing::error!(
                    outcome = "failed",
                    kind = err.kind(),
                    city = city.unwrap_or_default(),
                    error = %err,
                    "Weather lookup failed"
                );
            }
        }

        result
    }
}
