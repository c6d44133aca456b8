use crate::{Config, LookupError, LookupRequest, WeatherSummary, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// Source of current weather for a single city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, request: &LookupRequest) -> Result<WeatherSummary, LookupError>;
}

/// Construct the upstream provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.api_key()?;

    let provider = OpenWeatherProvider::new(
        api_key.to_owned(),
        config.provider.endpoint.clone(),
        config.provider.timeout(),
    )?;

    Ok(Arc::new(provider))
}
