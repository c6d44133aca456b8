use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Number;
use std::time::Duration;

use crate::{
    error::LookupError,
    model::{LookupRequest, WeatherSummary},
};

use super::WeatherProvider;

const USER_AGENT: &str = concat!("weather-proxy/", env!("CARGO_PKG_VERSION"));

/// Client for the OpenWeather "current weather" endpoint.
#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, endpoint: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        Ok(Self { api_key, endpoint, http })
    }

    async fn fetch_current(&self, request: &LookupRequest) -> Result<WeatherSummary, LookupError> {
        let res = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", request.city.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", request.units.as_str()),
            ])
            .send()
            .await
            .map_err(|e| LookupError::from_transport(&e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| LookupError::from_transport(&e))?;

        if status == StatusCode::NOT_FOUND {
            tracing::debug!(city = %request.city, "OpenWeather does not know this city");
            return Err(LookupError::CityNotFound);
        }

        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                body = %truncate_body(&body),
                "OpenWeather current request failed"
            );
            return Err(LookupError::UpstreamError { status: status.as_u16() });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| LookupError::MalformedUpstreamResponse(e.to_string()))?;

        let weather = parsed.weather.into_iter().next().ok_or_else(|| {
            LookupError::MalformedUpstreamResponse("`weather` array is empty".to_string())
        })?;

        Ok(WeatherSummary {
            city: request.city.clone(),
            weather_description: weather.description,
            temperature: parsed.main.temp,
            humidity: parsed.main.humidity,
            wind_speed: parsed.wind.speed,
            pressure: parsed.main.pressure,
            weather_icon: weather.icon,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: Number,
    humidity: Number,
    pressure: Number,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: Number,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, request: &LookupRequest) -> Result<WeatherSummary, LookupError> {
        self.fetch_current(request).await
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body;
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
