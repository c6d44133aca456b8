//! Core library for the weather lookup proxy.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind a small provider trait
//! - Shared domain models (requests, summaries) and the lookup error taxonomy
//!
//! It is used by `weather-server`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;

pub use config::{Config, LogConfig, ProviderConfig, ServerConfig};
pub use error::LookupError;
pub use model::{LookupRequest, Units, WeatherSummary};
pub use provider::{WeatherProvider, provider_from_config};
pub use service::WeatherLookupService;
