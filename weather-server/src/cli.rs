use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use std::path::PathBuf;
use tracing::Instrument;
use weather_core::{Config, WeatherLookupService, provider_from_config};

use crate::{logging, server};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Weather lookup proxy")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server.
    Serve {
        /// Listen address, e.g. "0.0.0.0:8080".
        #[arg(long)]
        bind: Option<String>,
    },

    /// Store the provider API key in the config file.
    Configure,

    /// Look up the weather for a city once and print it as JSON.
    Lookup {
        /// City name.
        city: String,

        /// metric, imperial or standard; defaults to metric.
        #[arg(long)]
        units: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let Cli { config, command } = self;

        match command {
            Command::Configure => configure(config),
            Command::Serve { bind } => {
                let mut cfg = load_config(config.as_ref())?;
                if let Some(bind) = bind {
                    cfg.server.bind = bind;
                }

                let guard = logging::init(&cfg.log)?;
                let result = server::serve(&cfg).await;
                if let Err(e) = &result {
                    tracing::error!("{:#}", e);
                }
                guard.shutdown();
                result
            }
            Command::Lookup { city, units } => {
                let cfg = load_config(config.as_ref())?;
                let guard = logging::init(&cfg.log)?;

                let service = WeatherLookupService::new(provider_from_config(&cfg)?);
                let result = service
                    .fetch(Some(&city), units.as_deref())
                    .instrument(tracing::info_span!("lookup", client = "cli"))
                    .await;
                guard.shutdown();

                match result {
                    Ok(summary) => {
                        let json = serde_json::to_string_pretty(&summary)
                            .context("Failed to serialize weather summary")?;
                        println!("{json}");
                        Ok(())
                    }
                    Err(e) => bail!("{} ({})", e.user_message(), e),
                }
            }
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let cfg = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(cfg.with_env_overrides())
}

fn configure(path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => Config::config_file_path()?,
    };

    // Env overrides are not applied here so they never end up on disk.
    let mut cfg = Config::load_from(&path)?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }

    cfg.upsert_api_key(api_key.to_string());
    cfg.save_to(&path)?;

    println!("Saved API key to {}", path.display());
    Ok(())
}
