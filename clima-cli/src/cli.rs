use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use clima_core::{
    Config, ConfiguredLocation, Fetcher, SessionGate, Source, UserStore, ViewState,
    WeatherController, provider::provider_from_config,
};
use inquire::{Confirm, CustomType, Text};
use tracing::info;

use crate::{login, render::render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "clima", version, about = "Weather assistant")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the OpenWeather API key, language and location.
    Configure,

    /// Log in and show the weather.
    Show {
        /// City to look up; the configured location is used when absent.
        city: Option<String>,

        /// Go straight to the weather view.
        #[arg(long)]
        skip_login: bool,
    },

    /// Print the config file path.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, skip_login } => show(city, skip_login).await,
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Text::new("OpenWeather API key:")
        .with_initial_value(config.openweather.api_key.as_deref().unwrap_or_default())
        .prompt()?;
    config.set_api_key(api_key.trim().to_string());

    config.openweather.lang = Text::new("Idioma de las descripciones:")
        .with_default(&config.openweather.lang)
        .prompt()?;

    config.location.enabled = Confirm::new("¿Permitir acceso a la ubicación?")
        .with_default(config.location.enabled)
        .prompt()?;

    if config.location.enabled {
        config.location.latitude = CustomType::<f64>::new("Latitud:").prompt_skippable()?;
        config.location.longitude = CustomType::<f64>::new("Longitud:").prompt_skippable()?;
    }

    config.save().context("Failed to save configuration")?;
    println!("Configuración guardada en {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: Option<String>, skip_login: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    let location = ConfiguredLocation::new(config.location.clone());
    let fetcher = Fetcher::new(Arc::new(location), Arc::new(provider));

    let mut gate = SessionGate::new(UserStore::with_demo_user());
    if !skip_login && !login::run(&mut gate)? {
        return Ok(());
    }

    let mut ctl = WeatherController::new(fetcher);
    let source = match city {
        Some(name) => Source::CityQuery(name),
        None => Source::CurrentLocation,
    };
    if let Err(err) = ctl.start(source) {
        println!("{err}");
        ctl.start(Source::CurrentLocation)?;
    }

    loop {
        println!("{}", render(ctl.state()));
        let state = ctl.settle().await.clone();
        println!("\n{}\n", render(&state));

        match state {
            ViewState::Error { .. } => {
                if !Confirm::new("¿Reintentar?").with_default(true).prompt()? {
                    break;
                }
                ctl.retry();
            }
            ViewState::Ready { .. } => {
                let query = Text::new("Buscar ciudad (vacío para salir):").prompt()?;
                if query.trim().is_empty() {
                    break;
                }
                ctl.set_search_text(query);
                ctl.submit_search()?;
            }
            ViewState::Idle | ViewState::Loading => break,
        }
    }

    info!("weather session finished");
    Ok(())
}
