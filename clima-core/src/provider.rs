use crate::{
    Config,
    error::FetchError,
    model::{Coordinates, WeatherCondition},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Current-conditions lookup. Every call is single-shot: no retry, no pagination.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn by_coordinates(&self, at: Coordinates) -> Result<WeatherCondition, FetchError>;

    async fn by_city_name(&self, name: &str) -> Result<WeatherCondition, FetchError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.api_key()?;
    OpenWeatherProvider::new(api_key.to_owned(), &config.openweather)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No OpenWeather API key configured"));
    }

    #[test]
    fn provider_from_config_works_when_configured() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        let provider = provider_from_config(&cfg);
        assert!(provider.is_ok());
    }
}
