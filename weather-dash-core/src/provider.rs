use crate::{
    Config,
    error::DashboardError,
    model::{Coordinates, CurrentConditions, ForecastSample, LocationQuery},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// The two read-only endpoints the dashboard depends on.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a place name or a coordinate pair.
    async fn current(&self, query: &LocationQuery) -> Result<CurrentConditions, DashboardError>;

    /// Raw three-hour samples for the next few days, in chronological order.
    async fn forecast(&self, at: Coordinates) -> Result<Vec<ForecastSample>, DashboardError>;
}

/// Construct the OpenWeather client from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
             Hint: run `weather-dash configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    Ok(OpenWeatherProvider::with_base_url(
        api_key.to_owned(),
        config.base_url(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("No OpenWeather API key configured"));
        assert!(msg.contains("Hint: run `weather-dash configure`"));
    }

    #[test]
    fn provider_from_config_works_when_configured() {
        let cfg = Config {
            api_key: Some("KEY".to_string()),
            ..Config::default()
        };
        assert!(provider_from_config(&cfg).is_ok());
    }
}
