use crate::{
    Config,
    error::FetchError,
    model::{CurrentWeather, Forecast, GeoCoordinate},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current conditions and the 3-hourly forecast for a coordinate.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, at: GeoCoordinate) -> Result<CurrentWeather, FetchError>;

    async fn forecast(&self, at: GeoCoordinate) -> Result<Forecast, FetchError>;
}

/// Construct the OpenWeather provider from config.
///
/// A missing API key is not an error here: the provider is still built and every
/// request it makes fails with [`FetchError::MissingApiKey`] before touching the network.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    let provider = OpenWeatherProvider::new(config.weather_api_key().map(str::to_owned))
        .with_base_url(&config.weather.base_url);

    Box::new(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn provider_from_config_without_key_fails_fast() {
        let cfg = Config::default();
        let provider = provider_from_config(&cfg);

        let err = provider.current_weather(GeoCoordinate::default()).await.unwrap_err();
        assert!(matches!(err, FetchError::MissingApiKey));

        let err = provider.forecast(GeoCoordinate::default()).await.unwrap_err();
        assert!(matches!(err, FetchError::MissingApiKey));
    }
}
