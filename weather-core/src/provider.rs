use crate::{Config, WeatherReport, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};
use thiserror::Error;

pub mod openweather;

/// Errors raised by a weather backend.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The API answered, but its embedded status code was not a success.
    #[error("upstream rejected the request (cod {code}): {message}")]
    Rejected { code: String, message: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("response is missing `{0}`")]
    MissingField(&'static str),
}

impl ProviderError {
    /// True when the upstream understood the request and refused it
    /// (unknown city, bad query), as opposed to a transport or decoding failure.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ProviderError::Rejected { .. })
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a city name.
    async fn current_weather(&self, city: &str) -> Result<WeatherReport, ProviderError>;

    /// Place names matching a partial query, in upstream order.
    async fn find_places(&self, query: &str) -> Result<Vec<String>, ProviderError>;
}

/// Construct the OpenWeather provider from an already resolved API key.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.resolve_api_key()?;
    Ok(Arc::new(OpenWeatherProvider::new(api_key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_is_distinguished_from_transport_errors() {
        let rejected = ProviderError::Rejected {
            code: "404".into(),
            message: "city not found".into(),
        };
        assert!(rejected.is_rejection());

        let parse = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        assert!(!ProviderError::Parse(parse).is_rejection());
        assert!(!ProviderError::MissingField("main").is_rejection());
    }

    #[test]
    fn rejection_message_mentions_code() {
        let err = ProviderError::Rejected {
            code: "404".into(),
            message: "city not found".into(),
        };
        assert!(err.to_string().contains("cod 404"));
    }
}
