use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::model::WeatherReport;

use super::{ProviderError, WeatherProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the provider at a different host, e.g. a local mock server.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    async fn get_body(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<String, ProviderError> {
        let url = format!("{}/data/2.5/{endpoint}", self.base_url);

        // Success is signalled by `cod` inside the body, so the HTTP status is
        // only logged; 404 answers still carry a JSON payload worth decoding.
        let res = self.http.get(&url).query(query).send().await?;
        let status = res.status();
        let body = res.text().await?;

        debug!(%status, body = %truncate_body(&body), "OpenWeather {endpoint} response");
        Ok(body)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn current_weather(&self, city: &str) -> Result<WeatherReport, ProviderError> {
        let body = self
            .get_body(
                "weather",
                &[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")],
            )
            .await?;

        parse_current(&body)
    }

    #[instrument(skip(self))]
    async fn find_places(&self, query: &str) -> Result<Vec<String>, ProviderError> {
        let body = self
            .get_body("find", &[("q", query), ("appid", self.api_key.as_str())])
            .await?;

        parse_places(&body)
    }
}

/// `cod` arrives as a number on success and as a string on most errors.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OwCode {
    Number(i64),
    Text(String),
}

impl OwCode {
    fn is_success(&self) -> bool {
        match self {
            OwCode::Number(n) => *n == 200,
            OwCode::Text(s) => s.trim() == "200",
        }
    }

    fn into_string(self) -> String {
        match self {
            OwCode::Number(n) => n.to_string(),
            OwCode::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
    sea_level: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    cod: Option<OwCode>,
    message: Option<String>,
    name: Option<String>,
    dt: Option<i64>,
    main: Option<OwMain>,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwPlace {
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwFindResponse {
    #[serde(default)]
    list: Vec<OwPlace>,
}

fn parse_current(body: &str) -> Result<WeatherReport, ProviderError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)?;

    match parsed.cod {
        Some(ref code) if code.is_success() => {}
        code => {
            return Err(ProviderError::Rejected {
                code: code.map(OwCode::into_string).unwrap_or_else(|| "none".to_string()),
                message: parsed.message.unwrap_or_default(),
            });
        }
    }

    let main = parsed.main.ok_or(ProviderError::MissingField("main"))?;
    let description = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .unwrap_or_default();

    Ok(WeatherReport {
        location_name: parsed.name.unwrap_or_default(),
        temperature_c: main.temp,
        feels_like_c: main.feels_like,
        temp_min_c: main.temp_min,
        temp_max_c: main.temp_max,
        humidity_pct: main.humidity,
        sea_level_hpa: main.sea_level,
        description,
        observed_at: parsed.dt.and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
    })
}

fn parse_places(body: &str) -> Result<Vec<String>, ProviderError> {
    let parsed: OwFindResponse = serde_json::from_str(body)?;
    Ok(parsed.list.into_iter().map(|place| place.name).collect())
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        let head: String = body.chars().take(MAX).collect();
        format!("{head}...")
    } else {
        body.to_string()
    }
}
