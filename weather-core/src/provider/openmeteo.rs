use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    Config,
    model::{CurrentConditions, Forecast, ForecastDay, GeoResult, SearchQuery},
};

use super::WeatherProvider;

const DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,precipitation_probability_max,weathercode";

/// Open-Meteo geocoding + forecast client. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    geocoding_url: Url,
    forecast_url: Url,
    forecast_days: usize,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(config: &Config) -> Result<Self> {
        let geocoding_url = Url::parse(&config.geocoding_url)
            .with_context(|| format!("Invalid geocoding_url '{}'", config.geocoding_url))?;
        let forecast_url = Url::parse(&config.forecast_url)
            .with_context(|| format!("Invalid forecast_url '{}'", config.forecast_url))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { geocoding_url, forecast_url, forecast_days: config.forecast_days(), http })
    }

    async fn get_body(&self, request: reqwest::RequestBuilder, what: &str) -> Result<String> {
        let res = request
            .send()
            .await
            .with_context(|| format!("Failed to send request to Open-Meteo ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read Open-Meteo {what} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo {} request failed with status {}: {}",
                what,
                status,
                truncate_body(&body),
            ));
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OmGeoEntry {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    timezone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmGeoResponse {
    // Omitted entirely when nothing matches.
    #[serde(default)]
    results: Option<Vec<OmGeoEntry>>,
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: f64,
    windspeed: f64,
    weathercode: i32,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<String>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    // `null` entries are days without an estimate.
    precipitation_probability_max: Vec<Option<u8>>,
    weathercode: Vec<i32>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current_weather: OmCurrentWeather,
    daily: OmDaily,
}

impl From<OmGeoEntry> for GeoResult {
    fn from(entry: OmGeoEntry) -> Self {
        Self {
            name: entry.name,
            country: entry.country,
            latitude: entry.latitude,
            longitude: entry.longitude,
            timezone: entry.timezone,
        }
    }
}

impl OmDaily {
    fn into_days(self, limit: usize) -> Result<Vec<ForecastDay>> {
        let len = self.time.len();
        if self.temperature_2m_max.len() != len
            || self.temperature_2m_min.len() != len
            || self.precipitation_probability_max.len() != len
            || self.weathercode.len() != len
        {
            bail!("Open-Meteo daily arrays have mismatched lengths");
        }

        self.time
            .iter()
            .enumerate()
            .take(limit)
            .map(|(i, day)| {
                let date = NaiveDate::parse_from_str(day, "%Y-%m-%d")
                    .with_context(|| format!("Invalid forecast date '{day}'"))?;

                Ok(ForecastDay {
                    date,
                    max_temp_c: self.temperature_2m_max[i],
                    min_temp_c: self.temperature_2m_min[i],
                    precipitation_probability: self.precipitation_probability_max[i],
                    weather_code: self.weathercode[i],
                })
            })
            .collect()
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    #[instrument(skip_all, fields(query = %query))]
    async fn geocode(&self, query: &SearchQuery) -> Result<Option<GeoResult>> {
        debug!(url = %self.geocoding_url, "Geocoding city");

        let request = self.http.get(self.geocoding_url.clone()).query(&[
            ("name", query.as_str()),
            ("count", "1"),
            ("language", "en"),
            ("format", "json"),
        ]);
        let body = self.get_body(request, "geocoding").await?;

        let parsed: OmGeoResponse =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo geocoding JSON")?;

        Ok(parsed.results.unwrap_or_default().into_iter().next().map(GeoResult::from))
    }

    #[instrument(skip_all, fields(city = %location.name))]
    async fn forecast(&self, location: &GeoResult) -> Result<Forecast> {
        let latitude = location.latitude.to_string();
        let longitude = location.longitude.to_string();
        let timezone = location.timezone.as_deref().filter(|tz| !tz.is_empty()).unwrap_or("auto");

        debug!(url = %self.forecast_url, %latitude, %longitude, timezone, "Fetching forecast");

        let request = self.http.get(self.forecast_url.clone()).query(&[
            ("latitude", latitude.as_str()),
            ("longitude", longitude.as_str()),
            ("current_weather", "true"),
            ("daily", DAILY_FIELDS),
            ("timezone", timezone),
        ]);
        let body = self.get_body(request, "forecast").await?;

        let parsed: OmForecastResponse =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo forecast JSON")?;

        let current = CurrentConditions {
            temperature_c: parsed.current_weather.temperature,
            windspeed_kmh: parsed.current_weather.windspeed,
            weather_code: parsed.current_weather.weathercode,
        };
        let daily = parsed.daily.into_days(self.forecast_days)?;

        Ok(Forecast { current, daily })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
