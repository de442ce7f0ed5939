use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::condition::condition_for_code;

/// A trimmed, non-empty city name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Returns `None` for empty or whitespace-only input.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() { None } else { Some(Self(trimmed.to_string())) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// First geocoding match for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoResult {
    pub name: String,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub windspeed_kmh: f64,
    pub weather_code: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    /// Percent, absent when the service has no estimate for the day.
    pub precipitation_probability: Option<u8>,
    pub weather_code: i32,
}

impl ForecastDay {
    pub fn condition(&self) -> &'static str {
        condition_for_code(self.weather_code)
    }
}

/// What the forecast service returns for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub current: CurrentConditions,
    pub daily: Vec<ForecastDay>,
}

/// Everything shown for one completed search. Replaced as a whole, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub country: String,
    pub timezone: Option<String>,
    pub current_temperature_c: f64,
    pub current_windspeed_kmh: f64,
    pub condition_code: i32,
    pub condition: String,
    pub daily: Vec<ForecastDay>,
}

impl WeatherSnapshot {
    pub fn new(location: GeoResult, forecast: Forecast) -> Self {
        let Forecast { current, daily } = forecast;

        Self {
            city: location.name,
            country: location.country.unwrap_or_default(),
            timezone: location.timezone,
            current_temperature_c: current.temperature_c,
            current_windspeed_kmh: current.windspeed_kmh,
            condition_code: current.weather_code,
            condition: condition_for_code(current.weather_code).to_string(),
            daily,
        }
    }
}
