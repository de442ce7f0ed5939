//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - The Open-Meteo provider (geocoding + forecast) behind a provider trait
//! - The search view-model and its view state
//! - Pure presentation mapping: WMO codes, icons, themes, local time, text rendering
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod app;
pub mod clock;
pub mod condition;
pub mod config;
pub mod model;
pub mod provider;
pub mod render;

pub use app::{SearchError, SearchOutcome, ViewState, WeatherApp};
pub use clock::{Clock, FixedClock, LocalTime, SystemClock};
pub use condition::{ConditionKind, Theme, condition_for_code, icon_for, theme_for};
pub use config::Config;
pub use model::{CurrentConditions, Forecast, ForecastDay, GeoResult, SearchQuery, WeatherSnapshot};
pub use provider::{WeatherProvider, provider_from_config};
pub use render::render;
