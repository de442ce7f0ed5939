use crate::{
    Config,
    model::{Forecast, GeoResult, SearchQuery},
    provider::openmeteo::OpenMeteoProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openmeteo;

/// Backend answering the two lookups of a search.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// First match for `query`, or `None` when the service knows no such place.
    async fn geocode(&self, query: &SearchQuery) -> anyhow::Result<Option<GeoResult>>;

    /// Current conditions plus daily aggregates for a geocoded location.
    async fn forecast(&self, location: &GeoResult) -> anyhow::Result<Forecast>;
}

/// Construct the provider described by `config`.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let provider = OpenMeteoProvider::new(config)?;
    Ok(Arc::new(provider))
}
