//! Search view-model.
//!
//! `WeatherApp` owns the view state and runs a search as two sequential
//! lookups (geocode, then forecast). Searches are not cancelled: when several
//! overlap, whichever resolves last leaves its result in the view.

use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    clock::{Clock, LocalTime, SystemClock},
    condition::{Theme, theme_for},
    model::{SearchQuery, WeatherSnapshot},
    provider::WeatherProvider,
};

/// Why a search produced no snapshot. `Display` is the text shown to the user.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("City not found")]
    CityNotFound,

    #[error("Failed to fetch weather data")]
    Fetch(#[source] anyhow::Error),
}

#[derive(Debug)]
pub enum SearchOutcome {
    /// The query was blank; nothing was requested.
    Skipped,
    Found,
    Failed(SearchError),
}

/// Everything the renderer needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub query: String,
    pub snapshot: Option<WeatherSnapshot>,
    pub loading: bool,
    pub error: Option<String>,
    pub dark_mode: bool,
    /// Captured once when the snapshot lands.
    pub local_time: Option<LocalTime>,
}

impl ViewState {
    pub fn theme(&self) -> Theme {
        self.snapshot.as_ref().map_or(Theme::Default, |s| theme_for(&s.condition))
    }

    /// e.g. `app-container bg-gradient-rainy dark-mode`
    pub fn container_class(&self) -> String {
        let mut class = format!("app-container {}", self.theme().css_class());
        if self.dark_mode {
            class.push_str(" dark-mode");
        }
        class
    }
}

#[derive(Debug)]
pub struct WeatherApp {
    provider: Arc<dyn WeatherProvider>,
    clock: Arc<dyn Clock>,
    state: Mutex<ViewState>,
    generation: AtomicU64,
}

impl WeatherApp {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self::with_clock(provider, Arc::new(SystemClock))
    }

    pub fn with_clock(provider: Arc<dyn WeatherProvider>, clock: Arc<dyn Clock>) -> Self {
        Self { provider, clock, state: Mutex::new(ViewState::default()), generation: AtomicU64::new(0) }
    }

    /// Copy of the current view state.
    pub fn state(&self) -> ViewState {
        self.state.lock().clone()
    }

    pub fn set_query(&self, input: &str) {
        self.state.lock().query = input.to_string();
    }

    pub fn set_dark_mode(&self, dark_mode: bool) {
        self.state.lock().dark_mode = dark_mode;
    }

    /// Flip dark mode and return the new value.
    pub fn toggle_dark_mode(&self) -> bool {
        let mut state = self.state.lock();
        state.dark_mode = !state.dark_mode;
        state.dark_mode
    }

    /// Set the query and submit it.
    pub async fn search(&self, input: &str) -> SearchOutcome {
        self.set_query(input);
        self.submit().await
    }

    /// Run a search for the current query.
    ///
    /// A blank query is ignored without touching the network or the view.
    pub async fn submit(&self) -> SearchOutcome {
        let query = SearchQuery::parse(&self.state.lock().query);
        let Some(query) = query else {
            debug!("Ignoring blank search");
            return SearchOutcome::Skipped;
        };

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock();
            state.loading = true;
            state.error = None;
            state.snapshot = None;
            state.local_time = None;
        }

        let result = self.lookup(&query).await;

        // Not used to drop the result: the last search to resolve always wins.
        let latest = self.generation.load(Ordering::SeqCst);
        if generation != latest {
            debug!(%query, generation, latest, "Search resolved after a newer one was submitted");
        }

        let mut state = self.state.lock();
        state.loading = false;

        match result {
            Ok(snapshot) => {
                info!(%query, city = %snapshot.city, condition = %snapshot.condition, "Weather loaded");
                state.error = None;
                state.local_time = Some(LocalTime::at(self.clock.now(), snapshot.timezone.as_deref()));
                state.snapshot = Some(snapshot);
                SearchOutcome::Found
            }
            Err(err) => {
                match &err {
                    SearchError::CityNotFound => info!(%query, "City not found"),
                    SearchError::Fetch(cause) => warn!(%query, "Weather lookup failed: {cause:#}"),
                }
                state.snapshot = None;
                state.local_time = None;
                state.error = Some(err.to_string());
                SearchOutcome::Failed(err)
            }
        }
    }

    async fn lookup(&self, query: &SearchQuery) -> Result<WeatherSnapshot, SearchError> {
        let location = self
            .provider
            .geocode(query)
            .await
            .map_err(SearchError::Fetch)?
            .ok_or(SearchError::CityNotFound)?;

        let forecast = self.provider.forecast(&location).await.map_err(SearchError::Fetch)?;

        Ok(WeatherSnapshot::new(location, forecast))
    }
}
