//! Open-Meteo provider and search flow against a mock HTTP server.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use weather_core::{
    Config, FixedClock, SearchError, SearchOutcome, SearchQuery, Theme, WeatherApp, icon_for,
    provider_from_config,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn paris_geocode() -> serde_json::Value {
    serde_json::json!({
        "results": [{
            "id": 2988507,
            "name": "Paris",
            "latitude": 48.85,
            "longitude": 2.35,
            "country": "France",
            "timezone": "Europe/Paris"
        }],
        "generationtime_ms": 0.9
    })
}

fn paris_forecast(code: i32) -> serde_json::Value {
    serde_json::json!({
        "latitude": 48.86,
        "longitude": 2.34,
        "timezone": "Europe/Paris",
        "current_weather": {
            "temperature": 21.4,
            "windspeed": 9.7,
            "winddirection": 250,
            "weathercode": code,
            "time": "2024-07-14T14:30"
        },
        "daily": {
            "time": ["2024-07-14", "2024-07-15", "2024-07-16", "2024-07-17", "2024-07-18", "2024-07-19", "2024-07-20"],
            "temperature_2m_max": [25.4, 26.1, 24.0, 22.3, 23.8, 27.0, 28.2],
            "temperature_2m_min": [14.6, 15.2, 13.9, 12.1, 13.0, 16.4, 17.5],
            "precipitation_probability_max": [0, 10, 55, null, 20, 5, 0],
            "weathercode": [code, 2, 61, 3, 80, 1, 0]
        }
    })
}

fn test_config(server: &MockServer) -> Config {
    Config {
        geocoding_url: format!("{}/v1/search", server.uri()),
        forecast_url: format!("{}/v1/forecast", server.uri()),
        timeout_secs: 5,
        ..Config::default()
    }
}

fn test_app(server: &MockServer) -> WeatherApp {
    let provider = provider_from_config(&test_config(server)).expect("provider");
    let now = Utc.with_ymd_and_hms(2024, 7, 14, 12, 30, 0).single().expect("valid instant");
    WeatherApp::with_clock(provider, Arc::new(FixedClock(now)))
}

async fn mount_geocode(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mount_forecast(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn paris_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Paris"))
        .and(query_param("count", "1"))
        .and(query_param("language", "en"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_geocode()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "48.85"))
        .and(query_param("longitude", "2.35"))
        .and(query_param("current_weather", "true"))
        .and(query_param(
            "daily",
            "temperature_2m_max,temperature_2m_min,precipitation_probability_max,weathercode",
        ))
        .and(query_param("timezone", "Europe/Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_forecast(0)))
        .expect(1)
        .mount(&server)
        .await;

    let app = test_app(&server);
    let outcome = app.search("Paris").await;
    assert!(matches!(outcome, SearchOutcome::Found), "{outcome:?}");

    let state = app.state();
    let snapshot = state.snapshot.as_ref().expect("snapshot set");
    assert_eq!(snapshot.city, "Paris");
    assert_eq!(snapshot.country, "France");
    assert_eq!(snapshot.condition, "Clear sky");
    assert_eq!(icon_for(&snapshot.condition), "☀️");
    assert_eq!(state.theme(), Theme::Sunny);
    assert_eq!(snapshot.current_temperature_c, 21.4);
    assert_eq!(snapshot.current_windspeed_kmh, 9.7);

    // Seven days served, five kept.
    assert_eq!(snapshot.daily.len(), 5);
    assert_eq!(snapshot.daily[2].condition(), "Slight rain");
    assert_eq!(snapshot.daily[3].precipitation_probability, None);

    let local = state.local_time.expect("local time");
    assert_eq!(local.time, "02:30 PM");
}

#[tokio::test]
async fn empty_results_mean_city_not_found() {
    let server = MockServer::start().await;
    mount_geocode(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_forecast(0)))
        .expect(0)
        .mount(&server)
        .await;

    let app = test_app(&server);
    let outcome = app.search("Nowhereville").await;

    assert!(matches!(outcome, SearchOutcome::Failed(SearchError::CityNotFound)));
    let state = app.state();
    assert_eq!(state.error.as_deref(), Some("City not found"));
    assert!(state.snapshot.is_none());
    assert!(!state.loading);
}

#[tokio::test]
async fn missing_results_key_means_city_not_found() {
    let server = MockServer::start().await;
    mount_geocode(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "generationtime_ms": 0.3 })),
    )
    .await;

    let app = test_app(&server);

    assert!(matches!(
        app.search("Xyzzy").await,
        SearchOutcome::Failed(SearchError::CityNotFound)
    ));
}

#[tokio::test]
async fn server_error_is_a_generic_failure() {
    let server = MockServer::start().await;
    mount_geocode(&server, ResponseTemplate::new(200).set_body_json(paris_geocode())).await;
    mount_forecast(&server, ResponseTemplate::new(503).set_body_string("maintenance")).await;

    let app = test_app(&server);

    match app.search("Paris").await {
        SearchOutcome::Failed(SearchError::Fetch(cause)) => {
            assert!(format!("{cause:#}").contains("503"), "{cause:#}");
        }
        other => panic!("expected a fetch error, got {other:?}"),
    }
    let state = app.state();
    assert_eq!(state.error.as_deref(), Some("Failed to fetch weather data"));
    assert!(state.snapshot.is_none());
    assert!(!state.loading);
}

#[tokio::test]
async fn malformed_json_is_a_generic_failure() {
    let server = MockServer::start().await;
    mount_geocode(&server, ResponseTemplate::new(200).set_body_string("<html>oops</html>")).await;

    let app = test_app(&server);

    assert!(matches!(app.search("Paris").await, SearchOutcome::Failed(SearchError::Fetch(_))));
    assert_eq!(app.state().error.as_deref(), Some("Failed to fetch weather data"));
}

#[tokio::test]
async fn unreachable_server_is_a_generic_failure() {
    let config = Config {
        geocoding_url: "http://127.0.0.1:1/v1/search".into(),
        forecast_url: "http://127.0.0.1:1/v1/forecast".into(),
        timeout_secs: 2,
        ..Config::default()
    };

    let provider = provider_from_config(&config).expect("provider");
    let app = WeatherApp::new(provider);

    assert!(matches!(app.search("Paris").await, SearchOutcome::Failed(SearchError::Fetch(_))));
    assert!(!app.state().loading);
}

#[tokio::test]
async fn missing_timezone_asks_for_auto() {
    let server = MockServer::start().await;
    mount_geocode(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{ "name": "Null Island", "latitude": 0.0, "longitude": 0.0 }]
        })),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_forecast(45)))
        .expect(1)
        .mount(&server)
        .await;

    let app = test_app(&server);
    assert!(matches!(app.search("Null Island").await, SearchOutcome::Found));

    let state = app.state();
    let snapshot = state.snapshot.as_ref().expect("snapshot set");
    assert_eq!(snapshot.country, "");
    assert_eq!(snapshot.condition, "Foggy");
    assert_eq!(icon_for(&snapshot.condition), "🌫️");
    assert_eq!(state.theme(), Theme::Default);
    // No zone from geocoding: rendered in UTC.
    assert_eq!(state.local_time.expect("local time").time, "12:30 PM");
}

#[tokio::test]
async fn provider_geocode_returns_first_match_only() {
    let server = MockServer::start().await;
    mount_geocode(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                { "name": "Springfield", "latitude": 39.8, "longitude": -89.64, "country": "United States", "timezone": "America/Chicago" },
                { "name": "Springfield", "latitude": 37.2, "longitude": -93.29, "country": "United States", "timezone": "America/Chicago" }
            ]
        })),
    )
    .await;

    let provider = provider_from_config(&test_config(&server)).expect("provider");
    let query = SearchQuery::parse("Springfield").expect("query");
    let location = provider.geocode(&query).await.expect("geocode").expect("a match");

    assert_eq!(location.latitude, 39.8);
    assert_eq!(location.timezone.as_deref(), Some("America/Chicago"));
}
