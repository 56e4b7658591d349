//! Integration tests for WeatherClient using wiremock.
//!
//! These tests verify the weather fetcher against a mock HTTP server.

use meteodash::data::{WeatherClient, WeatherCredentials, WeatherSource};
use meteodash::locale::LanguageTag;
use meteodash::position::Coordinates;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a client pointing at the mock server
fn test_client(base_url: &str) -> WeatherClient {
    WeatherClient::new(WeatherCredentials {
        api_key: "test-key".to_string(),
        api_host: "weather.test".to_string(),
    })
    .with_base_url(base_url)
}

fn paris() -> Coordinates {
    Coordinates::new(48.85, 2.35)
}

fn french() -> LanguageTag {
    LanguageTag::parse("fr").unwrap()
}

/// Helper to create a forecast body
fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "location": { "name": "Paris", "country": "France" },
        "current": {
            "condition": { "text": "Partiellement nuageux" },
            "temp_c": 18.0,
            "temp_f": 64.4,
            "feelslike_c": 17.2,
            "feelslike_f": 63.0,
            "pressure_mb": 1015.0,
            "wind_kph": 11.2,
            "wind_mph": 6.9,
            "wind_dir": "WSW",
            "humidity": 64,
            "vis_km": 10.0,
            "vis_miles": 6.0,
            "uv": 4.0
        },
        "forecast": {
            "forecastday": [
                { "astro": { "sunrise": "07:12 AM", "sunset": "07:48 PM" } },
                { "astro": { "sunrise": "07:13 AM", "sunset": "07:46 PM" } }
            ]
        }
    })
}

#[tokio::test]
async fn test_fetch_success_sends_headers_and_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("q", "48.85,2.35"))
        .and(query_param("days", "3"))
        .and(query_param("lang", "fr"))
        .and(header("X-RapidAPI-Key", "test-key"))
        .and(header("X-RapidAPI-Host", "weather.test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let snapshot = test_client(&mock_server.uri())
        .fetch(paris(), french())
        .await
        .expect("snapshot");

    assert_eq!(snapshot.location.name.as_deref(), Some("Paris"));
    assert_eq!(snapshot.current.temp_c, Some(18.0));
    assert_eq!(snapshot.current.humidity, Some(64.0));
    assert_eq!(snapshot.current.wind_dir.as_deref(), Some("WSW"));
    assert_eq!(
        snapshot.today_astro().and_then(|a| a.sunset.as_deref()),
        Some("07:48 PM")
    );
    assert!(snapshot.error.is_none());
}

#[tokio::test]
async fn test_fetch_passes_error_body_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": { "code": 1006, "message": "No matching location found." }
        })))
        .mount(&mock_server)
        .await;

    let snapshot = test_client(&mock_server.uri())
        .fetch(paris(), french())
        .await
        .expect("error bodies still parse");

    let error = snapshot.error.expect("error object");
    assert_eq!(error.code, Some(1006));
    assert_eq!(error.message.as_deref(), Some("No matching location found."));
    assert!(snapshot.current.temp_c.is_none());
}

#[tokio::test]
async fn test_fetch_mistyped_fields_keep_the_snapshot() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "location": { "name": "Paris", "country": "France" },
            "current": { "temp_c": 18.0, "humidity": "64" },
            "forecast": null
        })))
        .mount(&mock_server)
        .await;

    let snapshot = test_client(&mock_server.uri())
        .fetch(paris(), french())
        .await
        .expect("a JSON body always yields a snapshot");

    assert_eq!(snapshot.location.name.as_deref(), Some("Paris"));
    assert_eq!(snapshot.current.temp_c, Some(18.0));
    assert!(snapshot.current.humidity.is_none());
    assert!(snapshot.today_astro().is_none());
}

#[tokio::test]
async fn test_fetch_non_json_body_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad gateway</html>"))
        .mount(&mock_server)
        .await;

    let result = test_client(&mock_server.uri()).fetch(paris(), french()).await;
    assert!(result.is_none());
}

#[tokio::test]
async fn test_fetch_unreachable_host_is_none() {
    let result = test_client("http://127.0.0.1:1")
        .fetch(paris(), french())
        .await;
    assert!(result.is_none());
}

#[tokio::test]
async fn test_try_fetch_reports_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let result = test_client(&mock_server.uri())
        .try_fetch(paris(), &french())
        .await;
    assert!(matches!(
        result,
        Err(meteodash::data::WeatherError::ParseError(_))
    ));
}
