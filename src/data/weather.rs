//! Weather API client
//!
//! Fetches current conditions and a three-day forecast from the
//! RapidAPI-hosted WeatherAPI `forecast.json` endpoint.

use reqwest::Client;
use thiserror::Error;

use super::WeatherSnapshot;
use crate::locale::LanguageTag;
use crate::position::Coordinates;

/// Base URL of the weather API
pub const DEFAULT_API_URL: &str = "https://weatherapi-com.p.rapidapi.com";

/// Host identifier expected by the API gateway
pub const DEFAULT_API_HOST: &str = "weatherapi-com.p.rapidapi.com";

/// Number of forecast days requested
pub const FORECAST_DAYS: u8 = 3;

const KEY_HEADER: &str = "X-RapidAPI-Key";
const HOST_HEADER: &str = "X-RapidAPI-Host";

/// Errors that can occur while fetching weather data
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Body was not JSON
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Credentials sent with every request
#[derive(Debug, Clone)]
pub struct WeatherCredentials {
    pub api_key: String,
    pub api_host: String,
}

/// Anything that can produce a weather snapshot for a position
pub trait WeatherSource: Clone + Send + Sync + 'static {
    /// Fetches one snapshot. Failures are logged and reported as `None`.
    fn fetch(
        &self,
        coordinates: Coordinates,
        language: LanguageTag,
    ) -> impl std::future::Future<Output = Option<WeatherSnapshot>> + Send;
}

/// Client for the weather API
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    credentials: WeatherCredentials,
}

impl WeatherClient {
    /// Create a client against the default endpoint
    pub fn new(credentials: WeatherCredentials) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_API_URL.to_string(),
            credentials,
        }
    }

    /// Point the client at another base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builds the request URL for a position and language
    fn url(&self, coordinates: Coordinates, language: &LanguageTag) -> String {
        format!(
            "{}/forecast.json?q={},{}&days={}&lang={}",
            self.base_url.trim_end_matches('/'),
            coordinates.latitude,
            coordinates.longitude,
            FORECAST_DAYS,
            language
        )
    }

    /// Fetch a snapshot, surfacing failures as errors
    ///
    /// The HTTP status is not checked: whatever body comes back is parsed
    /// as a snapshot, with mistyped fields left blank. Only a body that is
    /// not JSON at all fails. Error-shaped bodies are logged and passed through.
    pub async fn try_fetch(
        &self,
        coordinates: Coordinates,
        language: &LanguageTag,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let url = self.url(coordinates, language);
        tracing::debug!(%url, "fetching weather");

        let response = self
            .client
            .get(&url)
            .header(KEY_HEADER, &self.credentials.api_key)
            .header(HOST_HEADER, &self.credentials.api_host)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        let body: serde_json::Value = serde_json::from_str(&text)?;
        let snapshot = WeatherSnapshot::from_json(body);

        if let Some(error) = &snapshot.error {
            tracing::warn!(
                %status,
                code = ?error.code,
                reason = error.message.as_deref().unwrap_or_default(),
                "weather API returned an error body"
            );
        }

        Ok(snapshot)
    }
}

impl WeatherSource for WeatherClient {
    async fn fetch(
        &self,
        coordinates: Coordinates,
        language: LanguageTag,
    ) -> Option<WeatherSnapshot> {
        match self.try_fetch(coordinates, &language).await {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                tracing::error!(error = %err, "weather fetch failed");
                None
            }
        }
    }
}
