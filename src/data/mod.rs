//! Weather data model
//!
//! [`WeatherSnapshot`] mirrors the body of the weather API's
//! `forecast.json` endpoint. Every field is optional and the body is passed
//! through without shape validation: a field that is missing, `null` or of
//! the wrong type comes out blank while the rest of the body survives.

pub mod weather;

pub use weather::{WeatherClient, WeatherCredentials, WeatherError, WeatherSource};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// One complete weather reading, replaced wholesale on every fetch
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WeatherSnapshot {
    #[serde(deserialize_with = "lenient")]
    pub location: Place,
    #[serde(deserialize_with = "lenient")]
    pub current: CurrentConditions,
    #[serde(deserialize_with = "lenient")]
    pub forecast: Forecast,
    /// Error object the API puts in the body when it rejects a request
    #[serde(deserialize_with = "lenient")]
    pub error: Option<ApiError>,
}

/// Where the reading applies
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Place {
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub country: Option<String>,
}

/// Current conditions
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CurrentConditions {
    #[serde(deserialize_with = "lenient")]
    pub condition: Condition,
    /// Temperature in Celsius
    #[serde(deserialize_with = "lenient")]
    pub temp_c: Option<f64>,
    /// Temperature in Fahrenheit
    #[serde(deserialize_with = "lenient")]
    pub temp_f: Option<f64>,
    /// Felt temperature in Celsius
    #[serde(deserialize_with = "lenient")]
    pub feelslike_c: Option<f64>,
    /// Felt temperature in Fahrenheit
    #[serde(deserialize_with = "lenient")]
    pub feelslike_f: Option<f64>,
    /// Pressure in millibars
    #[serde(deserialize_with = "lenient")]
    pub pressure_mb: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub wind_kph: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub wind_mph: Option<f64>,
    /// 16-point compass abbreviation ("NE", "WSW", ...)
    #[serde(deserialize_with = "lenient")]
    pub wind_dir: Option<String>,
    /// Relative humidity percentage
    #[serde(deserialize_with = "lenient")]
    pub humidity: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub vis_km: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub vis_miles: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub uv: Option<f64>,
}

/// Textual description of the sky, in the requested language
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Condition {
    #[serde(deserialize_with = "lenient")]
    pub text: Option<String>,
}

/// Short forecast window
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Forecast {
    #[serde(deserialize_with = "lenient")]
    pub forecastday: Vec<ForecastDay>,
}

/// One forecast day
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForecastDay {
    #[serde(deserialize_with = "lenient")]
    pub astro: Astro,
}

/// Sun times as the provider formats them ("06:05 AM")
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Astro {
    #[serde(deserialize_with = "lenient")]
    pub sunrise: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub sunset: Option<String>,
}

/// Upstream error carried in a response body
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiError {
    #[serde(deserialize_with = "lenient")]
    pub code: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub message: Option<String>,
}

impl WeatherSnapshot {
    /// Builds a snapshot from any JSON value.
    ///
    /// A body that is not an object yields an empty snapshot.
    pub fn from_json(body: serde_json::Value) -> Self {
        Self::deserialize(body).unwrap_or_default()
    }

    /// Astronomy for today, if the forecast has any days
    pub fn today_astro(&self) -> Option<&Astro> {
        self.forecast.forecastday.first().map(|day| &day.astro)
    }
}

/// Deserializes `T`, falling back to its default when the value is `null`
/// or has the wrong shape
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}
