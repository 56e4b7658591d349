//! Command-line interface parsing for meteodash
//!
//! This module handles parsing of CLI arguments using clap. Most flags fall
//! back to `METEODASH_*` environment variables, and the result is validated
//! into a [`StartupConfig`] before the terminal is touched.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::data::weather::{DEFAULT_API_HOST, DEFAULT_API_URL};
use crate::data::WeatherCredentials;
use crate::locale::LanguageTag;
use crate::logging;
use crate::position::{Coordinates, WatchOptions, DEFAULT_LOCATE_URL};

/// Error types for CLI argument validation
#[derive(Debug, Error, PartialEq)]
pub enum CliError {
    /// Latitude outside [-90, 90]
    #[error("Invalid latitude: {0}. Expected a value between -90 and 90")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180]
    #[error("Invalid longitude: {0}. Expected a value between -180 and 180")]
    InvalidLongitude(f64),

    /// Only one of --lat / --lon was given
    #[error("Invalid position: --lat and --lon must be given together")]
    IncompleteCoordinates,

    /// The language is not a two-letter code
    #[error("Invalid language: '{0}'. Expected a two-letter code such as fr or en")]
    InvalidLanguage(String),

    /// A zero polling interval
    #[error("Invalid locate interval: must be at least one second")]
    InvalidInterval,
}

/// meteodash - A live weather dashboard for the terminal
#[derive(Parser, Debug)]
#[command(name = "meteodash")]
#[command(about = "Live weather dashboard for your current position")]
#[command(version)]
pub struct Cli {
    /// Weather API key
    #[arg(long, env = "METEODASH_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Weather API host header
    #[arg(long, env = "METEODASH_API_HOST", default_value = DEFAULT_API_HOST)]
    pub api_host: String,

    /// Weather API base URL
    #[arg(long, env = "METEODASH_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Fixed latitude; skips IP geolocation (requires --lon)
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Fixed longitude; skips IP geolocation (requires --lat)
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// IP geolocation service base URL
    #[arg(long, env = "METEODASH_LOCATE_URL", default_value = DEFAULT_LOCATE_URL)]
    pub locate_url: String,

    /// Seconds between position checks
    #[arg(long, value_name = "SECONDS", default_value_t = 60)]
    pub locate_interval: u64,

    /// Two-letter language for dates and conditions (defaults to the system locale)
    #[arg(long, value_name = "CODE")]
    pub lang: Option<String>,

    /// Log file path
    #[arg(long, env = "METEODASH_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

/// Where the dashboard gets its position from
#[derive(Debug, Clone, PartialEq)]
pub enum PositionSource {
    /// Coordinates given on the command line
    Fixed(Coordinates),
    /// IP geolocation against a base URL
    IpLookup { base_url: String },
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub credentials: WeatherCredentials,
    pub api_url: String,
    pub position: PositionSource,
    pub watch: WatchOptions,
    pub language: LanguageTag,
    /// `None` when no log location can be determined
    pub log_file: Option<PathBuf>,
}

/// Parses a `--lang` argument into a language tag.
///
/// Accepts full locale names like `fr_FR.UTF-8` and keeps the language part.
pub fn parse_language_arg(s: &str) -> Result<LanguageTag, CliError> {
    LanguageTag::parse(s).ok_or_else(|| CliError::InvalidLanguage(s.to_string()))
}

fn validate_coordinates(lat: f64, lon: f64) -> Result<Coordinates, CliError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(CliError::InvalidLatitude(lat));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(CliError::InvalidLongitude(lon));
    }
    Ok(Coordinates::new(lat, lon))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with a validated position source and language
    /// * `Err(CliError)` if a value is out of range or malformed
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let position = match (cli.lat, cli.lon) {
            (Some(lat), Some(lon)) => PositionSource::Fixed(validate_coordinates(lat, lon)?),
            (None, None) => PositionSource::IpLookup {
                base_url: cli.locate_url.clone(),
            },
            _ => return Err(CliError::IncompleteCoordinates),
        };

        if cli.locate_interval == 0 {
            return Err(CliError::InvalidInterval);
        }
        let watch = WatchOptions {
            interval: Duration::from_secs(cli.locate_interval),
            ..WatchOptions::default()
        };

        let language = match &cli.lang {
            Some(lang) => parse_language_arg(lang)?,
            None => LanguageTag::from_env(),
        };

        Ok(StartupConfig {
            credentials: WeatherCredentials {
                api_key: cli.api_key.clone(),
                api_host: cli.api_host.clone(),
            },
            api_url: cli.api_url.clone(),
            position,
            watch,
            language,
            log_file: cli.log_file.clone().or_else(logging::default_log_path),
        })
    }
}
