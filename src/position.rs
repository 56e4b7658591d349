//! Position source
//!
//! A [`PositionWatch`] repeatedly asks a [`PositionProvider`] where the
//! viewer is and reports fixes or errors over a channel, only when the
//! answer changes. The IP-based locator stands in for a platform location
//! service; fixed coordinates can be given on the command line instead.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Base URL of the IP geolocation service
pub const DEFAULT_LOCATE_URL: &str = "http://ip-api.com";

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Reasons a position could not be determined
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    /// The location service refused to answer
    #[error("Location permission denied")]
    PermissionDenied,

    /// No answer within the configured timeout
    #[error("Location request timed out")]
    Timeout,

    /// The location service could not produce a fix
    #[error("Location unavailable: {0}")]
    Unavailable(String),
}

/// Something that can report the current position
pub trait PositionProvider: Send + Sync + 'static {
    fn locate(
        &self,
    ) -> impl std::future::Future<Output = Result<Coordinates, PositionError>> + Send;
}

/// What the watch reports to its consumer
#[derive(Debug, Clone, PartialEq)]
pub enum PositionEvent {
    /// A new fix
    Fix(Coordinates),
    /// The latest attempt failed; the message is meant for display
    Error(String),
}

/// Settings for a position watch
#[derive(Debug, Clone, Copy)]
pub struct WatchOptions {
    /// Upper bound on a single locate attempt
    pub timeout: Duration,
    /// Delay between attempts
    pub interval: Duration,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            interval: Duration::from_secs(60),
        }
    }
}

/// Reports the same coordinates forever
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

impl PositionProvider for FixedPosition {
    async fn locate(&self) -> Result<Coordinates, PositionError> {
        Ok(self.0)
    }
}

/// Locates the viewer from their public IP address (ip-api.com shape)
#[derive(Debug, Clone)]
pub struct IpLocator {
    client: Client,
    base_url: String,
}

impl IpLocator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Builds the lookup URL
    fn url(&self) -> String {
        format!(
            "{}/json?fields=status,message,lat,lon",
            self.base_url.trim_end_matches('/')
        )
    }
}

impl PositionProvider for IpLocator {
    async fn locate(&self) -> Result<Coordinates, PositionError> {
        let response = self
            .client
            .get(self.url())
            .send()
            .await
            .map_err(request_error)?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Err(PositionError::PermissionDenied);
        }

        let body: IpApiResponse = response.json().await.map_err(request_error)?;
        body.into_coordinates()
    }
}

/// Maps a transport error to a position error
fn request_error(err: reqwest::Error) -> PositionError {
    if err.is_timeout() {
        PositionError::Timeout
    } else {
        PositionError::Unavailable(err.to_string())
    }
}

/// ip-api.com JSON body
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpApiResponse {
    fn into_coordinates(self) -> Result<Coordinates, PositionError> {
        if self.status != "success" {
            let message = self.message.unwrap_or(self.status);
            return Err(PositionError::Unavailable(message));
        }

        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
            _ => Err(PositionError::Unavailable(
                "response carried no coordinates".to_string(),
            )),
        }
    }
}

/// Handle to a running position watch
///
/// The background task is aborted when the handle is dropped.
pub struct PositionWatch {
    /// Channel receiving position changes
    pub receiver: mpsc::Receiver<PositionEvent>,
    task: JoinHandle<()>,
}

impl PositionWatch {
    /// Starts watching `provider`.
    pub fn spawn<P: PositionProvider>(provider: P, options: WatchOptions) -> Self {
        let (tx, rx) = mpsc::channel(8);

        let task = tokio::spawn(async move {
            let mut last: Option<PositionEvent> = None;

            loop {
                let event = match tokio::time::timeout(options.timeout, provider.locate()).await
                {
                    Ok(Ok(coordinates)) => PositionEvent::Fix(coordinates),
                    Ok(Err(err)) => PositionEvent::Error(err.to_string()),
                    Err(_) => PositionEvent::Error(PositionError::Timeout.to_string()),
                };

                if last.as_ref() != Some(&event) {
                    match &event {
                        PositionEvent::Fix(c) => {
                            tracing::info!(lat = c.latitude, lon = c.longitude, "position fix")
                        }
                        PositionEvent::Error(msg) => tracing::warn!(%msg, "position unavailable"),
                    }
                    if tx.send(event.clone()).await.is_err() {
                        break;
                    }
                    last = Some(event);
                }

                tokio::time::sleep(options.interval).await;
            }
        });

        Self { receiver: rx, task }
    }

    /// Returns true once the watch task has stopped
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PositionWatch {
    fn drop(&mut self) {
        self.task.abort();
    }
}
