//! Background weather fetches
//!
//! Fetches run on spawned tokio tasks so the clock keeps ticking while a
//! request is in flight. Each outcome comes back over a channel tagged with
//! the sequence number of the request that produced it.

use tokio::sync::mpsc;

use crate::data::{WeatherSnapshot, WeatherSource};
use crate::locale::LanguageTag;
use crate::position::Coordinates;

/// A fetch the dashboard wants performed
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    /// Monotonic request number, used to drop stale outcomes
    pub seq: u64,
    pub coordinates: Coordinates,
    pub language: LanguageTag,
}

/// Result of one fetch
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// Sequence number of the originating request
    pub seq: u64,
    /// The snapshot, or `None` when the fetch failed
    pub snapshot: Option<WeatherSnapshot>,
}

/// Spawns fetches and collects their outcomes
pub struct FetchDispatcher<S: WeatherSource> {
    source: S,
    sender: mpsc::Sender<FetchOutcome>,
    /// Channel receiving fetch outcomes in completion order
    pub receiver: mpsc::Receiver<FetchOutcome>,
}

impl<S: WeatherSource> FetchDispatcher<S> {
    pub fn new(source: S) -> Self {
        let (sender, receiver) = mpsc::channel(16);
        Self {
            source,
            sender,
            receiver,
        }
    }

    /// Starts a fetch for `request` without waiting for it.
    ///
    /// In-flight fetches are neither cancelled nor deduplicated.
    pub fn dispatch(&self, request: FetchRequest) {
        let source = self.source.clone();
        let sender = self.sender.clone();

        tracing::info!(
            seq = request.seq,
            lat = request.coordinates.latitude,
            lon = request.coordinates.longitude,
            lang = %request.language,
            "dispatching weather fetch"
        );

        tokio::spawn(async move {
            let snapshot = source.fetch(request.coordinates, request.language).await;
            let outcome = FetchOutcome {
                seq: request.seq,
                snapshot,
            };
            // The dashboard may already be shutting down
            let _ = sender.send(outcome).await;
        });
    }
}
