//! Dashboard state
//!
//! [`App`] holds everything the dashboard renders: the latest clock reading,
//! the current position, the language and the weather snapshot. It decides
//! when a new weather fetch is needed but never performs one itself; the
//! main loop dispatches the [`FetchRequest`]s it hands out and feeds the
//! outcomes back in.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::clock::ClockReading;
use crate::data::WeatherSnapshot;
use crate::locale::LanguageTag;
use crate::position::{Coordinates, PositionEvent};
use crate::refresh::{FetchOutcome, FetchRequest};

/// Units used for temperatures and visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitSystem {
    /// Celsius and kilometres
    #[default]
    Metric,
    /// Fahrenheit and miles
    Imperial,
}

impl UnitSystem {
    pub fn toggled(self) -> Self {
        match self {
            UnitSystem::Metric => UnitSystem::Imperial,
            UnitSystem::Imperial => UnitSystem::Metric,
        }
    }
}

/// Main application struct managing dashboard state
pub struct App {
    /// Latest clock reading
    pub clock: ClockReading,
    /// Last known position, `None` until a fix arrives or after an error
    pub coordinates: Option<Coordinates>,
    /// Message from the last failed position attempt
    pub position_error: Option<String>,
    /// Language for weather descriptions and calendar names
    pub language: LanguageTag,
    /// Latest weather snapshot, `None` before the first fetch or after a failure
    pub weather: Option<WeatherSnapshot>,
    /// Units for temperatures and visibility
    pub units: UnitSystem,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// (coordinates, language) of the most recent fetch request
    last_requested: Option<(Coordinates, LanguageTag)>,
    /// Sequence number for the next fetch request
    next_seq: u64,
    /// Outcomes with a lower sequence number are stale
    accept_from: u64,
}

impl App {
    /// Creates the dashboard with an initial clock reading
    pub fn new(clock: ClockReading, language: LanguageTag) -> Self {
        Self {
            clock,
            coordinates: None,
            position_error: None,
            language,
            weather: None,
            units: UnitSystem::default(),
            should_quit: false,
            show_help: false,
            last_requested: None,
            next_seq: 1,
            accept_from: 1,
        }
    }

    /// Replaces the clock reading
    pub fn on_tick(&mut self, reading: ClockReading) {
        self.clock = reading;
    }

    /// Applies a position change.
    ///
    /// A fix replaces both coordinates at once and clears the error. An
    /// error clears the coordinates and the snapshot; fetches already in
    /// flight will be ignored when they complete.
    pub fn on_position(&mut self, event: PositionEvent) {
        match event {
            PositionEvent::Fix(coordinates) => {
                self.coordinates = Some(coordinates);
                self.position_error = None;
            }
            PositionEvent::Error(message) => {
                self.coordinates = None;
                self.position_error = Some(message);
                self.weather = None;
                self.last_requested = None;
                self.accept_from = self.next_seq;
            }
        }
    }

    /// Returns a fetch request if the position or language changed since
    /// the last one.
    ///
    /// Nothing is requested without coordinates, and calling this again
    /// without a change returns `None`.
    pub fn next_fetch(&mut self) -> Option<FetchRequest> {
        let coordinates = self.coordinates?;
        let key = (coordinates, self.language.clone());
        if self.last_requested.as_ref() == Some(&key) {
            return None;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.last_requested = Some(key);

        Some(FetchRequest {
            seq,
            coordinates,
            language: self.language.clone(),
        })
    }

    /// Applies a completed fetch.
    ///
    /// The snapshot is replaced wholesale, with `None` on failure. An outcome
    /// older than one already applied is discarded.
    pub fn apply_fetch(&mut self, outcome: FetchOutcome) {
        if outcome.seq < self.accept_from {
            tracing::debug!(seq = outcome.seq, "discarding stale weather outcome");
            return;
        }
        self.accept_from = outcome.seq + 1;
        self.weather = outcome.snapshot;
    }

    /// Handles keyboard input
    ///
    /// # Key Bindings
    /// - `q`, `Esc` or `Ctrl-C`: Quit
    /// - `u`: Toggle metric/imperial units
    /// - `?`: Toggle help overlay
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            self.should_quit = true;
            return;
        }

        // Help overlay intercepts all keys when shown
        if self.show_help {
            if matches!(
                key_event.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return;
        }

        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('u') => {
                self.units = self.units.toggled();
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    /// Helper to create a KeyEvent for testing
    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn reading(seconds: u32) -> ClockReading {
        ClockReading {
            hours: 9,
            minutes: 30,
            seconds,
            day: "monday".to_string(),
            date: 15,
            month: "July".to_string(),
            year: 2024,
        }
    }

    fn create_test_app() -> App {
        App::new(reading(0), LanguageTag::parse("fr").unwrap())
    }

    fn snapshot(temp_c: f64) -> WeatherSnapshot {
        let mut snapshot = WeatherSnapshot::default();
        snapshot.current.temp_c = Some(temp_c);
        snapshot
    }

    fn paris() -> Coordinates {
        Coordinates::new(48.8566, 2.3522)
    }

    #[test]
    fn test_new_app_has_no_data() {
        let app = create_test_app();
        assert!(app.coordinates.is_none());
        assert!(app.weather.is_none());
        assert!(app.position_error.is_none());
        assert_eq!(app.units, UnitSystem::Metric);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_no_fetch_without_coordinates() {
        let mut app = create_test_app();
        assert!(app.next_fetch().is_none());
    }

    #[test]
    fn test_one_fetch_per_distinct_position() {
        let mut app = create_test_app();
        app.on_position(PositionEvent::Fix(paris()));

        let request = app.next_fetch().expect("first fix should trigger a fetch");
        assert_eq!(request.coordinates, paris());
        assert_eq!(request.language.as_str(), "fr");

        // Repeated renders without a change issue nothing
        assert!(app.next_fetch().is_none());
        assert!(app.next_fetch().is_none());

        // Same fix reported again: still nothing
        app.on_position(PositionEvent::Fix(paris()));
        assert!(app.next_fetch().is_none());

        // Moving triggers exactly one more
        app.on_position(PositionEvent::Fix(Coordinates::new(45.764, 4.8357)));
        let second = app.next_fetch().expect("move should trigger a fetch");
        assert!(second.seq > request.seq);
        assert!(app.next_fetch().is_none());
    }

    #[test]
    fn test_language_is_part_of_the_fetch_key() {
        let mut app = create_test_app();
        app.on_position(PositionEvent::Fix(paris()));
        assert!(app.next_fetch().is_some());

        app.language = LanguageTag::parse("en").unwrap();
        let request = app.next_fetch().expect("language change should trigger a fetch");
        assert_eq!(request.language.as_str(), "en");
        assert!(app.next_fetch().is_none());
    }

    #[test]
    fn test_position_error_clears_data_and_blocks_fetch() {
        let mut app = create_test_app();
        app.on_position(PositionEvent::Fix(paris()));
        let request = app.next_fetch().unwrap();
        app.apply_fetch(FetchOutcome {
            seq: request.seq,
            snapshot: Some(snapshot(21.0)),
        });
        assert!(app.weather.is_some());

        app.on_position(PositionEvent::Error("Location permission denied".to_string()));

        assert!(app.coordinates.is_none());
        assert!(app.weather.is_none());
        assert_eq!(
            app.position_error.as_deref(),
            Some("Location permission denied")
        );
        assert!(app.next_fetch().is_none());
    }

    #[test]
    fn test_error_before_any_fix_issues_no_request() {
        let mut app = create_test_app();
        app.on_position(PositionEvent::Error("Location request timed out".to_string()));
        assert!(app.next_fetch().is_none());
        assert!(app.weather.is_none());
    }

    #[test]
    fn test_fix_after_error_fetches_again() {
        let mut app = create_test_app();
        app.on_position(PositionEvent::Fix(paris()));
        assert!(app.next_fetch().is_some());

        app.on_position(PositionEvent::Error("Location request timed out".to_string()));
        app.on_position(PositionEvent::Fix(paris()));

        assert!(app.position_error.is_none());
        assert!(app.next_fetch().is_some());
    }

    #[test]
    fn test_in_flight_outcome_ignored_after_position_error() {
        let mut app = create_test_app();
        app.on_position(PositionEvent::Fix(paris()));
        let request = app.next_fetch().unwrap();

        app.on_position(PositionEvent::Error("Location unavailable: offline".to_string()));
        app.apply_fetch(FetchOutcome {
            seq: request.seq,
            snapshot: Some(snapshot(18.0)),
        });

        assert!(app.weather.is_none());
    }

    #[test]
    fn test_failed_fetch_replaces_snapshot_with_none() {
        let mut app = create_test_app();
        app.on_position(PositionEvent::Fix(paris()));
        let first = app.next_fetch().unwrap();
        app.apply_fetch(FetchOutcome {
            seq: first.seq,
            snapshot: Some(snapshot(21.0)),
        });

        app.on_position(PositionEvent::Fix(Coordinates::new(43.2965, 5.3698)));
        let second = app.next_fetch().unwrap();
        app.apply_fetch(FetchOutcome {
            seq: second.seq,
            snapshot: None,
        });

        assert!(app.weather.is_none(), "failure must not leave a stale copy");
    }

    #[test]
    fn test_stale_outcome_does_not_overwrite_newer() {
        let mut app = create_test_app();
        app.on_position(PositionEvent::Fix(paris()));
        let older = app.next_fetch().unwrap();
        app.on_position(PositionEvent::Fix(Coordinates::new(50.6292, 3.0573)));
        let newer = app.next_fetch().unwrap();

        // Newer response lands first, older straggles in afterwards
        app.apply_fetch(FetchOutcome {
            seq: newer.seq,
            snapshot: Some(snapshot(12.0)),
        });
        app.apply_fetch(FetchOutcome {
            seq: older.seq,
            snapshot: Some(snapshot(30.0)),
        });

        assert_eq!(app.weather.as_ref().unwrap().current.temp_c, Some(12.0));
    }

    #[test]
    fn test_in_order_outcomes_both_apply() {
        let mut app = create_test_app();
        app.on_position(PositionEvent::Fix(paris()));
        let older = app.next_fetch().unwrap();
        app.on_position(PositionEvent::Fix(Coordinates::new(50.6292, 3.0573)));
        let newer = app.next_fetch().unwrap();

        app.apply_fetch(FetchOutcome {
            seq: older.seq,
            snapshot: Some(snapshot(30.0)),
        });
        assert_eq!(app.weather.as_ref().unwrap().current.temp_c, Some(30.0));

        app.apply_fetch(FetchOutcome {
            seq: newer.seq,
            snapshot: Some(snapshot(12.0)),
        });
        assert_eq!(app.weather.as_ref().unwrap().current.temp_c, Some(12.0));
    }

    #[test]
    fn test_on_tick_replaces_reading() {
        let mut app = create_test_app();
        app.on_tick(reading(1));
        assert_eq!(app.clock.seconds, 1);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = create_test_app();
        app.handle_key(key_event(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = create_test_app();
        app.handle_key(key_event(KeyCode::Esc));
        assert!(app.should_quit);

        let mut app = create_test_app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_u_toggles_units() {
        let mut app = create_test_app();
        app.handle_key(key_event(KeyCode::Char('u')));
        assert_eq!(app.units, UnitSystem::Imperial);
        app.handle_key(key_event(KeyCode::Char('u')));
        assert_eq!(app.units, UnitSystem::Metric);
    }

    #[test]
    fn test_help_overlay_intercepts_keys() {
        let mut app = create_test_app();
        app.handle_key(key_event(KeyCode::Char('?')));
        assert!(app.show_help);

        // Other keys are swallowed while help is shown
        app.handle_key(key_event(KeyCode::Char('u')));
        assert_eq!(app.units, UnitSystem::Metric);

        // Esc closes help instead of quitting
        app.handle_key(key_event(KeyCode::Esc));
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }
}
