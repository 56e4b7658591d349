//! Live clock source
//!
//! Produces a [`ClockReading`] right away and then once per second from a
//! background task, delivered over a tokio channel. Dropping the
//! [`ClockTicker`] stops the task.

use std::time::Duration;

use chrono::{DateTime, Datelike, FixedOffset, Local, Locale, TimeZone, Timelike};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::locale::LanguageTag;

/// Tick period of the clock
pub const TICK_PERIOD: Duration = Duration::from_millis(1000);

/// Source of the current wall-clock time
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Reads the local system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let now = Local::now();
        now.with_timezone(now.offset())
    }
}

/// One reading of the clock, with localized calendar names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockReading {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    /// Localized weekday name, as the locale spells it ("lundi", "Monday")
    pub day: String,
    /// Day of the month
    pub date: u32,
    /// Localized month name
    pub month: String,
    pub year: i32,
}

impl ClockReading {
    /// Takes a fresh reading from `clock`.
    pub fn read(clock: &impl Clock, language: &LanguageTag) -> Self {
        Self::from_datetime(&clock.now(), language.calendar_locale())
    }

    /// Projects a timestamp into a reading.
    pub fn from_datetime<Tz>(datetime: &DateTime<Tz>, locale: Locale) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self {
            hours: datetime.hour(),
            minutes: datetime.minute(),
            seconds: datetime.second(),
            day: datetime.format_localized("%A", locale).to_string(),
            date: datetime.day(),
            month: datetime.format_localized("%B", locale).to_string(),
            year: datetime.year(),
        }
    }
}

/// Handle to the background clock task
pub struct ClockTicker {
    /// Channel receiving one reading per tick
    pub receiver: mpsc::Receiver<ClockReading>,
    task: JoinHandle<()>,
}

impl ClockTicker {
    /// Spawns the ticking task.
    ///
    /// The first reading is sent immediately, then one every [`TICK_PERIOD`].
    /// Missed ticks are skipped rather than replayed in a burst.
    pub fn spawn<C: Clock>(clock: C, language: LanguageTag) -> Self {
        Self::spawn_with_period(clock, language, TICK_PERIOD)
    }

    fn spawn_with_period<C: Clock>(clock: C, language: LanguageTag, period: Duration) -> Self {
        let (tx, rx) = mpsc::channel(8);

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                let reading = ClockReading::read(&clock, &language);
                if tx.send(reading).await.is_err() {
                    break;
                }
            }
        });

        Self { receiver: rx, task }
    }

    /// Returns true once the ticking task has stopped
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for ClockTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}
