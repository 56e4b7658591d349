//! meteodash library
//!
//! This module exposes the dashboard state, data sources and rendering for use
//! by the binary and in integration tests.

pub mod app;
pub mod cli;
pub mod clock;
pub mod data;
pub mod format;
pub mod locale;
pub mod logging;
pub mod position;
pub mod refresh;
pub mod ui;
