//! UI rendering module for meteodash
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod dashboard;
pub mod help_overlay;
pub mod widgets;

use ratatui::Frame;

use crate::app::App;

pub use help_overlay::render as render_help_overlay;

/// Renders the dashboard, with the help overlay on top when it is open
pub fn render_dashboard(frame: &mut Frame, app: &App) {
    dashboard::render(frame, app);

    if app.show_help {
        render_help_overlay(frame);
    }
}
