//! Dashboard screen
//!
//! A fixed grid of cells: clock, sun times, visibility, temperature,
//! pressure, precipitation, averages, wind, humidity, felt temperature and
//! UV index. Weather cells stay empty until a snapshot exists. The
//! precipitation, averages and dew point figures are fixed illustrative
//! text, not derived from the snapshot.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, UnitSystem};
use crate::data::WeatherSnapshot;
use crate::format::{capitalize, compass_to_french, to_24_hour, zero_pad};
use crate::ui::widgets::UvBar;

/// Cell colours, border then background accent
mod colors {
    use ratatui::style::Color;

    pub const CLOCK: Color = Color::Rgb(82, 82, 91);
    pub const SUN: Color = Color::Rgb(13, 77, 77);
    pub const VISIBILITY: Color = Color::Rgb(128, 93, 21);
    pub const TEMPERATURE: Color = Color::Rgb(102, 17, 65);
    pub const ORANGE: Color = Color::Rgb(245, 110, 15);
    pub const WIND: Color = Color::Rgb(96, 96, 104);
    pub const HUMIDITY: Color = Color::Rgb(115, 115, 115);
    pub const FELT: Color = Color::Rgb(135, 135, 135);
    pub const UV: Color = Color::Rgb(251, 251, 251);
    pub const PRIMARY: Color = Color::White;
    pub const SECONDARY: Color = Color::Gray;
    pub const ERROR: Color = Color::Red;
}

/// Shown in place of a missing field
const MISSING: &str = "--";

/// Renders the dashboard
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Grid
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, rows[0], app);
    render_grid(frame, rows[1], app);
    render_footer(frame, rows[2], app);
}

/// Place name from the snapshot, or the app name
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = app
        .weather
        .as_ref()
        .and_then(place_label)
        .unwrap_or_else(|| "meteodash".to_string());

    let header = Paragraph::new(Line::from(Span::styled(
        title,
        Style::default()
            .fg(colors::PRIMARY)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);

    frame.render_widget(header, area);
}

/// "Name, Country", or whichever half is known
fn place_label(snapshot: &WeatherSnapshot) -> Option<String> {
    let place = &snapshot.location;
    match (&place.name, &place.country) {
        (Some(name), Some(country)) => Some(format!("{}, {}", name, country)),
        (Some(name), None) => Some(name.clone()),
        (None, Some(country)) => Some(country.clone()),
        (None, None) => None,
    }
}

fn render_grid(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(67), Constraint::Percentage(33)])
        .split(columns[0]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(67), Constraint::Percentage(33)])
        .split(columns[1]);

    render_main_panel(frame, left[0], app);
    render_conditions_panel(frame, right[0], app);
    render_felt_cell(frame, left[1], app);
    render_uv_cell(frame, right[1], app);
}

/// Clock, sun times, visibility and temperature in a 2x2 block
fn render_main_panel(frame: &mut Frame, area: Rect, app: &App) {
    let rows = split_even(area, Direction::Vertical);
    let top = split_even(rows[0], Direction::Horizontal);
    let bottom = split_even(rows[1], Direction::Horizontal);

    render_clock_cell(frame, top[0], app);
    render_sun_cell(frame, top[1], app);
    render_visibility_cell(frame, bottom[0], app);
    render_temperature_cell(frame, bottom[1], app);
}

/// Pressure, precipitation and averages above a wind/humidity row
fn render_conditions_panel(frame: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let orange = split_even(rows[0], Direction::Horizontal);
    let stacked = split_even(orange[1], Direction::Vertical);
    render_pressure_cell(frame, orange[0], app);
    render_precipitation_cell(frame, stacked[0], app);
    render_averages_cell(frame, stacked[1], app);

    let bottom = split_even(rows[1], Direction::Horizontal);
    render_wind_cell(frame, bottom[0], app);
    render_humidity_cell(frame, bottom[1], app);
}

fn split_even(area: Rect, direction: Direction) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(direction)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)
}

/// Draws a bordered cell and returns its inner area
fn cell(frame: &mut Frame, area: Rect, title: &str, accent: Color) -> Rect {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent));
    if !title.is_empty() {
        block = block.title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(colors::SECONDARY),
        ));
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Large value line
fn value_line(text: String) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(colors::PRIMARY)
            .add_modifier(Modifier::BOLD),
    ))
}

/// Small caption line
fn caption_line(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default().fg(colors::SECONDARY),
    ))
}

/// Formats a reading the way it arrives ("21", "21.5"), or `--`
fn number(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{:.0}", v),
        Some(v) => v.to_string(),
        None => MISSING.to_string(),
    }
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or(MISSING).to_string()
}

fn render_clock_cell(frame: &mut Frame, area: Rect, app: &App) {
    let inner = cell(frame, area, "", colors::CLOCK);
    let clock = &app.clock;

    let lines = vec![
        caption_line(format!(
            "{} {} {} {}",
            capitalize(&clock.day),
            clock.date,
            clock.month,
            clock.year
        )),
        Line::from(""),
        value_line(format!(
            "{}:{}:{}",
            zero_pad(clock.hours),
            zero_pad(clock.minutes),
            zero_pad(clock.seconds)
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_sun_cell(frame: &mut Frame, area: Rect, app: &App) {
    let inner = cell(frame, area, "☀ COUCHER", colors::SUN);
    let Some(weather) = &app.weather else {
        return;
    };

    let astro = weather.today_astro();
    let sunset = astro
        .and_then(|a| a.sunset.as_deref())
        .and_then(to_24_hour);
    let sunrise = astro
        .and_then(|a| a.sunrise.as_deref())
        .and_then(to_24_hour);

    let lines = vec![
        value_line(text(sunset.as_deref())),
        Line::from(""),
        caption_line(format!("Lever : {}", text(sunrise.as_deref()))),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_visibility_cell(frame: &mut Frame, area: Rect, app: &App) {
    let inner = cell(frame, area, "◉ VISIBILITÉ", colors::VISIBILITY);
    let Some(weather) = &app.weather else {
        return;
    };

    let visibility = match app.units {
        UnitSystem::Metric => format!("{} km", number(weather.current.vis_km)),
        UnitSystem::Imperial => format!("{} miles", number(weather.current.vis_miles)),
    };

    let lines = vec![
        value_line(visibility),
        Line::from(""),
        caption_line("Visibilité parfaitement dégagée"),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Temperature in the selected unit
fn temperature(celsius: Option<f64>, fahrenheit: Option<f64>, units: UnitSystem) -> String {
    match units {
        UnitSystem::Metric => format!("{}°C", number(celsius)),
        UnitSystem::Imperial => format!("{}°F", number(fahrenheit)),
    }
}

fn render_temperature_cell(frame: &mut Frame, area: Rect, app: &App) {
    let inner = cell(frame, area, "", colors::TEMPERATURE);
    let Some(weather) = &app.weather else {
        return;
    };
    let current = &weather.current;

    let lines = vec![
        value_line(temperature(current.temp_c, current.temp_f, app.units)),
        caption_line(text(current.condition.text.as_deref())),
    ];
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, vertically_centered(inner, 2));
}

/// Shrinks `area` to `height` rows around its middle
fn vertically_centered(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    Rect {
        y: area.y + (area.height - height) / 2,
        height,
        ..area
    }
}

fn render_pressure_cell(frame: &mut Frame, area: Rect, app: &App) {
    let inner = cell(frame, area, "◔ PRESSION", colors::ORANGE);
    let Some(weather) = &app.weather else {
        return;
    };

    let lines = vec![
        value_line(format!("{} mb", number(weather.current.pressure_mb))),
        Line::from(""),
        caption_line("I will add a gradient color based on the UV index"),
    ];
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }),
        inner,
    );
}

fn render_precipitation_cell(frame: &mut Frame, area: Rect, app: &App) {
    let inner = cell(frame, area, "💧 PRÉCIPITATIONS", colors::ORANGE);
    if app.weather.is_none() {
        return;
    }

    let lines = vec![
        value_line("14 mm".to_string()),
        caption_line("dans les dernières 24H"),
        caption_line("Prochain épisode de pluie : 10 mm Ven."),
    ];
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }),
        inner,
    );
}

fn render_averages_cell(frame: &mut Frame, area: Rect, app: &App) {
    let inner = cell(frame, area, "📈 MOYENNES", colors::ORANGE);
    if app.weather.is_none() {
        return;
    }

    let lines = vec![
        value_line("+5 °".to_string()),
        caption_line("au dessus des temp. max. quotidiennes moyennes"),
        caption_line("Aujourd'hui   Max. : 13°"),
        caption_line("Moyenne       Max. : 8"),
    ];
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }),
        inner,
    );
}

fn render_wind_cell(frame: &mut Frame, area: Rect, app: &App) {
    let inner = cell(frame, area, "≋ VENT", colors::WIND);
    let Some(weather) = &app.weather else {
        return;
    };
    let current = &weather.current;

    let direction = current
        .wind_dir
        .as_deref()
        .map(compass_to_french)
        .unwrap_or_else(|| MISSING.to_string());

    let lines = vec![
        value_line(format!(
            "{} km/h - {} mph",
            number(current.wind_kph),
            number(current.wind_mph)
        )),
        caption_line(direction),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_humidity_cell(frame: &mut Frame, area: Rect, app: &App) {
    let inner = cell(frame, area, "💧 HUMIDITÉ", colors::HUMIDITY);
    let Some(weather) = &app.weather else {
        return;
    };

    let lines = vec![
        value_line(format!("{} %", number(weather.current.humidity))),
        caption_line("Le point de rosée est de 10°C"),
    ];
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }),
        inner,
    );
}

fn render_felt_cell(frame: &mut Frame, area: Rect, app: &App) {
    let inner = cell(frame, area, "🌡 RESSENTI", colors::FELT);
    let Some(weather) = &app.weather else {
        return;
    };
    let current = &weather.current;

    let lines = vec![
        value_line(temperature(
            current.feelslike_c,
            current.feelslike_f,
            app.units,
        )),
        Line::from(""),
        caption_line("Ressenti plus frais à cause du vent"),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_uv_cell(frame: &mut Frame, area: Rect, app: &App) {
    let inner = cell(frame, area, "☼ INDICE UV", colors::UV);
    let Some(weather) = &app.weather else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(value_line(number(weather.current.uv))),
        rows[0],
    );
    frame.render_widget(UvBar::new(weather.current.uv), rows[2]);
}

/// Position status on the left, key hints on the right
fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let status = match (&app.position_error, &app.coordinates) {
        (Some(error), _) => Span::styled(
            format!(" ⚠ {}", error),
            Style::default().fg(colors::ERROR),
        ),
        (None, Some(c)) => Span::styled(
            format!(" ⌖ {:.4}, {:.4}", c.latitude, c.longitude),
            Style::default().fg(colors::SECONDARY),
        ),
        (None, None) => Span::styled(
            " ⌖ Localisation en cours…",
            Style::default().fg(colors::SECONDARY),
        ),
    };

    let halves = split_even(area, Direction::Horizontal);
    frame.render_widget(Paragraph::new(Line::from(status)), halves[0]);

    let hints = Paragraph::new(Line::from(Span::styled(
        "u unités  ? aide  q quitter ",
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Right);
    frame.render_widget(hints, halves[1]);
}
