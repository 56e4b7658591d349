//! meteodash - A live weather dashboard for the terminal
//!
//! A terminal UI application that shows the local time and the current
//! conditions, sun times, wind, humidity and UV index for the viewer's
//! position.

use std::io;
use std::panic;

use clap::Parser;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};

use meteodash::app::App;
use meteodash::cli::{Cli, PositionSource, StartupConfig};
use meteodash::clock::{ClockReading, ClockTicker, SystemClock};
use meteodash::data::WeatherClient;
use meteodash::logging;
use meteodash::position::{FixedPosition, IpLocator, PositionWatch};
use meteodash::refresh::FetchDispatcher;
use meteodash::ui;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Runs the dashboard until the user quits
async fn run(terminal: &mut Tui, config: StartupConfig) -> io::Result<()> {
    let mut app = App::new(
        ClockReading::read(&SystemClock, &config.language),
        config.language.clone(),
    );

    let mut ticker = ClockTicker::spawn(SystemClock, config.language.clone());
    let mut watch = match config.position {
        PositionSource::Fixed(coordinates) => {
            PositionWatch::spawn(FixedPosition(coordinates), config.watch)
        }
        PositionSource::IpLookup { base_url } => {
            PositionWatch::spawn(IpLocator::new(base_url), config.watch)
        }
    };
    let mut dispatcher = FetchDispatcher::new(
        WeatherClient::new(config.credentials).with_base_url(config.api_url),
    );
    let mut events = EventStream::new();

    loop {
        if let Some(request) = app.next_fetch() {
            dispatcher.dispatch(request);
        }

        terminal.draw(|f| ui::render_dashboard(f, &app))?;

        tokio::select! {
            Some(reading) = ticker.receiver.recv() => app.on_tick(reading),
            Some(event) = watch.receiver.recv() => app.on_position(event),
            Some(outcome) = dispatcher.receiver.recv() => app.apply_fetch(outcome),
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => break,
            },
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    tracing::info!("shutting down");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };

    if let Some(path) = &config.log_file {
        if let Err(e) = logging::init(path) {
            eprintln!("warning: {}", e);
        }
    }

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result?;
    Ok(())
}
