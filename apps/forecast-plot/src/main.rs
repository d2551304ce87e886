//! Forecast plot TUI
//!
//! - EffectStoreWithMiddleware for state management with declarative effects
//! - LoggingMiddleware traces every dispatch (see `--log-file`)
//! - EffectRuntime handles event polling + action routing
//! - TaskManager runs the forecast loader
//!
//! # Usage
//!
//! ```sh
//! export OPENWEATHER_API_KEY=...
//! cargo run -p forecast-plot -- --location London,UK
//! cargo run -p forecast-plot -- --units imperial --log-file forecast.log
//! ```

use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use plotcast::{
    EffectRuntime, EffectStoreWithMiddleware, EventKind, EventOutcome, LoggingMiddleware,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use forecast_plot::components::{Component, ForecastScreen, ForecastScreenProps};
use forecast_plot::{
    handle_effect, reducer, Action, AppState, Args, ForecastConfig, HttpForecastSource,
};

const DEFAULT_LOG_FILTER: &str = "forecast_plot=debug,plotcast_core=debug";

/// Logs go to a file because the terminal is taken by the UI.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref())?;

    let config = ForecastConfig::from_args(&args);
    info!(endpoint = %config.endpoint, units = %config.units, "Starting forecast-plot");

    // ===== Terminal setup =====
    let mut terminal = setup_or_restore(setup_terminal, restore_terminal)
        .context("failed to set up the terminal")?;

    let result = run_app(&mut terminal, config, args.location).await;

    // ===== Cleanup =====
    restore_terminal()?;

    result.context("forecast-plot exited with an error")
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        cursor::Show
    )
}

/// Run `setup`; if it fails part way, undo it before returning the error.
fn setup_or_restore<T>(
    setup: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    setup().map_err(|err| {
        if let Err(restore_err) = restore() {
            warn!(error = %restore_err, "Failed to restore the terminal");
        }
        err
    })
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: ForecastConfig,
    initial_location: Option<String>,
) -> io::Result<()> {
    let store = EffectStoreWithMiddleware::new(
        AppState::new(config.units),
        reducer,
        LoggingMiddleware::new(),
    );
    let mut runtime = EffectRuntime::from_store(store);

    if let Some(location) = initial_location.filter(|l| !l.trim().is_empty()) {
        runtime.enqueue(Action::SetLocation(location));
        runtime.enqueue(Action::ForecastFetch);
    }

    let source = Arc::new(HttpForecastSource::default());
    let screen = RefCell::new(ForecastScreen::new());

    runtime
        .run(
            terminal,
            |frame, area, state| {
                screen
                    .borrow_mut()
                    .render(frame, area, ForecastScreenProps { state });
            },
            |event, state| {
                if let EventKind::Resize(..) = event {
                    return EventOutcome::ignored().with_render();
                }
                EventOutcome::from_actions(
                    screen
                        .borrow_mut()
                        .handle_event(event, ForecastScreenProps { state }),
                )
            },
            |action| matches!(action, Action::Quit),
            |effect, ctx| handle_effect(effect, ctx, &config, &source),
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_failed_setup_is_restored() {
        let restored = Cell::new(false);

        let result: io::Result<()> = setup_or_restore(
            || Err(io::Error::other("no tty")),
            || {
                restored.set(true);
                Ok(())
            },
        );

        assert_eq!(result.unwrap_err().to_string(), "no tty");
        assert!(restored.get());
    }

    #[test]
    fn test_successful_setup_is_kept() {
        let restored = Cell::new(false);

        let value = setup_or_restore(
            || Ok(7),
            || {
                restored.set(true);
                Ok(())
            },
        )
        .unwrap();

        assert_eq!(value, 7);
        assert!(!restored.get());
    }
}
