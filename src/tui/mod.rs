//! Terminal User Interface module for vta.
//!
//! Provides the question form, sample list, and answer panel using ratatui
//! for rendering and crossterm for terminal management.

use std::io;
use std::panic;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self as crossterm_event, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::qa::QaClientTrait;

mod app;
pub mod event;
mod ui;
mod worker;

pub use app::{App, Focus};
pub use worker::SubmissionWorker;

/// How long to wait for input before redrawing (drives the spinner).
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Initializes the terminal for TUI rendering.
///
/// Enables raw mode and enters the alternate screen.
/// Returns a configured Terminal instance.
///
/// # Errors
///
/// Returns an error if terminal initialization fails.
fn init_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("failed to create terminal")?;
    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// Disables raw mode and leaves the alternate screen.
/// This should always be called before exiting the TUI,
/// even in error cases, to prevent terminal corruption.
///
/// # Errors
///
/// Returns an error if terminal restoration fails.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}

/// Minimal terminal restoration for panic handler.
///
/// Ignores errors since we're likely already in a bad state.
fn restore_terminal_panic() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Initializes a panic hook that restores the terminal before panicking.
///
/// The original panic hook is preserved and called after terminal restoration.
fn init_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal_panic();
        original_hook(panic_info);
    }));
}

/// Runs the main event loop for the TUI.
///
/// # Errors
///
/// Returns an error if event polling, rendering, or terminal operations fail.
/// Terminal state is always restored, even on error.
pub fn run_event_loop(app: &mut App, worker: &SubmissionWorker) -> Result<()> {
    let mut terminal = init_terminal()?;

    let result = run_event_loop_internal(app, worker, &mut terminal);

    // Always restore terminal state
    if let Err(e) = restore_terminal(&mut terminal) {
        eprintln!("Error restoring terminal: {e}");
    }

    result
}

/// Opens a reference link in the system browser.
///
/// Failure is shown as a notice instead of ending the session.
fn open_link(app: &mut App, url: &str) {
    log::info!("opening link {url}");
    if let Err(e) = webbrowser::open(url) {
        log::warn!("could not open {url}: {e}");
        app.set_notice(format!("Could not open {url}: {e}"));
    }
}

/// Internal event loop implementation.
///
/// Each iteration applies finished submissions, redraws, handles at most one
/// key event, then hands any new effects to the worker and opens any
/// requested links.
fn run_event_loop_internal(
    app: &mut App,
    worker: &SubmissionWorker,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        for msg in worker.drain() {
            app.dispatch(msg);
        }

        terminal.draw(|frame| {
            ui::draw(frame, app);
        })?;

        if crossterm_event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = crossterm_event::read()?
            && key.kind == KeyEventKind::Press
            && event::handle_key_event(app, key)
        {
            break;
        }

        for effect in app.take_effects() {
            worker.execute(effect);
        }

        for url in app.take_link_requests() {
            open_link(app, &url);
        }

        app.on_tick();
    }

    Ok(())
}

/// Entry point for the TUI application.
///
/// # Errors
///
/// Returns an error if terminal initialization or the event loop fails.
pub fn run(client: Arc<dyn QaClientTrait>) -> Result<()> {
    // Install panic hook to restore terminal on panic
    init_panic_hook();

    let worker = SubmissionWorker::new(client);
    let mut app = App::new();

    log::info!("starting TUI");
    run_event_loop(&mut app, &worker).context("TUI event loop failed")?;
    log::info!("TUI exited");

    Ok(())
}
