//! `TaskDeck` — terminal dashboard for a remote task-management API.
//!
//! Launches the TUI and optionally connects to a task API backend.
//! Configuration via CLI flags, environment variables, or config file
//! (`~/.config/taskdeck/config.toml`).
//!
//! ```bash
//! # Offline demo mode
//! cargo run --bin taskdeck
//!
//! # Connect to a backend
//! cargo run --bin taskdeck -- --api-url https://tasks.example.com/api
//!
//! # Or via environment variables
//! TASKDECK_API_URL=https://tasks.example.com/api cargo run
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use taskdeck::api::{self, ApiCommand, ApiConfig, ApiEvent};
use taskdeck::app::App;
use taskdeck::config::{CliArgs, ClientConfig};
use taskdeck::session::{FileTokenStore, TokenStore, resolve_store};
use taskdeck::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("taskdeck starting");

    // Restore a stored session token, if any.
    let store = resolve_store(config.token_file.as_deref(), config.token_ttl_days);
    let token = match store.as_ref().map(TokenStore::load) {
        Some(Ok(token)) => token,
        Some(Err(e)) => {
            tracing::warn!(error = %e, "could not read session token");
            None
        }
        None => None,
    };

    let api_config = config.to_api_config(token.clone());

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, api_config, store, token.is_some(), &config).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("taskdeck exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the
/// terminal). Returns a [`WorkerGuard`] that must be held until shutdown
/// to ensure all buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskdeck.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop with optional API backend.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    api_config: Option<ApiConfig>,
    store: Option<FileTokenStore>,
    has_session: bool,
    client_config: &ClientConfig,
) -> io::Result<()> {
    // No backend configured: browse the seeded demo list offline.
    let (mut app, cmd_tx, mut evt_rx) = match api_config {
        Some(config) => match api::spawn_api(config) {
            Ok((tx, rx)) => {
                let mut app = App::new();
                if has_session {
                    app = app.with_session();
                    // Resumed session: load the task list straight away.
                    let _ = tx.try_send(ApiCommand::FetchTasks);
                }
                (app, Some(tx), Some(rx))
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not start api client; falling back to demo");
                let mut app = App::offline_demo();
                app.push_status(format!("API unavailable — offline demo mode ({e})"));
                (app, None, None)
            }
        },
        None => (App::offline_demo(), None, None),
    };

    loop {
        // Step 1: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Step 2: Drain all pending ApiEvents (non-blocking).
        if let Some(ref mut rx) = evt_rx {
            drain_api_events(&mut app, rx, cmd_tx.as_ref(), store.as_ref());
        }

        // Step 3: Poll for terminal input events.
        if event::poll(client_config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // handle_key_event returns Some(ApiCommand) when the action
            // requires a network dispatch (form submit, delete, refresh).
            if let Some(cmd) = app.handle_key_event(key) {
                dispatch(&mut app, cmd_tx.as_ref(), cmd);
            }

            if app.logout_requested {
                app.logout_requested = false;
                if let Some(store) = store.as_ref()
                    && let Err(e) = store.clear()
                {
                    tracing::warn!(error = %e, "could not clear session token");
                }
            }
        }

        if app.should_quit {
            // Send shutdown command to the API task.
            if let Some(ref tx) = cmd_tx {
                let _ = tx.try_send(ApiCommand::Shutdown);
            }
            return Ok(());
        }
    }
}

/// Drain all pending `ApiEvent`s and apply them to the app.
///
/// A fresh login token is persisted before the event is folded into the
/// app state; follow-up commands implied by an event (the post-login
/// fetch) are dispatched immediately.
fn drain_api_events(
    app: &mut App,
    rx: &mut mpsc::Receiver<ApiEvent>,
    cmd_tx: Option<&mpsc::Sender<ApiCommand>>,
    store: Option<&FileTokenStore>,
) {
    while let Ok(event) = rx.try_recv() {
        if let ApiEvent::LoggedIn { token } = &event
            && let Some(store) = store
            && let Err(e) = store.save(token)
        {
            tracing::warn!(error = %e, "could not persist session token");
        }

        if let Some(follow_up) = app.apply_event(event) {
            dispatch(app, cmd_tx, follow_up);
        }
    }
}

/// Send a command to the API task, surfacing backpressure in the status bar.
fn dispatch(app: &mut App, cmd_tx: Option<&mpsc::Sender<ApiCommand>>, cmd: ApiCommand) {
    let Some(tx) = cmd_tx else {
        return;
    };
    match tx.try_send(cmd) {
        Ok(()) => {}
        Err(mpsc::error::TrySendError::Full(_)) => {
            app.push_status("Request queued, network busy");
        }
        Err(mpsc::error::TrySendError::Closed(_)) => {
            app.push_status("API connection lost");
        }
    }
}
