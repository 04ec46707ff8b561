//! Taskboard — terminal kanban board backed by a REST task API.
//!
//! Configuration via CLI flags, environment variables, or config file
//! (`~/.config/taskboard/config.toml`).
//!
//! ```bash
//! # Against a local development server
//! cargo run --bin taskboard-server &
//! cargo run --bin taskboard
//!
//! # Against another deployment
//! TASKBOARD_API_URL=https://tasks.example.com cargo run --bin taskboard -- --board-id my-board
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

use taskboard::app::App;
use taskboard::config::{CliArgs, ClientConfig};
use taskboard::net::{self, SyncCommand};
use taskboard::sync::SyncEvent;
use taskboard::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("taskboard: {e}");
            std::process::exit(1);
        }
    };

    // Logs go to a file; the terminal belongs to ratatui.
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!(api_url = %config.api_url, board_id = %config.board_id, "taskboard starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &config);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("taskboard exiting");
    result
}

/// Initialize file-based logging.
///
/// Returns a [`WorkerGuard`] that must be held until shutdown so buffered
/// log lines are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskboard.log");
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

/// Main application loop. Must run inside the tokio runtime.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &ClientConfig,
) -> io::Result<()> {
    let mut app = App::new(config.board_id.clone(), config.board_name.clone());
    let (cmd_tx, mut evt_rx) = net::spawn_sync(config.to_sync_config());

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        drain_sync_events(&mut app, &mut evt_rx);

        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if let Some(cmd) = app.handle_key_event(key) {
                match cmd_tx.try_send(cmd) {
                    Ok(()) => {}
                    Err(mpsc::error::TrySendError::Full(cmd)) => {
                        tracing::warn!(?cmd, "sync busy, command dropped");
                        app.command_not_sent("Busy, try again");
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => {
                        app.command_not_sent("Sync stopped");
                    }
                }
            }
        }

        if app.should_quit {
            let _ = cmd_tx.try_send(SyncCommand::Shutdown);
            return Ok(());
        }
    }
}

/// Drain all pending `SyncEvent`s and apply them to the app.
fn drain_sync_events(app: &mut App, rx: &mut mpsc::Receiver<SyncEvent>) {
    while let Ok(event) = rx.try_recv() {
        app.apply_event(event);
    }
}
