//! Taskboard: a kanban board for the terminal.
//!
//! Talks to a task service over HTTP. Configuration via CLI flags,
//! environment variables, or config file (`~/.config/taskboard/config.toml`).
//!
//! ```bash
//! # Service on the default address
//! cargo run --bin taskboard
//!
//! # Elsewhere
//! cargo run --bin taskboard -- --api-url http://tasks.local:8000
//! TASKBOARD_API_URL=http://tasks.local:8000 cargo run --bin taskboard
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
use taskboard::repository::http::HttpTaskRepository;
use taskboard::store::TaskStore;
use taskboard::ui;
use taskboard::worker::{StoreCommand, StoreHandle, spawn_store};

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: {e}; using defaults");
            ClientConfig::default()
        }
    };

    // Logs go to a file; the terminal belongs to ratatui.
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!(api_url = %config.api_url, "taskboard starting");

    let repository = HttpTaskRepository::with_timeout(config.api_url.clone(), config.request_timeout)
        .map_err(io::Error::other)?;
    let handle = spawn_store(TaskStore::new(repository), config.channel_capacity);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, handle, &config).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("taskboard exiting");
    result
}

/// Initialize file-based logging. The returned guard flushes buffered
/// entries on drop.
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

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    handle: StoreHandle,
    config: &ClientConfig,
) -> io::Result<()> {
    let StoreHandle {
        commands: tx,
        state: mut state_rx,
        task: worker,
    } = handle;
    let mut app = App::new().with_date_format(config.date_format.clone());

    for command in app.startup_commands() {
        dispatch(&mut app, &tx, command);
    }

    loop {
        // Step 1: pick up the latest store state.
        if state_rx.has_changed().unwrap_or(false) {
            let state = state_rx.borrow_and_update().clone();
            app.apply_state(state);
        }

        // Step 2: draw.
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Step 3: poll terminal input.
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            for command in app.handle_key_event(key) {
                dispatch(&mut app, &tx, command);
            }
        }

        if app.should_quit {
            let _ = tx.try_send(StoreCommand::Shutdown);
            drop(tx);
            if let Err(e) = worker.await {
                tracing::warn!(error = %e, "store worker ended abnormally");
            }
            return Ok(());
        }
    }
}

fn dispatch(app: &mut App, tx: &mpsc::Sender<StoreCommand>, command: StoreCommand) {
    match tx.try_send(command) {
        Ok(()) => {}
        Err(mpsc::error::TrySendError::Full(command)) => {
            tracing::warn!(?command, "store queue full, command dropped");
            app.set_notice("Busy, try again");
        }
        Err(mpsc::error::TrySendError::Closed(_)) => {
            app.set_notice("Store stopped");
        }
    }
}
