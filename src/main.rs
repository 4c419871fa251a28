//! MovieFinder - search the Open Movie Database from your terminal
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! OMDB_API_KEY=... moviefinder
//!
//! # CLI mode (for scripting)
//! moviefinder search "pokemon" --type movie --page 2
//! moviefinder info tt0096895 --json
//! ```

use std::io::{stdout, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use moviefinder::api::OmdbClient;
use moviefinder::app::{App, AppMessage};
use moviefinder::cli::{Cli, Command, ExitCode, Output};
use moviefinder::config::Config;
use moviefinder::models::Route;
use moviefinder::{commands, fetch, ui};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Set up file-based logging (the TUI owns the terminal)
fn setup_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = dirs::data_dir()
        .map(|p| p.join("moviefinder"))
        .ok_or_else(|| anyhow!("Could not determine data directory"))?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "moviefinder.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("moviefinder=info".parse()?))
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()?;

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let log_guard = match setup_logging() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Could not set up logging: {}", e);
            None
        }
    };

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    if cli.is_cli_mode() {
        let exit_code = run_cli(cli, &config).await;
        // Flush buffered log lines before exiting
        drop(log_guard);
        std::process::exit(exit_code.into());
    }

    let route = cli.route.clone().unwrap_or_default();
    let result = run_tui(&config, route).await;
    drop(log_guard);
    result
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: &Config) -> ExitCode {
    let output = Output::new(&cli);

    let client = match config.client() {
        Ok(client) => client,
        Err(e) => return output.error(e.to_string(), ExitCode::Error),
    };

    match cli.command {
        Some(Command::Search(cmd)) => commands::search_cmd(cmd, &client, &output).await,
        Some(Command::Info(cmd)) => commands::info_cmd(cmd, &client, &output).await,
        None => ExitCode::Success,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(config: &Config, route: Route) -> Result<()> {
    // Resolve the key before touching the terminal so the error is readable
    let client = Arc::new(config.client()?);
    info!(base_url = client.base_url(), %route, "Starting moviefinder");

    let mut terminal = init_terminal()?;
    let mut app = App::with_route(route, config.initial_filters(), config.stale_guard);

    let result = run_event_loop(&mut terminal, &mut app, client).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - handles input, dispatches fetches, applies results
async fn run_event_loop(terminal: &mut Tui, app: &mut App, client: Arc<OmdbClient>) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    let (tx, mut rx) = mpsc::unbounded_channel::<AppMessage>();

    while app.running {
        for request in app.take_requests() {
            fetch::spawn(client.clone(), tx.clone(), request);
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        while let Ok(msg) = rx.try_recv() {
            app.apply(msg);
        }
    }

    info!("Exiting moviefinder");
    Ok(())
}
