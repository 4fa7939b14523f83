//! user-directory binary entry point.
//!
//! Parses the command line, sets up file logging, initializes the terminal
//! in raw mode, runs the TUI event loop and restores the terminal on exit.
//!
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

use user_directory::app::{self, AppState};
use user_directory::error::{Context, Result};
use user_directory::fetch::{DEFAULT_ENDPOINT, HttpUserSource, UserSource};
use user_directory::sort::SortColumn;

/// Browse, search and sort a remote directory of users.
#[derive(Parser, Debug)]
#[command(name = "user-directory", version, about)]
struct Cli {
    /// Endpoint returning the JSON array of users.
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Theme file; created with defaults when missing.
    #[arg(long, default_value = "theme.conf")]
    theme: String,

    /// Keybindings file; created with defaults when missing.
    #[arg(long, default_value = "keybinds.conf")]
    keybinds: String,

    /// Sort by this column at startup, given as its field path
    /// (`name`, `username`, `email`, `phone`, `address.city`, `company.name`).
    #[arg(long, value_name = "PATH")]
    sort: Option<SortColumn>,

    /// Append logs to this file. Without it nothing is logged.
    #[arg(long, env = "USER_DIRECTORY_LOG")]
    log_file: Option<PathBuf>,
}

/// Route `tracing` output to `path`; the terminal itself belongs to the UI.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_ctx(|| format!("open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> std::io::Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;
    let http = HttpUserSource::new(cli.endpoint).with_ctx(|| "build HTTP client".to_string())?;
    tracing::info!(endpoint = http.endpoint(), "starting");
    let source: Arc<dyn UserSource> = Arc::new(http);
    let mut app = AppState::from_config(&cli.theme, &cli.keybinds);
    if let Some(column) = cli.sort {
        app.transition(|d| d.sort_toggled(column));
    }

    let mut terminal = init_terminal().with_ctx(|| "init terminal".to_string())?;

    let res = app::run(&mut terminal, &mut app, source);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err}");
    }
    Ok(())
}
