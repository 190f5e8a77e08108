//! Whiskers TUI Entry Point
//!
//! Launches the terminal breed gallery.
//!
//! Configuration comes from `~/.config/whiskers/config.toml` and `WHISKERS_*`
//! environment variables. Logs go to `whiskers.log` in the XDG state
//! directory, filtered by `RUST_LOG`.

use std::fs::{self, OpenOptions};
use std::io::{self, IsTerminal};
use std::panic;
use std::sync::Mutex;

use anyhow::Context;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use whiskers_core::{default_log_path, load_config, CatApiClient};
use whiskers_tui::conductor_client::ConductorClient;
use whiskers_tui::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check if we have a TTY before attempting initialization
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: whiskers requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means:");
        eprintln!("  • Running in a non-interactive environment (CI, container)");
        eprintln!("  • SSH without -t flag");
        eprintln!("  • Piped stdin/stdout");
        std::process::exit(1);
    }

    init_logging()?;

    let config = load_config().context("failed to load configuration")?;
    tracing::debug!(
        source = %config.source(),
        base_url = %config.api.base_url,
        page_size = config.flow.page_size,
        "Configuration loaded"
    );
    if config.api.api_key.is_empty() {
        tracing::warn!("No API key configured; set WHISKERS_API_KEY or CAT_API_KEY");
    }

    let api = CatApiClient::new(&config.api).context("failed to build HTTP client")?;
    let conductor = ConductorClient::new(api, config.flow.clone());

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(conductor, &config.surface);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Send tracing output to the log file; the terminal is in raw mode
fn init_logging() -> anyhow::Result<()> {
    let path = default_log_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("whiskers_core=info,whiskers_tui=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();

    Ok(())
}
