//! Study Dungeon terminal entry point.
use anyhow::{Context, Result};
use console_ui::{CrosstermInput, terminal};
use study_dungeon::{App, AppConfig, logging};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env();
    let _log_guard = logging::setup_logging(&config.log_dir)?;
    tracing::info!("Data directory: {}", config.data_dir.display());

    let (rows, cols) = terminal::size().context("reading terminal size")?;
    let mut app = App::builder()
        .config(config)
        .window_size(rows, cols)
        .build()?;

    let mut tui = terminal::init().context("initializing terminal")?;
    let _guard = terminal::TerminalGuard;
    app.run(&mut tui, &mut CrosstermInput)
}
