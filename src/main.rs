//! userdir-tui binary entry point.
//!
//! Parses settings, starts file logging and the async runtime, puts the
//! terminal in raw mode, runs the TUI event loop and restores the terminal on exit.
//!
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::runtime::Builder;

use userdir_tui::Result;
use userdir_tui::api::HttpUserApi;
use userdir_tui::app::{self, Theme, keymap::Keymap};
use userdir_tui::config::Settings;
use userdir_tui::logging;

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let settings = Settings::parse();
    logging::init(&settings.log_file)?;

    let api = HttpUserApi::new(&settings.api_url).with_context(|| format!("api url {}", settings.api_url))?;
    tracing::info!(api = %api.base_url(), route = %settings.route, "starting");

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("create tokio runtime")?;

    let theme = Theme::load_or_init(&settings.theme);
    let keymap = Keymap::load_or_init(&settings.keybinds);

    let mut terminal = init_terminal().context("init terminal")?;

    let res = app::run(&mut terminal, runtime.handle(), Arc::new(api), theme, keymap, settings.route);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err:#}");
    }
    Ok(())
}
