//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::api::http::DEFAULT_API_URL;
use crate::app::router::Route;

/// `userdir-tui` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "userdir-tui",
    about = "Browse, create, edit and delete users of a REST user directory",
    version
)]
pub struct Settings {
    /// Collection endpoint of the user resource.
    #[arg(long = "api-url", value_name = "url", env = "USERDIR_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
    /// Route to open on start, `/` or `/users/<id>`.
    #[arg(long, value_name = "path", default_value = "/", value_parser = parse_route)]
    pub route: Route,
    /// Theme file; created with defaults when missing.
    #[arg(long, value_name = "path", default_value = "theme.conf")]
    pub theme: String,
    /// Keybinding file; created with defaults when missing.
    #[arg(long, value_name = "path", default_value = "keybinds.conf")]
    pub keybinds: String,
    /// Log destination. The terminal belongs to the UI, so logs go to a file.
    #[arg(long = "log-file", value_name = "path", env = "USERDIR_LOG_FILE", default_value = "userdir-tui.log")]
    pub log_file: PathBuf,
}

fn parse_route(raw: &str) -> Result<Route, String> {
    Route::parse(raw).ok_or_else(|| format!("unknown route `{raw}`; expected `/` or `/users/<id>`"))
}
