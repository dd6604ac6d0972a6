//! Application state types and entry glue.
//!
//! Views are plain state machines: user actions mutate them and queue a
//! `Command`; the event loop in `update` turns commands into API calls and
//! feeds the resulting `AppEvent`s back in.
//!
pub mod delete;
pub mod detail;
pub mod form;
pub mod keymap;
pub mod list;
pub mod router;
pub mod update;

use ratatui::style::Color;
use std::time::{Duration, Instant};

use crate::api::{User, UserId};
use crate::error::ApiError;
use detail::DetailView;
use keymap::Keymap;
use list::ListView;
use router::Route;

/// How long a notification stays on screen.
pub const TOAST_TTL: Duration = Duration::from_secs(3);

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Modal,
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub stripe_bg: Color,
    pub success: Color,
    pub danger: Color,
}

const THEME_KEYS: [&str; 13] = [
    "text",
    "muted",
    "title",
    "border",
    "header_bg",
    "header_fg",
    "status_bg",
    "status_fg",
    "highlight_fg",
    "highlight_bg",
    "stripe_bg",
    "success",
    "danger",
];

impl Theme {
    /// Plain ANSI palette, used by tests and as a fallback for limited terminals.
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            muted: Color::DarkGray,
            title: Color::Cyan,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
            stripe_bg: Color::Black,
            success: Color::Green,
            danger: Color::Red,
        }
    }

    /// Catppuccin Mocha theme defaults.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),        // overlay1
            title: Color::Rgb(0xcb, 0xa6, 0xf7),        // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),    // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),    // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),    // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            stripe_bg: Color::Rgb(0x18, 0x18, 0x25),    // mantle
            success: Color::Rgb(0xa6, 0xe3, 0xa1),      // green
            danger: Color::Rgb(0xf3, 0x8b, 0xa8),       // red
        }
    }

    fn slot(&mut self, key: &str) -> Option<&mut Color> {
        Some(match key {
            "text" => &mut self.text,
            "muted" => &mut self.muted,
            "title" => &mut self.title,
            "border" => &mut self.border,
            "header_bg" => &mut self.header_bg,
            "header_fg" => &mut self.header_fg,
            "status_bg" => &mut self.status_bg,
            "status_fg" => &mut self.status_fg,
            "highlight_fg" => &mut self.highlight_fg,
            "highlight_bg" => &mut self.highlight_bg,
            "stripe_bg" => &mut self.stripe_bg,
            "success" => &mut self.success,
            "danger" => &mut self.danger,
            _ => return None,
        })
    }

    /// Load theme from a simple key=value file. Unknown or missing keys fall back to `mocha`.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut theme = Self::mocha();

        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            if let (Some(color), Some(slot)) = (Self::parse_color(val), theme.slot(key.trim())) {
                *slot = color;
            }
        }

        Some(theme)
    }

    /// Parse a color from hex ("#RRGGBB" or "RRGGBB") or "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = lower.strip_prefix('#').unwrap_or(&lower);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    fn color_to_str(c: Color) -> String {
        match c {
            Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
            Color::Reset => "reset".to_string(),
            // Named colors: best-effort hex approximation
            Color::Black => "#000000".to_string(),
            Color::Red => "#FF0000".to_string(),
            Color::Green => "#00FF00".to_string(),
            Color::Yellow => "#FFFF00".to_string(),
            Color::Cyan => "#00FFFF".to_string(),
            Color::Gray => "#B3B3B3".to_string(),
            Color::DarkGray => "#4D4D4D".to_string(),
            Color::White => "#FFFFFF".to_string(),
            other => format!("{other:?}"),
        }
    }

    /// Persist the theme to a config file in key=value format.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# userdir-tui theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");
        let mut copy = *self;
        for key in THEME_KEYS {
            if let Some(color) = copy.slot(key) {
                let _ = writeln!(&mut buf, "{} = {}", key, Self::color_to_str(*color));
            }
        }
        std::fs::write(path, buf)
    }

    /// Load from `path`, or write the default theme there when the file is missing.
    pub fn load_or_init(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        if let Err(err) = t.write_file(path) {
            tracing::warn!(path, error = %err, "could not write default theme");
        }
        t
    }
}

/// Which write a form submission performs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SaveMode {
    Create,
    Update,
}

/// A request a view wants issued against the API.
#[derive(Clone, Debug)]
pub enum Command {
    LoadUsers,
    LoadUser { id: UserId, generation: u64 },
    SaveUser { mode: SaveMode, user: User },
    DeleteUser { id: UserId },
}

/// Completion of one `Command`, tagged with the view epoch it was issued under.
#[derive(Debug)]
pub enum AppEvent {
    UsersLoaded { epoch: u64, result: Result<Vec<User>, ApiError> },
    UserLoaded { epoch: u64, generation: u64, result: Result<User, ApiError> },
    /// `id` is the identifier the request was issued for (`None` on create).
    UserSaved { epoch: u64, mode: SaveMode, id: Option<UserId>, result: Result<User, ApiError> },
    UserDeleted { epoch: u64, id: UserId, result: Result<(), ApiError> },
}

impl AppEvent {
    pub fn epoch(&self) -> u64 {
        match self {
            AppEvent::UsersLoaded { epoch, .. }
            | AppEvent::UserLoaded { epoch, .. }
            | AppEvent::UserSaved { epoch, .. }
            | AppEvent::UserDeleted { epoch, .. } => *epoch,
        }
    }
}

/// Transient success notification.
#[derive(Clone, Debug)]
pub struct Toast {
    pub message: String,
    pub shown_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), shown_at: Instant::now() }
    }
}

/// The mounted view for the current route.
pub enum Screen {
    List(ListView),
    Detail(DetailView),
}

/// Whole UI state: the mounted screen plus global overlays.
pub struct AppState {
    pub screen: Screen,
    /// Bumped on every mount; results from older mounts have no observer.
    pub epoch: u64,
    pub theme: Theme,
    pub keymap: Keymap,
    pub toast: Option<Toast>,
    pub show_help: bool,
    pub should_quit: bool,
    pending: Vec<(u64, Command)>,
}

impl AppState {
    /// Build the state and mount the view for `route`.
    pub fn new(theme: Theme, keymap: Keymap, route: Route) -> Self {
        let mut app = Self {
            screen: Screen::List(ListView::new()),
            epoch: 0,
            theme,
            keymap,
            toast: None,
            show_help: false,
            should_quit: false,
            pending: Vec::new(),
        };
        app.mount(route);
        app
    }

    /// Route of the mounted screen.
    pub fn route(&self) -> Route {
        match &self.screen {
            Screen::List(_) => Route::List,
            Screen::Detail(d) => Route::Detail(d.id.clone()),
        }
    }

    /// `Modal` while a dialog or the help overlay owns the keyboard.
    pub fn input_mode(&self) -> InputMode {
        let dialog = matches!(&self.screen, Screen::List(l) if l.has_open_dialog());
        if dialog || self.show_help { InputMode::Modal } else { InputMode::Normal }
    }

    /// Switch to `route`, remounting unless only the detail id changed.
    pub fn navigate(&mut self, route: Route) {
        match (&mut self.screen, route) {
            (Screen::List(_), Route::List) => {}
            (Screen::Detail(detail), Route::Detail(id)) => {
                if let Some(cmd) = detail.set_id(id) {
                    self.enqueue(cmd);
                }
            }
            (_, route) => self.mount(route),
        }
    }

    fn mount(&mut self, route: Route) {
        self.epoch += 1;
        tracing::debug!(route = %route, epoch = self.epoch, "mounting view");
        let cmd = match route {
            Route::List => {
                let mut list = ListView::new();
                let cmd = list.mount();
                self.screen = Screen::List(list);
                cmd
            }
            Route::Detail(id) => {
                let detail = DetailView::new(id);
                let cmd = detail.mount();
                self.screen = Screen::Detail(detail);
                cmd
            }
        };
        self.enqueue(cmd);
    }

    /// Queue `cmd` under the current epoch.
    pub fn enqueue(&mut self, cmd: Command) {
        self.pending.push((self.epoch, cmd));
    }

    /// Drain queued commands together with the epoch they were issued under.
    pub fn take_commands(&mut self) -> Vec<(u64, Command)> {
        std::mem::take(&mut self.pending)
    }

    pub fn list(&self) -> Option<&ListView> {
        match &self.screen {
            Screen::List(l) => Some(l),
            Screen::Detail(_) => None,
        }
    }

    pub fn list_mut(&mut self) -> Option<&mut ListView> {
        match &mut self.screen {
            Screen::List(l) => Some(l),
            Screen::Detail(_) => None,
        }
    }

    /// Clear the toast once it has been visible for `TOAST_TTL`.
    pub fn expire_toast(&mut self, now: Instant) {
        if self
            .toast
            .as_ref()
            .is_some_and(|t| now.duration_since(t.shown_at) >= TOAST_TTL)
        {
            self.toast = None;
        }
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
