//! Shared UI components (status bar, help overlay, notifications).
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::keymap::{KeyAction, format_action};
use crate::app::{AppState, InputMode, Screen, Theme};

/// Render the bottom status bar with mode, route and counts.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode() {
        InputMode::Normal => "NORMAL",
        InputMode::Modal => "MODAL",
    };
    let detail = match &app.screen {
        Screen::List(list) if list.loading => "loading...".to_string(),
        Screen::List(list) => format!("users:{}  rows/page:{}", list.users.len(), list.rows_per_page),
        Screen::Detail(detail) if detail.user.is_none() => "loading...".to_string(),
        Screen::Detail(_) => String::new(),
    };
    let help = app.keymap.keys_for(KeyAction::OpenHelp).into_iter().next().unwrap_or_default();
    let msg = format!("mode: {mode}  {}  {detail}  help: {help}", app.route());
    let p = Paragraph::new(msg).style(Style::default().fg(app.theme.status_fg).bg(app.theme.status_bg));
    f.render_widget(p, area);
}

/// A `width` x `height` rectangle centred in `area`, clipped to it.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

const HELP_ACTIONS: [(&str, KeyAction); 10] = [
    ("Add new user", KeyAction::NewUser),
    ("Edit selected user", KeyAction::EditSelection),
    ("Delete selected user", KeyAction::DeleteSelection),
    ("View details", KeyAction::ViewDetails),
    ("Back to list", KeyAction::Back),
    ("Move up", KeyAction::MoveUp),
    ("Move down", KeyAction::MoveDown),
    ("Previous page", KeyAction::PageUp),
    ("Next page", KeyAction::PageDown),
    ("Quit", KeyAction::Quit),
];

/// Keybinding reference built from the live keymap.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let width = 72u16.min(area.width.saturating_sub(4)).max(40);
    let height = (HELP_ACTIONS.len() as u16 + 8).min(area.height.saturating_sub(2)).max(10);
    let rect = centered_rect(width, height, area);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled("Help", Style::default().add_modifier(Modifier::BOLD))),
        Line::raw(""),
    ];
    for (label, action) in HELP_ACTIONS {
        let keys = app.keymap.keys_for(action);
        let keys = if keys.is_empty() {
            format!("<unbound: {}>", format_action(action))
        } else {
            keys.join(" / ")
        };
        lines.push(Line::from(vec![
            Span::raw(format!("{label:<22}")),
            Span::styled(keys, Style::default().add_modifier(Modifier::ITALIC)),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::raw("In dialogs: "),
        Span::styled("Tab/Shift-Tab", Style::default().add_modifier(Modifier::ITALIC)),
        Span::raw(" move, "),
        Span::styled("Enter", Style::default().add_modifier(Modifier::ITALIC)),
        Span::raw(" confirm, "),
        Span::styled("Esc", Style::default().add_modifier(Modifier::ITALIC)),
        Span::raw(" cancel"),
    ]));

    let p = Paragraph::new(lines)
        .block(
            Block::default()
                .title("Keybindings")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Success notification pinned to the top-right corner.
pub fn render_toast(f: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let width = (message.chars().count() as u16 + 4).min(area.width);
    let height = 3u16.min(area.height);
    let rect = Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + 1.min(area.height.saturating_sub(height)),
        width,
        height,
    };
    let p = Paragraph::new(message.to_string())
        .style(Style::default().fg(theme.success))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.success)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_clips_to_area() {
        let area = Rect { x: 0, y: 0, width: 20, height: 10 };
        let r = centered_rect(10, 4, area);
        assert_eq!((r.x, r.y, r.width, r.height), (5, 3, 10, 4));
        let r = centered_rect(50, 50, area);
        assert_eq!((r.x, r.y, r.width, r.height), (0, 0, 20, 10));
    }
}
