pub mod components;
pub mod detail;
pub mod list;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, Screen};

/// Draw the whole frame: header with the current route, the mounted view, status bar, overlays.
pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(f.area());

    let header = Paragraph::new(Line::from(vec![
        Span::styled("userdir-tui", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  location: "),
        Span::styled(app.route().path(), Style::default().fg(app.theme.highlight_fg)),
    ]))
    .block(
        Block::default()
            .title("User Directory")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    )
    .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(header, root[0]);

    let theme = app.theme;
    match &mut app.screen {
        Screen::List(list) => {
            list::render_users_table(f, root[1], list, &theme);
            if list.form.open {
                list::render_form_modal(f, f.area(), &list.form, &theme);
            } else if list.delete.open {
                list::render_delete_modal(f, f.area(), &list.delete, &theme);
            }
        }
        Screen::Detail(detail) => detail::render_user_details(f, root[1], detail, &theme),
    }

    components::render_status_bar(f, root[2], app);

    if app.show_help {
        components::render_help_modal(f, f.area(), app);
    }
    if let Some(toast) = &app.toast {
        components::render_toast(f, f.area(), &toast.message, &app.theme);
    }
}
