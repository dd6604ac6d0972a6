use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::Theme;
use crate::app::detail::DetailView;

/// One user's profile, or a loading line until the fetch lands.
pub fn render_user_details(f: &mut Frame, area: Rect, detail: &DetailView, theme: &Theme) {
    let block = Block::default()
        .title(format!("User {}", detail.id))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));

    let Some(user) = &detail.user else {
        let p = Paragraph::new(Line::styled("Loading...", Style::default().fg(theme.muted))).block(block);
        f.render_widget(p, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            user.name.clone(),
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
    ];
    for (label, value) in detail.rows() {
        lines.push(Line::from(vec![
            Span::styled(format!("{label:<10}"), Style::default().fg(theme.muted)),
            Span::styled(value, Style::default().fg(theme.text)),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled("Esc: back to list", Style::default().fg(theme.muted)));

    let p = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(p, area);
}
