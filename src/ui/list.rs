use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};

use crate::app::Theme;
use crate::app::delete::{DeleteChoice, DeleteConfirmation};
use crate::app::form::{FormEditor, FormField};
use crate::app::list::ListView;
use crate::ui::components::centered_rect;

const SKELETON_ROWS: usize = 5;

/// Toolbar plus the paged users table, or a skeleton while the first load runs.
///
/// Records the rendered page height in `list.rows_per_page` for paging keys.
pub fn render_users_table(f: &mut Frame, area: Rect, list: &mut ListView, theme: &Theme) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)].as_ref())
        .split(area);

    let toolbar = Paragraph::new(Line::from(vec![
        Span::styled("User List", Style::default().fg(theme.title).add_modifier(Modifier::BOLD)),
        Span::raw("   "),
        Span::styled("[n] Add New User", Style::default().fg(theme.success)),
    ]));
    f.render_widget(toolbar, parts[0]);

    let block = Block::default()
        .title("Users")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));

    if list.loading {
        render_skeleton(f, parts[1], block, theme);
        return;
    }

    let body_height = parts[1].height.saturating_sub(3) as usize;
    if body_height > 0 {
        list.rows_per_page = body_height;
    }
    let rpp = list.rows_per_page.max(1);
    let start = (list.selected / rpp) * rpp;
    let end = (start + rpp).min(list.users.len());
    let slice = list.users.get(start..end).unwrap_or(&[]);

    let rows = slice.iter().enumerate().map(|(i, u)| {
        let absolute_index = start + i;
        let style = if absolute_index == list.selected {
            Style::default()
                .fg(theme.highlight_fg)
                .bg(theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else if absolute_index % 2 == 0 {
            Style::default().fg(theme.text).bg(theme.stripe_bg)
        } else {
            Style::default().fg(theme.text)
        };
        Row::new(vec![
            Cell::from((absolute_index + 1).to_string()),
            Cell::from(u.name.clone()),
            Cell::from(u.email.clone()),
            Cell::from(u.phone.clone()),
            Cell::from("Edit  Delete  View"),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(25),
        Constraint::Percentage(30),
        Constraint::Percentage(22),
        Constraint::Min(18),
    ];
    let header = Row::new(vec!["S.NO", "Name", "Email", "Phone", "Actions"])
        .style(Style::default().fg(theme.title).add_modifier(Modifier::BOLD));

    let table = Table::new(rows, widths).header(header).block(block).column_spacing(1);
    f.render_widget(table, parts[1]);
}

/// Placeholder bars drawn while the initial fetch is in flight.
fn render_skeleton(f: &mut Frame, area: Rect, block: Block, theme: &Theme) {
    let inner = block.inner(area);
    let bar = "░".repeat(inner.width as usize);
    let mut lines = Vec::with_capacity(SKELETON_ROWS * 2);
    for _ in 0..SKELETON_ROWS {
        lines.push(Line::styled(bar.clone(), Style::default().fg(theme.muted)));
        lines.push(Line::raw(""));
    }
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines), inner);
}

/// Create/edit dialog: one line per field, required ones starred.
pub fn render_form_modal(f: &mut Frame, area: Rect, form: &FormEditor, theme: &Theme) {
    let width = 64u16.min(area.width.saturating_sub(4)).max(40);
    let height = FormField::ALL.len() as u16 + 6;
    let rect = centered_rect(width, height, area);

    let mut lines: Vec<Line> = Vec::with_capacity(FormField::ALL.len() + 3);
    for field in FormField::ALL {
        let focused = form.focus == field;
        let marker = if focused { "▶" } else { " " };
        let label = if field.is_required() {
            format!("{} *", field.label())
        } else {
            field.label().to_string()
        };
        let mut value = form.value(field).to_string();
        if focused {
            value.push('▏');
        }
        let value_style = if field.is_editable() {
            Style::default().fg(theme.text)
        } else {
            Style::default().fg(theme.muted)
        };
        lines.push(Line::from(vec![
            Span::raw(format!("{marker} {label:<14} ")),
            Span::styled(value, value_style),
        ]));
    }
    lines.push(Line::raw(""));
    match &form.hint {
        Some(hint) => lines.push(Line::styled(hint.clone(), Style::default().fg(theme.danger))),
        None => lines.push(Line::raw("")),
    }
    lines.push(Line::from(format!(
        "Esc: Cancel   Enter: {}   Tab/Shift-Tab: move",
        form.submit_label()
    )));

    let p = Paragraph::new(lines).block(
        Block::default()
            .title(form.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Delete prompt with the Cancel/Delete selector.
pub fn render_delete_modal(f: &mut Frame, area: Rect, dlg: &DeleteConfirmation, theme: &Theme) {
    let rect = centered_rect(56, 7, area);
    let (cancel, delete) = match dlg.choice {
        DeleteChoice::Cancel => ("[Cancel]", " Delete "),
        DeleteChoice::Delete => (" Cancel ", "[Delete]"),
    };
    let lines = vec![
        Line::from(dlg.prompt()),
        Line::raw(""),
        Line::from(vec![
            Span::raw(format!("  {cancel}    ")),
            Span::styled(delete, Style::default().fg(theme.danger).add_modifier(Modifier::BOLD)),
        ]),
    ];
    let p = Paragraph::new(lines).block(
        Block::default()
            .title("Delete User")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
