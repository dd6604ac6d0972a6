use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::api::UserApi;
use crate::app::delete::DeleteChoice;
use crate::app::keymap::{KeyAction, Keymap};
use crate::app::router::Route;
use crate::app::{AppEvent, AppState, Command, InputMode, SaveMode, Screen, Theme, Toast};
use crate::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Drive the UI until the user quits.
///
/// Network calls run as tasks on `runtime`; their results come back over a
/// channel that is drained between input polls, so rendering never waits on I/O.
pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    runtime: &Handle,
    api: Arc<dyn UserApi>,
    theme: Theme,
    keymap: Keymap,
    route: Route,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = AppState::new(theme, keymap, route);

    loop {
        for (epoch, command) in app.take_commands() {
            spawn_command(runtime, Arc::clone(&api), epoch, command, tx.clone());
        }
        while let Ok(ev) = rx.try_recv() {
            apply_event(&mut app, ev);
        }
        app.expire_toast(Instant::now());

        terminal.draw(|f| {
            ui::render(f, &mut app);
        })?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(&mut app, key);
                }
            }
        }
        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn spawn_command(
    runtime: &Handle,
    api: Arc<dyn UserApi>,
    epoch: u64,
    command: Command,
    tx: UnboundedSender<AppEvent>,
) {
    runtime.spawn(async move {
        let ev = execute(api.as_ref(), epoch, command).await;
        if tx.send(ev).is_err() {
            tracing::debug!("event loop gone; dropping api result");
        }
    });
}

/// Perform one command against the API. Always yields exactly one event.
pub async fn execute(api: &dyn UserApi, epoch: u64, command: Command) -> AppEvent {
    tracing::debug!(?command, epoch, "issuing request");
    match command {
        Command::LoadUsers => AppEvent::UsersLoaded { epoch, result: api.list().await },
        Command::LoadUser { id, generation } => {
            AppEvent::UserLoaded { epoch, generation, result: api.get(&id).await }
        }
        Command::SaveUser { mode, user } => {
            let result = match mode {
                SaveMode::Create => api.create(&user).await,
                SaveMode::Update => api.update(&user).await,
            };
            AppEvent::UserSaved { epoch, mode, id: user.id, result }
        }
        Command::DeleteUser { id } => {
            let result = api.delete(&id).await;
            AppEvent::UserDeleted { epoch, id, result }
        }
    }
}

/// Feed a finished request back into the view that issued it.
pub fn apply_event(app: &mut AppState, ev: AppEvent) {
    if ev.epoch() != app.epoch {
        tracing::debug!(epoch = ev.epoch(), current = app.epoch, "dropping result for unmounted view");
        return;
    }
    match (ev, &mut app.screen) {
        (AppEvent::UsersLoaded { result, .. }, Screen::List(list)) => list.on_loaded(result),
        (AppEvent::UserSaved { mode, id, result, .. }, Screen::List(list)) => {
            if let Some(message) = list.on_saved(mode, id, result) {
                app.toast = Some(Toast::new(message));
            }
        }
        (AppEvent::UserDeleted { id, result, .. }, Screen::List(list)) => list.on_deleted(&id, result),
        (AppEvent::UserLoaded { generation, result, .. }, Screen::Detail(detail)) => {
            detail.on_loaded(generation, result)
        }
        (ev, _) => tracing::warn!(?ev, "result does not belong to the mounted view"),
    }
}

/// Route a key press to the open dialog or, through the keymap, to the screen.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    match app.input_mode() {
        InputMode::Modal => handle_modal_key(app, key),
        InputMode::Normal => {
            let Some(action) = app.keymap.resolve(&key) else {
                return;
            };
            match action {
                KeyAction::Quit => app.should_quit = true,
                KeyAction::OpenHelp => app.show_help = true,
                KeyAction::Ignore => {}
                _ if matches!(app.screen, Screen::List(_)) => handle_list_action(app, action),
                KeyAction::Back => app.navigate(Route::List),
                _ => {}
            }
        }
    }
}

fn handle_list_action(app: &mut AppState, action: KeyAction) {
    let Some(list) = app.list_mut() else {
        return;
    };
    match action {
        KeyAction::NewUser => list.open_create(),
        KeyAction::EditSelection => list.open_edit(),
        KeyAction::DeleteSelection => list.open_delete(),
        KeyAction::MoveUp => list.move_up(),
        KeyAction::MoveDown => list.move_down(),
        KeyAction::PageUp => list.page_up(),
        KeyAction::PageDown => list.page_down(),
        KeyAction::ViewDetails => {
            if let Some(id) = list.selected_user().and_then(|u| u.id.clone()) {
                app.navigate(Route::Detail(id));
            }
        }
        KeyAction::Back | KeyAction::Quit | KeyAction::OpenHelp | KeyAction::Ignore => {}
    }
}

fn handle_modal_key(app: &mut AppState, key: KeyEvent) {
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }
    let Some(list) = app.list_mut() else {
        return;
    };
    let command = if list.form.open {
        handle_form_key(list, key)
    } else if list.delete.open {
        handle_delete_key(list, key)
    } else {
        None
    };
    if let Some(command) = command {
        app.enqueue(command);
    }
}

fn handle_form_key(list: &mut crate::app::list::ListView, key: KeyEvent) -> Option<Command> {
    let form = &mut list.form;
    match key.code {
        KeyCode::Esc => form.close(),
        KeyCode::Enter => return form.submit(),
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Backspace => form.pop_char(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => form.push_char(c),
        _ => {}
    }
    None
}

fn handle_delete_key(list: &mut crate::app::list::ListView, key: KeyEvent) -> Option<Command> {
    let dlg = &mut list.delete;
    match key.code {
        KeyCode::Esc | KeyCode::Char('n') => dlg.close(),
        KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => dlg.toggle_choice(),
        KeyCode::Char('y') => return dlg.confirm(),
        KeyCode::Enter => match dlg.choice {
            DeleteChoice::Delete => return dlg.confirm(),
            DeleteChoice::Cancel => dlg.close(),
        },
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{User, UserId};

    fn press(app: &mut AppState, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn loaded_app() -> AppState {
        let mut app = AppState::new(Theme::dark(), Keymap::default(), Route::List);
        app.take_commands();
        let users = vec![User { id: Some(UserId::Number(1)), name: "Ann".into(), ..Default::default() }];
        let epoch = app.epoch;
        apply_event(&mut app, AppEvent::UsersLoaded { epoch, result: Ok(users) });
        app
    }

    #[test]
    fn stale_epoch_is_dropped() {
        let mut app = loaded_app();
        let stale = app.epoch - 1;
        apply_event(&mut app, AppEvent::UsersLoaded { epoch: stale, result: Ok(Vec::new()) });
        assert_eq!(app.list().map(|l| l.users.len()), Some(1));
    }

    #[test]
    fn typing_in_form_does_not_trigger_screen_actions() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.input_mode(), InputMode::Modal);
        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('d'));
        assert!(!app.should_quit);
        let form = &app.list().expect("list").form;
        assert_eq!(form.draft().name, "qd");
        assert!(!app.list().expect("list").delete.open);
    }

    #[test]
    fn delete_dialog_defaults_to_cancel() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Enter);
        assert!(app.take_commands().is_empty());
        assert!(!app.list().expect("list").delete.open);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.take_commands().as_slice(), [(_, Command::DeleteUser { .. })]));
    }

    #[test]
    fn view_and_back_navigate() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('v'));
        assert_eq!(app.route(), Route::Detail(UserId::Number(1)));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.route(), Route::List);
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('n'));
        assert!(!app.list().expect("list").form.open);
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }
}
