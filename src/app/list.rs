//! Root screen: the in-memory user collection plus the two dialogs it owns.
//!
//! The collection mirrors API responses only. Successful saves and deletes
//! are reconciled locally; the list is never re-fetched after a mutation.

use super::delete::DeleteConfirmation;
use super::form::FormEditor;
use super::{Command, SaveMode};
use crate::api::{User, UserId};
use crate::error::ApiError;

/// Users table state plus the dialogs opened from it.
pub struct ListView {
    pub users: Vec<User>,
    pub loading: bool,
    pub selected: usize,
    pub rows_per_page: usize,
    pub form: FormEditor,
    pub delete: DeleteConfirmation,
}

impl ListView {
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            loading: false,
            selected: 0,
            rows_per_page: 10,
            form: FormEditor::new(),
            delete: DeleteConfirmation::new(),
        }
    }

    /// Start the initial fetch.
    pub fn mount(&mut self) -> Command {
        self.loading = true;
        Command::LoadUsers
    }

    /// Replace the collection with a fetched one. Errors are logged and leave it as is.
    pub fn on_loaded(&mut self, result: Result<Vec<User>, ApiError>) {
        match result {
            Ok(users) => {
                tracing::info!(count = users.len(), "loaded users");
                self.users = users;
            }
            Err(err) => tracing::error!(error = %err, "failed to fetch users"),
        }
        self.loading = false;
        self.clamp_selection();
    }

    pub fn has_open_dialog(&self) -> bool {
        self.form.open || self.delete.open
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.users.get(self.selected)
    }

    pub fn open_create(&mut self) {
        self.form.open_with(None);
    }

    /// Edit the selected row. No-op on an empty table.
    pub fn open_edit(&mut self) {
        if let Some(user) = self.selected_user().cloned() {
            self.form.open_with(Some(user));
        }
    }

    pub fn open_delete(&mut self) {
        if let Some(user) = self.selected_user().cloned() {
            self.delete.open_for(Some(user));
        }
    }

    /// Reconcile a finished save. Returns the notification text on success.
    ///
    /// Updates replace the rows carrying `submitted`, the id the request was
    /// issued for, whatever id the response echoes back.
    pub fn on_saved(
        &mut self,
        mode: SaveMode,
        submitted: Option<UserId>,
        result: Result<User, ApiError>,
    ) -> Option<&'static str> {
        let message = self.form.on_saved(mode, &result);
        if let Ok(saved) = result {
            match mode {
                SaveMode::Update => self.replace(submitted, saved),
                SaveMode::Create => self.users.push(saved),
            }
        }
        message
    }

    /// Drop the deleted row once the server confirmed it.
    pub fn on_deleted(&mut self, id: &UserId, result: Result<(), ApiError>) {
        if self.delete.on_deleted(&result) {
            self.users.retain(|u| !u.same_id(id));
            self.clamp_selection();
        }
    }

    /// Replace every row carrying `submitted`, keeping table order.
    fn replace(&mut self, submitted: Option<UserId>, mut saved: User) {
        let Some(id) = submitted.or_else(|| saved.id.clone()) else {
            tracing::warn!("updated record has no identifier to match rows on");
            return;
        };
        if saved.id.is_none() {
            tracing::debug!(%id, "update response omitted the identifier");
            saved.id = Some(id.clone());
        }
        for row in self.users.iter_mut().filter(|u| u.same_id(&id)) {
            *row = saved.clone();
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.users.len() {
            self.selected += 1;
        }
    }

    pub fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(self.rows_per_page.max(1));
    }

    /// Advance the selection by one page, stopping at the last row.
    pub fn page_down(&mut self) {
        let next = self.selected.saturating_add(self.rows_per_page.max(1));
        self.selected = next.min(self.users.len().saturating_sub(1));
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.users.len().saturating_sub(1));
    }
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64, name: &str) -> User {
        User { id: Some(UserId::Number(id)), name: name.into(), ..Default::default() }
    }

    fn loaded(users: Vec<User>) -> ListView {
        let mut list = ListView::new();
        let _ = list.mount();
        list.on_loaded(Ok(users));
        list
    }

    fn names(list: &ListView) -> Vec<&str> {
        list.users.iter().map(|u| u.name.as_str()).collect()
    }

    #[test]
    fn mount_sets_loading_until_result() {
        let mut list = ListView::new();
        assert!(matches!(list.mount(), Command::LoadUsers));
        assert!(list.loading);
        list.on_loaded(Err(ApiError::Transport("refused".into())));
        assert!(!list.loading);
        assert!(list.users.is_empty());
    }

    #[test]
    fn update_replaces_in_place() {
        let mut list = loaded(vec![user(1, "Ann"), user(2, "Bo"), user(3, "Cy")]);
        list.selected = 1;
        list.open_edit();
        let msg = list.on_saved(SaveMode::Update, Some(UserId::Number(2)), Ok(user(2, "Bob")));
        assert_eq!(msg, Some("User updated successfully!"));
        assert_eq!(names(&list), ["Ann", "Bob", "Cy"]);
        assert!(!list.form.open);
    }

    #[test]
    fn update_matches_rows_on_the_submitted_id() {
        let mut list = loaded(vec![user(1, "Ann"), user(2, "Bo")]);
        list.open_edit();
        let echoed = User { id: None, name: "Anne".into(), ..Default::default() };
        let msg = list.on_saved(SaveMode::Update, Some(UserId::Number(1)), Ok(echoed));
        assert!(msg.is_some());
        assert_eq!(names(&list), ["Anne", "Bo"]);
        assert_eq!(list.users[0].id, Some(UserId::Number(1)));

        let retyped = User { id: Some(UserId::Text("2".into())), name: "Bob".into(), ..Default::default() };
        list.on_saved(SaveMode::Update, Some(UserId::Number(2)), Ok(retyped));
        assert_eq!(names(&list), ["Anne", "Bob"]);
    }

    #[test]
    fn create_appends() {
        let mut list = loaded(vec![user(1, "Ann")]);
        list.open_create();
        list.on_saved(SaveMode::Create, None, Ok(user(2, "Bo")));
        assert_eq!(names(&list), ["Ann", "Bo"]);
    }

    #[test]
    fn failed_save_changes_nothing() {
        let mut list = loaded(vec![user(1, "Ann")]);
        list.open_create();
        let msg = list.on_saved(SaveMode::Create, None, Err(ApiError::Decode("eof".into())));
        assert!(msg.is_none());
        assert!(list.form.open);
        assert_eq!(names(&list), ["Ann"]);
    }

    #[test]
    fn delete_removes_only_matching_row_and_clamps() {
        let mut list = loaded(vec![user(1, "Ann"), user(2, "Bo"), user(3, "Cy")]);
        list.selected = 2;
        list.open_delete();
        list.on_deleted(&UserId::Number(3), Ok(()));
        assert_eq!(names(&list), ["Ann", "Bo"]);
        assert_eq!(list.selected, 1);
        assert!(!list.delete.open);
    }

    #[test]
    fn edit_and_delete_need_a_row() {
        let mut list = loaded(Vec::new());
        list.open_edit();
        list.open_delete();
        assert!(!list.has_open_dialog());
    }

    #[test]
    fn paging_is_bounded() {
        let mut list = loaded((1..=25).map(|i| user(i, "u")).collect());
        list.rows_per_page = 10;
        list.page_down();
        list.page_down();
        list.page_down();
        assert_eq!(list.selected, 24);
        list.page_up();
        assert_eq!(list.selected, 14);
        list.move_down();
        list.move_up();
        list.move_up();
        assert_eq!(list.selected, 13);
    }
}
