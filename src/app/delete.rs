//! Confirmation dialog gating a delete request.

use super::Command;
use crate::api::User;
use crate::error::ApiError;

/// Button focused in the confirmation dialog.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeleteChoice {
    Cancel,
    Delete,
}

/// State of the delete dialog. `target` is the row being deleted.
pub struct DeleteConfirmation {
    pub open: bool,
    pub target: Option<User>,
    pub choice: DeleteChoice,
}

impl DeleteConfirmation {
    pub fn new() -> Self {
        Self { open: false, target: None, choice: DeleteChoice::Cancel }
    }

    /// Show the dialog for `target` with Cancel focused.
    pub fn open_for(&mut self, target: Option<User>) {
        self.target = target;
        self.choice = DeleteChoice::Cancel;
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle_choice(&mut self) {
        self.choice = match self.choice {
            DeleteChoice::Cancel => DeleteChoice::Delete,
            DeleteChoice::Delete => DeleteChoice::Cancel,
        };
    }

    /// Question shown in the dialog body.
    pub fn prompt(&self) -> String {
        match &self.target {
            Some(user) => format!("Are you sure you want to delete {}?", user.name),
            None => "Loading user data...".to_string(),
        }
    }

    /// Request deletion of the target. No-op while the target is absent.
    pub fn confirm(&self) -> Option<Command> {
        let Some(target) = &self.target else {
            tracing::debug!("delete confirmed without a target");
            return None;
        };
        let Some(id) = target.id.clone() else {
            tracing::error!(name = %target.name, "delete target has no identifier");
            return None;
        };
        tracing::info!(%id, "deleting user");
        Some(Command::DeleteUser { id })
    }

    /// Returns true when the caller should drop the record; the dialog is then closed.
    pub fn on_deleted(&mut self, result: &Result<(), ApiError>) -> bool {
        match result {
            Ok(()) => {
                self.close();
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to delete user");
                false
            }
        }
    }
}

impl Default for DeleteConfirmation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::UserId;

    fn ann() -> User {
        User { id: Some(UserId::Number(1)), name: "Ann".into(), ..Default::default() }
    }

    #[test]
    fn prompt_names_target_or_waits() {
        let mut dlg = DeleteConfirmation::new();
        assert_eq!(dlg.prompt(), "Loading user data...");
        dlg.open_for(Some(ann()));
        assert_eq!(dlg.prompt(), "Are you sure you want to delete Ann?");
    }

    #[test]
    fn confirm_without_target_is_a_no_op() {
        let mut dlg = DeleteConfirmation::new();
        dlg.open_for(None);
        assert!(dlg.confirm().is_none());
        assert!(dlg.open);
    }

    #[test]
    fn confirm_targets_record_id() {
        let mut dlg = DeleteConfirmation::new();
        dlg.open_for(Some(ann()));
        assert!(matches!(dlg.confirm(), Some(Command::DeleteUser { id }) if id == UserId::Number(1)));
    }

    #[test]
    fn failure_leaves_dialog_open() {
        let mut dlg = DeleteConfirmation::new();
        dlg.open_for(Some(ann()));
        assert!(!dlg.on_deleted(&Err(ApiError::Status { status: 500, body: String::new() })));
        assert!(dlg.open);
        assert!(dlg.on_deleted(&Ok(())));
        assert!(!dlg.open);
    }
}
