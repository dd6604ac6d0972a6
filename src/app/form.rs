//! Form editor for creating a new user or editing an existing one.
//!
//! The editor owns a local copy (`draft`) of every editable attribute. The
//! copy is reseeded only when the target record changes, so cancelling and
//! reopening on the same record keeps unsaved input.

use rand::Rng;

use super::{Command, SaveMode};
use crate::api::{Address, Company, User};
use crate::error::ApiError;

const USERNAME_PREFIX: &str = "USER-";
const USERNAME_SUFFIX_LEN: usize = 5;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `USER-` followed by five random lowercase base-36 characters.
pub fn generate_username() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..USERNAME_SUFFIX_LEN)
        .map(|_| char::from(BASE36[rng.gen_range(0..BASE36.len())]))
        .collect();
    format!("{USERNAME_PREFIX}{suffix}")
}

/// Fields shown by the editor, in display order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Username,
    Street,
    City,
    CompanyName,
    Website,
}

impl FormField {
    /// Display order of the dialog.
    pub const ALL: [FormField; 8] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::Username,
        FormField::Street,
        FormField::City,
        FormField::CompanyName,
        FormField::Website,
    ];

    /// Focus ring. Username is shown but never receives input.
    pub const EDITABLE: [FormField; 7] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::Street,
        FormField::City,
        FormField::CompanyName,
        FormField::Website,
    ];

    /// Fields that must be non-empty before submitting.
    pub const REQUIRED: [FormField; 5] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::Street,
        FormField::City,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Phone => "Phone",
            FormField::Username => "Username",
            FormField::Street => "Street",
            FormField::City => "City",
            FormField::CompanyName => "Company Name",
            FormField::Website => "Website",
        }
    }

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }

    pub fn is_editable(self) -> bool {
        self != FormField::Username
    }

    /// Tagged update carrying `value` for this field, or `None` for read-only ones.
    pub fn update_with(self, value: String) -> Option<FieldUpdate> {
        match self {
            FormField::Name => Some(FieldUpdate::Name(value)),
            FormField::Email => Some(FieldUpdate::Email(value)),
            FormField::Phone => Some(FieldUpdate::Phone(value)),
            FormField::Username => None,
            FormField::Street => Some(FieldUpdate::Address(AddressField::Street, value)),
            FormField::City => Some(FieldUpdate::Address(AddressField::City, value)),
            FormField::CompanyName => Some(FieldUpdate::Company(CompanyField::Name, value)),
            FormField::Website => Some(FieldUpdate::Website(value)),
        }
    }
}

/// Editable attribute under `address`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddressField {
    Street,
    City,
}

/// Editable attribute under `company`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CompanyField {
    Name,
}

/// A change to exactly one attribute of the draft.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldUpdate {
    Name(String),
    Email(String),
    Phone(String),
    Website(String),
    Address(AddressField, String),
    Company(CompanyField, String),
}

/// Create/edit dialog state. The draft survives closing until the target changes.
pub struct FormEditor {
    pub open: bool,
    pub focus: FormField,
    /// Shown under the fields when submission was blocked by an empty required field.
    pub hint: Option<String>,
    target: Option<User>,
    draft: User,
}

impl FormEditor {
    pub fn new() -> Self {
        Self {
            open: false,
            focus: FormField::Name,
            hint: None,
            target: None,
            draft: blank_draft(),
        }
    }

    /// Show the editor for `target` (`None` = create mode).
    pub fn open_with(&mut self, target: Option<User>) {
        self.set_target(target);
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.hint = None;
    }

    /// Replace the target record, reseeding the draft only when the record changed.
    ///
    /// Whole records are compared: rows may share an id, and a saved row
    /// differs from the target it was edited from.
    pub fn set_target(&mut self, target: Option<User>) {
        let unchanged = self.target == target;
        self.target = target;
        if !unchanged {
            self.reseed();
        }
    }

    fn reseed(&mut self) {
        self.draft = match &self.target {
            Some(user) => seed_from(user),
            None => blank_draft(),
        };
        self.focus = FormField::Name;
        self.hint = None;
    }

    pub fn target(&self) -> Option<&User> {
        self.target.as_ref()
    }

    pub fn draft(&self) -> &User {
        &self.draft
    }

    /// Update when editing an existing record, otherwise create.
    pub fn mode(&self) -> SaveMode {
        if self.target.is_some() { SaveMode::Update } else { SaveMode::Create }
    }

    pub fn title(&self) -> &'static str {
        match self.mode() {
            SaveMode::Update => "Edit User",
            SaveMode::Create => "Create User",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode() {
            SaveMode::Update => "Update",
            SaveMode::Create => "Create",
        }
    }

    /// Current draft text for `field`.
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.draft.name,
            FormField::Email => &self.draft.email,
            FormField::Phone => &self.draft.phone,
            FormField::Username => &self.draft.username,
            FormField::Street => self.draft.street(),
            FormField::City => self.draft.city(),
            FormField::CompanyName => self.draft.company_name(),
            FormField::Website => &self.draft.website,
        }
    }

    /// Write one attribute of the draft; siblings are untouched.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Name(v) => self.draft.name = v,
            FieldUpdate::Email(v) => self.draft.email = v,
            FieldUpdate::Phone(v) => self.draft.phone = v,
            FieldUpdate::Website(v) => self.draft.website = v,
            FieldUpdate::Address(field, v) => {
                let address = self.draft.address.get_or_insert_with(Address::default);
                match field {
                    AddressField::Street => address.street = v,
                    AddressField::City => address.city = v,
                }
            }
            FieldUpdate::Company(CompanyField::Name, v) => {
                self.draft.company.get_or_insert_with(Company::default).name = v;
            }
        }
        self.hint = None;
    }

    /// Append to the focused field.
    pub fn push_char(&mut self, c: char) {
        let mut value = self.value(self.focus).to_string();
        value.push(c);
        if let Some(update) = self.focus.update_with(value) {
            self.apply(update);
        }
    }

    pub fn pop_char(&mut self) {
        let mut value = self.value(self.focus).to_string();
        if value.pop().is_none() {
            return;
        }
        if let Some(update) = self.focus.update_with(value) {
            self.apply(update);
        }
    }

    /// Move focus forward, wrapping.
    pub fn focus_next(&mut self) {
        self.focus = step(self.focus, 1);
    }

    pub fn focus_prev(&mut self) {
        self.focus = step(self.focus, FormField::EDITABLE.len() - 1);
    }

    /// First required field that is still empty.
    pub fn missing_required(&self) -> Option<FormField> {
        FormField::REQUIRED.into_iter().find(|f| self.value(*f).is_empty())
    }

    /// Build the save request, or block on the first empty required field.
    pub fn submit(&mut self) -> Option<Command> {
        if let Some(field) = self.missing_required() {
            self.focus = field;
            self.hint = Some(format!("{} is required", field.label()));
            return None;
        }
        let mode = self.mode();
        let mut user = self.draft.clone();
        if let Some(target) = &self.target {
            user.id = target.id.clone();
        }
        tracing::info!(?mode, id = ?user.id, "submitting user form");
        Some(Command::SaveUser { mode, user })
    }

    /// Outcome of a save issued by `submit`. Returns the notification to show on success.
    pub fn on_saved(&mut self, mode: SaveMode, result: &Result<User, ApiError>) -> Option<&'static str> {
        match result {
            Ok(_) => {
                self.close();
                Some(match mode {
                    SaveMode::Update => "User updated successfully!",
                    SaveMode::Create => "User created successfully!",
                })
            }
            Err(err) => {
                tracing::error!(error = %err, ?mode, "error in updating/creating user");
                None
            }
        }
    }
}

impl Default for FormEditor {
    fn default() -> Self {
        Self::new()
    }
}

fn step(current: FormField, by: usize) -> FormField {
    let ring = FormField::EDITABLE;
    let idx = ring.iter().position(|f| *f == current).unwrap_or(0);
    ring[(idx + by) % ring.len()]
}

fn blank_draft() -> User {
    User {
        username: generate_username(),
        address: Some(Address::default()),
        company: Some(Company::default()),
        ..User::default()
    }
}

fn seed_from(user: &User) -> User {
    User {
        id: None,
        name: user.name.clone(),
        email: user.email.clone(),
        phone: user.phone.clone(),
        username: user.username.clone(),
        address: Some(Address { street: user.street().to_string(), city: user.city().to_string() }),
        company: Some(Company { name: user.company_name().to_string() }),
        website: user.website.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::UserId;

    fn full_user(id: u64, name: &str) -> User {
        User {
            id: Some(UserId::Number(id)),
            name: name.into(),
            email: format!("{}@x.com", name.to_lowercase()),
            phone: "555".into(),
            username: format!("u{id}"),
            address: Some(Address { street: "Main St".into(), city: "Springfield".into() }),
            company: Some(Company { name: "Acme".into() }),
            website: "acme.test".into(),
        }
    }

    fn is_generated(username: &str) -> bool {
        username.strip_prefix("USER-").is_some_and(|s| {
            s.len() == 5 && s.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        })
    }

    #[test]
    fn generated_username_matches_pattern() {
        for _ in 0..50 {
            assert!(is_generated(&generate_username()));
        }
    }

    #[test]
    fn switching_targets_never_mixes_fields() {
        let mut form = FormEditor::new();
        form.open_with(Some(full_user(1, "Ann")));
        form.push_char('!');
        form.close();

        let mut b = full_user(2, "Bo");
        b.company = None;
        form.open_with(Some(b));
        assert_eq!(form.value(FormField::Name), "Bo");
        assert_eq!(form.value(FormField::CompanyName), "");
        assert_eq!(form.value(FormField::Username), "u2");
    }

    #[test]
    fn back_to_create_mode_resets_everything() {
        let mut form = FormEditor::new();
        form.open_with(Some(full_user(1, "Ann")));
        form.close();
        form.open_with(None);
        for field in FormField::ALL {
            if field == FormField::Username {
                assert!(is_generated(form.value(field)));
            } else {
                assert_eq!(form.value(field), "", "{field:?}");
            }
        }
        assert_eq!(form.mode(), SaveMode::Create);
    }

    #[test]
    fn same_target_keeps_unsaved_input() {
        let mut form = FormEditor::new();
        form.open_with(Some(full_user(1, "Ann")));
        form.push_char('e');
        form.close();
        form.open_with(Some(full_user(1, "Ann")));
        assert_eq!(form.value(FormField::Name), "Anne");
    }

    #[test]
    fn rows_sharing_an_id_are_distinct_targets() {
        let mut form = FormEditor::new();
        form.open_with(Some(full_user(11, "Xena")));
        form.close();
        form.open_with(Some(full_user(11, "Yuri")));
        assert_eq!(form.value(FormField::Name), "Yuri");
        assert_eq!(form.value(FormField::Email), "yuri@x.com");
    }

    #[test]
    fn reopening_after_server_changed_the_row_shows_server_values() {
        let mut form = FormEditor::new();
        form.open_with(Some(full_user(1, "ann")));
        let _ = form.submit();
        let stored = full_user(1, "Ann");
        let _ = form.on_saved(SaveMode::Update, &Ok(stored.clone()));
        form.open_with(Some(stored));
        assert_eq!(form.value(FormField::Name), "Ann");
    }

    #[test]
    fn username_is_stable_across_resubmission() {
        let mut form = FormEditor::new();
        form.open_with(None);
        let username = form.value(FormField::Username).to_string();
        for f in FormField::REQUIRED {
            form.focus = f;
            form.push_char('x');
        }
        let first = form.submit();
        let second = form.submit();
        for cmd in [first, second] {
            match cmd {
                Some(Command::SaveUser { mode: SaveMode::Create, user }) => {
                    assert_eq!(user.username, username);
                    assert!(user.id.is_none());
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn unmodified_update_submits_original_record() {
        let original = full_user(9, "Ann");
        let mut form = FormEditor::new();
        form.open_with(Some(original.clone()));
        match form.submit() {
            Some(Command::SaveUser { mode: SaveMode::Update, user }) => assert_eq!(user, original),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn nested_updates_leave_siblings_alone() {
        let mut form = FormEditor::new();
        form.open_with(Some(full_user(1, "Ann")));
        form.apply(FieldUpdate::Address(AddressField::Street, "Elm St".into()));
        assert_eq!(form.value(FormField::Street), "Elm St");
        assert_eq!(form.value(FormField::City), "Springfield");
        assert_eq!(form.value(FormField::CompanyName), "Acme");

        form.apply(FieldUpdate::Company(CompanyField::Name, "Globex".into()));
        assert_eq!(form.value(FormField::Street), "Elm St");
        assert_eq!(form.value(FormField::City), "Springfield");
    }

    #[test]
    fn username_ignores_typing() {
        let mut form = FormEditor::new();
        form.open_with(Some(full_user(1, "Ann")));
        form.focus = FormField::Username;
        form.push_char('z');
        form.pop_char();
        assert_eq!(form.value(FormField::Username), "u1");
    }

    #[test]
    fn submit_blocks_on_first_missing_required_field() {
        let mut form = FormEditor::new();
        form.open_with(None);
        form.push_char('A');
        form.focus = FormField::Website;
        assert!(form.submit().is_none());
        assert_eq!(form.focus, FormField::Email);
        assert_eq!(form.hint.as_deref(), Some("Email is required"));

        for f in [FormField::Email, FormField::Phone, FormField::Street] {
            form.focus = f;
            form.push_char('1');
        }
        assert!(form.submit().is_none());
        assert_eq!(form.focus, FormField::City);
    }

    #[test]
    fn focus_ring_skips_username_and_wraps() {
        let mut form = FormEditor::new();
        form.focus_next();
        form.focus_next();
        form.focus_next();
        assert_eq!(form.focus, FormField::Street);
        form.focus = FormField::Name;
        form.focus_prev();
        assert_eq!(form.focus, FormField::Website);
    }

    #[test]
    fn failed_save_keeps_editor_open() {
        let mut form = FormEditor::new();
        form.open_with(None);
        let msg = form.on_saved(SaveMode::Create, &Err(ApiError::Transport("down".into())));
        assert!(msg.is_none());
        assert!(form.open);

        let msg = form.on_saved(SaveMode::Create, &Ok(full_user(3, "Cy")));
        assert_eq!(msg, Some("User created successfully!"));
        assert!(!form.open);
    }
}
