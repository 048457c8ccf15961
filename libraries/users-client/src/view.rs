//! View model for the users screen.
//!
//! The whole screen is described by one [`ViewState`] value. It is never
//! mutated in place: every event is an [`Action`] and
//! [`ViewState::apply`] returns the next snapshot.

use crate::error::ClientError;
use std::collections::BTreeMap;
use users_core::{User, UserId, Violation};

/// What the form submits to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Create,
    Editing { id: UserId },
}

/// Form field an error is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
}

impl Field {
    /// Field owning a validation rule
    pub fn of(violation: Violation) -> Self {
        if violation.is_email() {
            Field::Email
        } else {
            Field::Name
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
    Warning,
}

impl BannerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BannerKind::Success => "success",
            BannerKind::Error => "error",
            BannerKind::Warning => "warning",
        }
    }
}

/// Message shown above the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    pub details: Vec<String>,
}

impl Banner {
    pub fn new(kind: BannerKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }
}

/// Raw form contents as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub email: String,
}

/// User awaiting delete confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: UserId,
    pub name: String,
}

/// Why a submit was refused by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitFailure {
    /// HTTP status, absent when the server could not be reached
    pub status: Option<u16>,
    pub message: String,
    pub errors: Vec<String>,
}

impl From<&ClientError> for SubmitFailure {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Api {
                status,
                message,
                errors,
            } => Self {
                status: Some(*status),
                message: message.clone(),
                errors: errors.clone(),
            },
            other => Self {
                status: None,
                message: other.user_message(),
                errors: Vec::new(),
            },
        }
    }
}

/// Events folded into the view state
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadStarted,
    UsersLoaded { users: Vec<User>, total: usize },
    LoadFailed(String),
    HealthChecked { api: bool, database: bool },
    FormEdited { field: Field, value: String },
    EditRequested(User),
    EditCancelled,
    DeleteRequested { id: UserId, name: String },
    DeleteCancelled,
    DeleteSucceeded,
    DeleteFailed(String),
    SubmitRejected(BTreeMap<Field, String>),
    SubmitSucceeded,
    SubmitFailed(SubmitFailure),
    BannerDismissed,
}

/// Everything the screen shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub mode: Mode,
    pub form: FormValues,
    pub pending_delete: Option<PendingDelete>,
    pub users: Vec<User>,
    pub total: usize,
    pub field_errors: BTreeMap<Field, String>,
    pub banner: Option<Banner>,
    pub loading: bool,
    pub api_online: bool,
    pub database_online: bool,
}

const ALL_VIOLATIONS: [Violation; 5] = [
    Violation::NameTooShort,
    Violation::NameTooLong,
    Violation::EmailMissing,
    Violation::EmailInvalid,
    Violation::EmailTooLong,
];

fn field_for_message(message: &str) -> Option<Field> {
    ALL_VIOLATIONS
        .iter()
        .find(|v| v.message() == message)
        .map(|v| Field::of(*v))
}

impl ViewState {
    /// Fold one action into a new snapshot
    #[must_use]
    pub fn apply(&self, action: Action) -> ViewState {
        let mut next = self.clone();

        match action {
            Action::LoadStarted => next.loading = true,
            Action::UsersLoaded { users, total } => {
                next.users = users;
                next.total = total;
                next.loading = false;
                next.api_online = true;
            }
            Action::LoadFailed(message) => {
                next.users.clear();
                next.total = 0;
                next.loading = false;
                next.banner = Some(Banner::new(
                    BannerKind::Error,
                    format!("Could not load users: {}", message),
                ));
            }
            Action::HealthChecked { api, database } => {
                next.api_online = api;
                next.database_online = api && database;
            }
            Action::FormEdited { field, value } => {
                match field {
                    Field::Name => next.form.name = value,
                    Field::Email => next.form.email = value,
                }
                next.field_errors.remove(&field);
            }
            Action::EditRequested(user) => {
                next.mode = Mode::Editing { id: user.id };
                next.banner = Some(Banner::new(
                    BannerKind::Warning,
                    format!("Editing user: {}", user.name),
                ));
                next.form = FormValues {
                    name: user.name,
                    email: user.email,
                };
                next.field_errors.clear();
            }
            Action::EditCancelled => {
                next.reset_form();
                next.banner = Some(Banner::new(BannerKind::Warning, "Edit cancelled"));
            }
            Action::DeleteRequested { id, name } => {
                next.pending_delete = Some(PendingDelete { id, name });
            }
            Action::DeleteCancelled => next.pending_delete = None,
            Action::DeleteSucceeded => {
                if let (Some(pending), Mode::Editing { id }) = (&self.pending_delete, self.mode) {
                    if pending.id == id {
                        next.reset_form();
                    }
                }
                next.pending_delete = None;
                next.banner = Some(Banner::new(BannerKind::Success, "User deleted successfully"));
            }
            Action::DeleteFailed(message) => {
                next.pending_delete = None;
                next.banner = Some(Banner::new(
                    BannerKind::Error,
                    format!("Could not delete user: {}", message),
                ));
            }
            Action::SubmitRejected(errors) => {
                next.field_errors = errors;
                next.banner = Some(Banner::new(
                    BannerKind::Error,
                    "Please fix the errors in the form",
                ));
            }
            Action::SubmitSucceeded => {
                let message = match self.mode {
                    Mode::Create => "User created successfully",
                    Mode::Editing { .. } => "User updated successfully",
                };
                next.reset_form();
                next.banner = Some(Banner::new(BannerKind::Success, message));
            }
            Action::SubmitFailed(failure) => next.fold_submit_failure(failure),
            Action::BannerDismissed => next.banner = None,
        }

        next
    }

    /// Form is in edit mode
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Editing { .. })
    }

    fn reset_form(&mut self) {
        self.mode = Mode::Create;
        self.form = FormValues::default();
        self.field_errors.clear();
    }

    fn fold_submit_failure(&mut self, failure: SubmitFailure) {
        self.field_errors.clear();

        if failure.status == Some(409) {
            self.field_errors.insert(
                Field::Email,
                "This email is already registered".to_string(),
            );
            self.banner = Some(Banner::new(
                BannerKind::Error,
                "Email is already in use by another user",
            ));
            return;
        }

        if failure.status == Some(400) {
            for error in &failure.errors {
                if let Some(field) = field_for_message(error) {
                    self.field_errors.entry(field).or_insert_with(|| error.clone());
                }
            }
        }

        self.banner = Some(
            Banner::new(BannerKind::Error, format!("Error: {}", failure.message))
                .with_details(failure.errors),
        );
    }
}
