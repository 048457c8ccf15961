//! Drives the API client and folds results into the view state.

use crate::client::UsersClient;
use crate::form::validate_form;
use crate::view::{Action, Mode, SubmitFailure, ViewState};
use tracing::{debug, warn};
use users_core::UserInput;

/// Owns the client and the current snapshot
#[derive(Debug)]
pub struct Controller {
    client: UsersClient,
    state: ViewState,
}

impl Controller {
    pub fn new(client: UsersClient) -> Self {
        Self {
            client,
            state: ViewState::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Apply an action and return the new snapshot
    pub fn dispatch(&mut self, action: Action) -> &ViewState {
        self.state = self.state.apply(action);
        &self.state
    }

    /// Reload the user list
    pub async fn refresh(&mut self) -> &ViewState {
        self.dispatch(Action::LoadStarted);
        let action = list_action(&self.client).await;
        self.dispatch(action)
    }

    /// Check `/health` and update the indicators
    pub async fn check_health(&mut self) -> &ViewState {
        let action = health_action(&self.client).await;
        self.dispatch(action)
    }

    /// Validate the form and create or update.
    ///
    /// Nothing is sent when the form is invalid. On success the list is
    /// reloaded from the server.
    pub async fn submit(&mut self) -> &ViewState {
        let fields = match validate_form(&self.state.form.name, &self.state.form.email) {
            Ok(fields) => fields,
            Err(errors) => {
                debug!("Form rejected before sending: {:?}", errors);
                return self.dispatch(Action::SubmitRejected(errors));
            }
        };

        let input = UserInput::new(fields.name, fields.email);
        let result = match self.state.mode {
            Mode::Create => self.client.create_user(&input).await,
            Mode::Editing { id } => self.client.update_user(id, &input).await,
        };

        match result {
            Ok(user) => {
                debug!(id = user.id, "User saved");
                self.dispatch(Action::SubmitSucceeded);
                self.refresh().await
            }
            Err(e) => {
                warn!("Failed to save user: {}", e);
                self.dispatch(Action::SubmitFailed(SubmitFailure::from(&e)))
            }
        }
    }

    /// Delete the user awaiting confirmation, if any
    pub async fn confirm_delete(&mut self) -> &ViewState {
        let Some(pending) = self.state.pending_delete.clone() else {
            return &self.state;
        };

        match self.client.delete_user(pending.id).await {
            Ok(_) => {
                self.dispatch(Action::DeleteSucceeded);
                self.refresh().await
            }
            Err(e) => {
                warn!(id = pending.id, "Failed to delete user: {}", e);
                self.dispatch(Action::DeleteFailed(e.user_message()))
            }
        }
    }
}

/// Result of one health check as an action
pub(crate) async fn health_action(client: &UsersClient) -> Action {
    match client.health().await {
        Ok(health) => Action::HealthChecked {
            api: true,
            database: health.database_connected,
        },
        Err(e) => {
            debug!("Health check failed: {}", e);
            Action::HealthChecked {
                api: false,
                database: false,
            }
        }
    }
}

/// Result of one list load as an action
pub(crate) async fn list_action(client: &UsersClient) -> Action {
    match client.list_users().await {
        Ok(list) => Action::UsersLoaded {
            users: list.users,
            total: list.total,
        },
        Err(e) => Action::LoadFailed(e.user_message()),
    }
}
