//! Controller binding the user list view to a [`UserDirectory`] and a [`Navigator`].

use std::sync::Arc;

use anyhow::{Context, Result};
use shared::{domain::UserSummary, protocol::ListUsersQuery};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::{
    edit_route_params,
    error::FetchError,
    events::{ViewError, ViewErrorContext, ViewEvent},
    Navigator, UserDirectory, USER_EDIT_STATE, USER_PAGE_LIMIT,
};

const VIEW_EVENT_CAPACITY: usize = 64;

/// State exposed to the view.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub users: Vec<UserSummary>,
    pub total: Option<u64>,
    pub last_error: Option<ViewError>,
}

pub struct UserListController {
    directory: Arc<dyn UserDirectory>,
    navigator: Arc<dyn Navigator>,
    state: ViewState,
    events: broadcast::Sender<ViewEvent>,
}

impl UserListController {
    /// Builds the controller and performs the initial load.
    ///
    /// A failed initial load does not fail construction; it is reported
    /// through [`UserListController::last_error`].
    pub async fn init(directory: Arc<dyn UserDirectory>, navigator: Arc<dyn Navigator>) -> Self {
        let (events, _) = broadcast::channel(VIEW_EVENT_CAPACITY);
        Self::init_with_events(directory, navigator, events).await
    }

    /// Like [`UserListController::init`], publishing view events on `events`
    /// so subscribers created beforehand also observe the initial load.
    pub async fn init_with_events(
        directory: Arc<dyn UserDirectory>,
        navigator: Arc<dyn Navigator>,
        events: broadcast::Sender<ViewEvent>,
    ) -> Self {
        let mut controller = Self {
            directory,
            navigator,
            state: ViewState::default(),
            events,
        };
        let _ = controller.load_users().await;
        controller
    }

    /// Fetches the first page of users and replaces the current list.
    ///
    /// On failure the previous list is kept and the error is recorded.
    pub async fn load_users(&mut self) -> Result<(), FetchError> {
        let query = ListUsersQuery::with_limit(USER_PAGE_LIMIT);
        debug!(limit = query.limit, "loading users");

        match self.directory.list_users(&query).await {
            Ok(list) => {
                let count = list.users.len();
                info!(count, total = ?list.total, "users loaded");
                self.state.users = list.users;
                self.state.total = list.total;
                self.state.last_error = None;
                let _ = self.events.send(ViewEvent::UsersLoaded {
                    count,
                    total: list.total,
                });
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to load users");
                let view_error = ViewError::from_fetch(ViewErrorContext::LoadUsers, &err);
                self.state.last_error = Some(view_error.clone());
                let _ = self.events.send(ViewEvent::LoadFailed(view_error));
                Err(err)
            }
        }
    }

    /// Requests the transition to the editor for `user`.
    pub fn edit_user(&self, user: &UserSummary) -> Result<()> {
        let params = edit_route_params(user);
        debug!(state = USER_EDIT_STATE, username = %user.username, "opening user editor");

        if let Err(err) = self.navigator.transition_to(USER_EDIT_STATE, params.clone()) {
            let view_error = ViewError::from_message(ViewErrorContext::EditUser, err.to_string());
            let _ = self.events.send(ViewEvent::NavigationFailed(view_error));
            return Err(err).with_context(|| {
                format!("failed to open editor for user '{}'", user.username)
            });
        }

        let _ = self.events.send(ViewEvent::Navigated {
            state: USER_EDIT_STATE.to_string(),
            params,
        });
        Ok(())
    }

    pub fn users(&self) -> &[UserSummary] {
        &self.state.users
    }

    pub fn total(&self) -> Option<u64> {
        self.state.total
    }

    pub fn last_error(&self) -> Option<&ViewError> {
        self.state.last_error.as_ref()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ViewEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
