//! Console router: logs transitions and queues them for `main` to act on.

use anyhow::{anyhow, Context, Result};
use client_core::{
    Navigator, RecordingNavigator, RouteParams, Transition, UserDirectory, ROUTE_PARAM_USERNAME,
    USER_EDIT_STATE,
};
use shared::{error::ErrorCode, protocol::UserDetail};
use tracing::{debug, info};

#[derive(Default)]
pub struct ConsoleNavigator {
    queue: RecordingNavigator,
}

impl ConsoleNavigator {
    pub fn drain(&self) -> Vec<Transition> {
        self.queue.take_transitions()
    }
}

impl Navigator for ConsoleNavigator {
    fn transition_to(&self, state: &str, params: RouteParams) -> Result<()> {
        info!(state, ?params, "navigation requested");
        self.queue.transition_to(state, params)
    }
}

/// Resolves queued editor transitions into the user records they open.
///
/// Transitions to other states are skipped.
pub async fn open_edit_destinations(
    directory: &dyn UserDirectory,
    transitions: Vec<Transition>,
) -> Result<Vec<UserDetail>> {
    let mut details = Vec::new();
    for transition in transitions {
        if transition.state != USER_EDIT_STATE {
            debug!(state = %transition.state, "no console route for state");
            continue;
        }
        let Some(username) = transition.params.get(ROUTE_PARAM_USERNAME) else {
            continue;
        };
        match directory.user_detail(username).await {
            Ok(detail) => details.push(detail),
            Err(err) if err.api_error().map(|api| api.code()) == Some(ErrorCode::NotFound) => {
                return Err(anyhow!("user '{username}' does not exist"));
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to load user '{username}'"));
            }
        }
    }
    Ok(details)
}

#[cfg(test)]
#[path = "tests/navigator_tests.rs"]
mod tests;
