//! View events and error modeling for the user list.

use crate::{error::FetchError, RouteParams};

#[derive(Debug, Clone)]
pub enum ViewEvent {
    UsersLoaded {
        count: usize,
        total: Option<u64>,
    },
    LoadFailed(ViewError),
    Navigated {
        state: String,
        params: RouteParams,
    },
    NavigationFailed(ViewError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewErrorCategory {
    Auth,
    Transport,
    Validation,
    Server,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewErrorContext {
    LoadUsers,
    EditUser,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewError {
    category: ViewErrorCategory,
    context: ViewErrorContext,
    message: String,
}

impl ViewError {
    pub fn from_fetch(context: ViewErrorContext, err: &FetchError) -> Self {
        let category = match err {
            FetchError::Status { status, .. } => match *status {
                401 | 403 => ViewErrorCategory::Auth,
                400 | 404 | 422 => ViewErrorCategory::Validation,
                500..=599 => ViewErrorCategory::Server,
                _ => ViewErrorCategory::Unknown,
            },
            FetchError::Transport(_) => ViewErrorCategory::Transport,
            FetchError::Decode(_)
            | FetchError::InvalidUrl(_)
            | FetchError::InvalidUsername(_) => ViewErrorCategory::Validation,
        };

        let message = match err.api_error() {
            Some(api) => api.message.clone(),
            None => err.to_string(),
        };

        Self {
            category,
            context,
            message,
        }
    }

    /// Classifies a free-form failure such as one raised by a navigator.
    pub fn from_message(context: ViewErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("401")
            || message_lower.contains("403")
            || message_lower.contains("unauthorized")
            || message_lower.contains("forbidden")
        {
            ViewErrorCategory::Auth
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("unknown state")
        {
            ViewErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("connection")
            || message_lower.contains("unavailable")
        {
            ViewErrorCategory::Transport
        } else {
            ViewErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn requires_reauth(&self) -> bool {
        self.category == ViewErrorCategory::Auth
    }

    pub fn category(&self) -> ViewErrorCategory {
        self.category
    }

    pub fn context(&self) -> ViewErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
#[path = "tests/events_tests.rs"]
mod tests;
