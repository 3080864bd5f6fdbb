use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use shared::{
    domain::UserSummary,
    protocol::{ListUsersQuery, UserDetail, UserList},
};

pub mod controller;
pub mod error;
pub mod events;
pub mod http;
pub mod navigation;

pub use controller::{UserListController, ViewState};
pub use error::FetchError;
pub use events::{ViewError, ViewErrorCategory, ViewErrorContext, ViewEvent};
pub use http::HttpUserDirectory;
pub use navigation::{RecordingNavigator, Transition};

/// Page size the user list always requests.
pub const USER_PAGE_LIMIT: u32 = 100;
/// Route state that opens the user editor.
pub const USER_EDIT_STATE: &str = "settings.user.edit";
pub const ROUTE_PARAM_USERNAME: &str = "username";

pub type RouteParams = BTreeMap<String, String>;

/// Remote source of user records.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list_users(&self, query: &ListUsersQuery) -> Result<UserList, FetchError>;
    async fn user_detail(&self, username: &str) -> Result<UserDetail, FetchError>;
}

/// Routing capability the view layer provides.
pub trait Navigator: Send + Sync {
    fn transition_to(&self, state: &str, params: RouteParams) -> Result<()>;
}

/// Route parameters for opening the editor on `user`.
///
/// The username is forwarded as-is, including when it is empty.
pub fn edit_route_params(user: &UserSummary) -> RouteParams {
    let mut params = RouteParams::new();
    params.insert(ROUTE_PARAM_USERNAME.to_string(), user.username.clone());
    params
}
