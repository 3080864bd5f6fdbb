use std::collections::VecDeque;

use anyhow::anyhow;
use async_trait::async_trait;
use shared::protocol::{UserDetail, UserList};
use tokio::sync::Mutex;

use super::*;
use crate::{RecordingNavigator, RouteParams, ViewErrorCategory, ROUTE_PARAM_USERNAME};

struct ScriptedDirectory {
    responses: Mutex<VecDeque<Result<UserList, FetchError>>>,
    queries: Arc<Mutex<Vec<ListUsersQuery>>>,
}

impl ScriptedDirectory {
    fn new(responses: Vec<Result<UserList, FetchError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl UserDirectory for ScriptedDirectory {
    async fn list_users(&self, query: &ListUsersQuery) -> Result<UserList, FetchError> {
        self.queries.lock().await.push(query.clone());
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(UserList::default()))
    }

    async fn user_detail(&self, username: &str) -> Result<UserDetail, FetchError> {
        Ok(UserDetail {
            username: username.to_string(),
            email: None,
            theme: None,
            locale: None,
        })
    }
}

struct FailingNavigator;

impl Navigator for FailingNavigator {
    fn transition_to(&self, state: &str, _params: RouteParams) -> anyhow::Result<()> {
        Err(anyhow!("unknown state '{state}'"))
    }
}

fn listing(usernames: &[&str]) -> UserList {
    UserList {
        total: Some(usernames.len() as u64),
        users: usernames.iter().map(|name| UserSummary::new(*name)).collect(),
    }
}

fn unavailable() -> FetchError {
    FetchError::Status {
        status: 503,
        api: None,
    }
}

fn usernames(controller: &UserListController) -> Vec<&str> {
    controller
        .users()
        .iter()
        .map(|user| user.username.as_str())
        .collect()
}

#[tokio::test]
async fn init_loads_users_once_in_server_order() {
    let directory = Arc::new(ScriptedDirectory::new(vec![Ok(listing(&["a", "b"]))]));
    let queries = directory.queries.clone();

    let controller =
        UserListController::init(directory, Arc::new(RecordingNavigator::new())).await;

    assert_eq!(usernames(&controller), vec!["a", "b"]);
    assert_eq!(controller.total(), Some(2));
    assert!(controller.last_error().is_none());
    assert_eq!(queries.lock().await.len(), 1);
}

#[tokio::test]
async fn every_load_requests_the_fixed_page_size() {
    let directory = Arc::new(ScriptedDirectory::new(vec![
        Ok(listing(&["a"])),
        Ok(listing(&["a", "b", "c"])),
    ]));
    let queries = directory.queries.clone();

    let mut controller =
        UserListController::init(directory, Arc::new(RecordingNavigator::new())).await;
    controller.load_users().await.expect("second load");

    let queries = queries.lock().await;
    assert_eq!(queries.len(), 2);
    for query in queries.iter() {
        assert_eq!(query, &ListUsersQuery::with_limit(100));
    }
    assert_eq!(usernames(&controller), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn empty_listing_stays_empty_on_reload() {
    let directory = Arc::new(ScriptedDirectory::new(vec![
        Ok(listing(&[])),
        Ok(listing(&[])),
    ]));

    let mut controller =
        UserListController::init(directory, Arc::new(RecordingNavigator::new())).await;
    assert!(controller.users().is_empty());

    controller.load_users().await.expect("reload");
    assert!(controller.users().is_empty());
}

#[tokio::test]
async fn failed_load_keeps_previous_users_and_records_error() {
    let directory = Arc::new(ScriptedDirectory::new(vec![
        Ok(listing(&["a", "b"])),
        Err(unavailable()),
        Ok(listing(&["c"])),
    ]));

    let mut controller =
        UserListController::init(directory, Arc::new(RecordingNavigator::new())).await;

    let err = controller.load_users().await.expect_err("scripted failure");
    assert_eq!(err.status(), Some(503));
    assert_eq!(usernames(&controller), vec!["a", "b"]);
    let recorded = controller.last_error().expect("error recorded");
    assert_eq!(recorded.category(), ViewErrorCategory::Server);
    assert_eq!(recorded.context(), ViewErrorContext::LoadUsers);

    controller.load_users().await.expect("recovered");
    assert_eq!(usernames(&controller), vec!["c"]);
    assert!(controller.last_error().is_none());
}

#[tokio::test]
async fn failed_initial_load_still_constructs_controller() {
    let directory = Arc::new(ScriptedDirectory::new(vec![Err(FetchError::Status {
        status: 403,
        api: None,
    })]));

    let controller =
        UserListController::init(directory, Arc::new(RecordingNavigator::new())).await;

    assert!(controller.users().is_empty());
    assert!(controller
        .last_error()
        .map(ViewError::requires_reauth)
        .unwrap_or(false));
}

#[tokio::test]
async fn edit_user_requests_one_transition_without_touching_users() {
    let directory = Arc::new(ScriptedDirectory::new(vec![Ok(listing(&["alice", "bob"]))]));
    let navigator = Arc::new(RecordingNavigator::new());

    let controller = UserListController::init(directory, navigator.clone()).await;
    let before = controller.users().to_vec();

    controller
        .edit_user(&UserSummary::new("bob"))
        .expect("navigation");

    let transitions = navigator.transitions();
    assert_eq!(transitions.len(), 1);
    assert_eq!(transitions[0].state, "settings.user.edit");
    assert_eq!(
        transitions[0].params.get(ROUTE_PARAM_USERNAME).map(String::as_str),
        Some("bob")
    );
    assert_eq!(transitions[0].params.len(), 1);
    assert_eq!(controller.users(), before.as_slice());
}

#[tokio::test]
async fn edit_user_passes_empty_username_through() {
    let navigator = Arc::new(RecordingNavigator::new());
    let controller = UserListController::init(
        Arc::new(ScriptedDirectory::new(Vec::new())),
        navigator.clone(),
    )
    .await;

    controller
        .edit_user(&UserSummary::new(""))
        .expect("no validation on username");

    let transitions = navigator.take_transitions();
    assert_eq!(
        transitions[0].params.get(ROUTE_PARAM_USERNAME).map(String::as_str),
        Some("")
    );
    assert!(navigator.transitions().is_empty());
}

#[tokio::test]
async fn navigation_failure_is_returned_and_published() {
    let (events, mut rx) = broadcast::channel(8);
    let controller = UserListController::init_with_events(
        Arc::new(ScriptedDirectory::new(vec![Ok(listing(&["bob"]))])),
        Arc::new(FailingNavigator),
        events,
    )
    .await;

    let err = controller
        .edit_user(&UserSummary::new("bob"))
        .expect_err("navigator rejects transition");
    assert!(err.to_string().contains("bob"));

    match rx.recv().await.expect("load event") {
        ViewEvent::UsersLoaded { count, total } => {
            assert_eq!(count, 1);
            assert_eq!(total, Some(1));
        }
        other => panic!("unexpected event: {other:?}"),
    }
    match rx.recv().await.expect("navigation event") {
        ViewEvent::NavigationFailed(view_error) => {
            assert_eq!(view_error.context(), ViewErrorContext::EditUser);
            assert_eq!(view_error.category(), ViewErrorCategory::Validation);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn subscribers_see_load_failures_and_navigation() {
    let directory = Arc::new(ScriptedDirectory::new(vec![
        Ok(listing(&["a"])),
        Err(unavailable()),
    ]));
    let mut controller =
        UserListController::init(directory, Arc::new(RecordingNavigator::new())).await;
    let mut rx = controller.subscribe_events();

    let _ = controller.load_users().await;
    controller.edit_user(&UserSummary::new("a")).expect("edit");

    assert!(matches!(
        rx.recv().await.expect("failure event"),
        ViewEvent::LoadFailed(_)
    ));
    match rx.recv().await.expect("navigation event") {
        ViewEvent::Navigated { state, params } => {
            assert_eq!(state, USER_EDIT_STATE);
            assert_eq!(params.get(ROUTE_PARAM_USERNAME).map(String::as_str), Some("a"));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}
