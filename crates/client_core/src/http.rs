//! reqwest-backed access to the admin user endpoints.

use async_trait::async_trait;
use reqwest::{header::COOKIE, Client};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    error::ApiError,
    protocol::{ListUsersQuery, UserDetail, UserList},
};
use tracing::debug;
use url::Url;

use crate::{error::FetchError, UserDirectory};

const LIST_USERS_PATH: &str = "admin/list";
const AUTH_COOKIE: &str = "auth_token";

pub struct HttpUserDirectory {
    http: Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl HttpUserDirectory {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Ok(Self {
            http: Client::new(),
            base_url: normalize_base_url(base_url)?,
            auth_token: None,
        })
    }

    pub fn with_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn with_auth_token(mut self, auth_token: Option<String>) -> Self {
        self.auth_token = auth_token.filter(|token| !token.trim().is_empty());
        self
    }

    fn user_url(&self, username: &str) -> Result<Url, FetchError> {
        if !is_valid_username(username) {
            return Err(FetchError::InvalidUsername(username.to_string()));
        }
        let mut url = self.base_url.join("admin/")?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(username);
        Ok(url)
    }

    async fn get_json<T, Q>(&self, url: Url, query: Option<&Q>) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        debug!(url = %url, "GET");
        let mut request = self.http.get(url);
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(token) = &self.auth_token {
            request = request.header(COOKIE, format!("{AUTH_COOKIE}={token}"));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                api: serde_json::from_slice::<ApiError>(&body).ok(),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn list_users(&self, query: &ListUsersQuery) -> Result<UserList, FetchError> {
        let url = self.base_url.join(LIST_USERS_PATH)?;
        self.get_json(url, Some(query)).await
    }

    async fn user_detail(&self, username: &str) -> Result<UserDetail, FetchError> {
        let url = self.user_url(username)?;
        self.get_json::<_, ()>(url, None).await
    }
}

/// Parses `raw`, drops any query or fragment and guarantees a trailing
/// slash so relative joins append to the base path instead of replacing
/// its last segment.
pub fn normalize_base_url(raw: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
    }
    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Usernames the admin endpoints route: `[a-zA-Z0-9_]+`.
fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
#[path = "tests/http_tests.rs"]
mod tests;
