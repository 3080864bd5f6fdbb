use serde::{Deserialize, Serialize};

use crate::domain::UserSummary;

/// Query string accepted by `GET admin/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListUsersQuery {
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_column: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asc: Option<bool>,
}

impl ListUsersQuery {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit,
            offset: None,
            sort_column: None,
            asc: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserList {
    #[serde(default)]
    pub total: Option<u64>,
    pub users: Vec<UserSummary>,
}

/// Payload of `GET admin/{username}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetail {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
}
