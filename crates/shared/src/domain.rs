use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

/// A user row as returned by the admin listing.
///
/// Only `username` is required; everything else the backend sends is kept
/// either in the typed optional fields or in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Creation timestamp in epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_date: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserSummary {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            id: None,
            email: None,
            create_date: None,
            extra: Map::new(),
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.create_date.and_then(DateTime::from_timestamp_millis)
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
