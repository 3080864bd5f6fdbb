use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Forbidden,
    NotFound,
    Validation,
    Internal,
    Other,
}

/// Error body the backend attaches to non-success responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind.as_str() {
            "ForbiddenError" => ErrorCode::Forbidden,
            "UserNotFound" => ErrorCode::NotFound,
            "ValidationError" => ErrorCode::Validation,
            "UnknownError" | "ServerError" => ErrorCode::Internal,
            _ => ErrorCode::Other,
        }
    }
}
