use shared::error::ApiError;
use thiserror::Error;

/// Failure of a request against the admin endpoints.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("invalid username '{0}'")]
    InvalidUsername(String),
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with status {status}{}", api_suffix(.api))]
    Status { status: u16, api: Option<ApiError> },
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Status { api, .. } => api.as_ref(),
            _ => None,
        }
    }
}

fn api_suffix(api: &Option<ApiError>) -> String {
    match api {
        Some(api) => format!(" ({api})"),
        None => String::new(),
    }
}
