//! Client error model.

use stockledger_core::DomainError;
use thiserror::Error;

/// Shown when a failure carries no server-provided message.
pub const FALLBACK_MESSAGE: &str = "Something went wrong";

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected before any request was sent.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("network error: {0}")]
    Network(String),

    /// Non-success status; `message` is the body's `message` field, if any.
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or(FALLBACK_MESSAGE))]
    Api { status: u16, message: Option<String> },

    #[error("decode error: {0}")]
    Decode(String),
}

impl ClientError {
    /// True for failures raised client-side, with no request issued.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Domain(_))
    }

    /// Text for the user-visible notification.
    ///
    /// Validation failures explain themselves; server failures use the
    /// server's message when it sent one.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Domain(e) => e.to_string(),
            ClientError::Api {
                message: Some(message),
                ..
            } => message.clone(),
            _ => FALLBACK_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}
