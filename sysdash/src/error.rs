//! Error types for backend calls and local preferences.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection refused, timeout, or an unreadable body.
    #[error("request to /{endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx reply to a telemetry fetch.
    #[error("/{endpoint} returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },

    /// Non-2xx reply to a user action; `message` is the server's error text.
    #[error("{message}")]
    Rejected {
        endpoint: &'static str,
        status: u16,
        message: String,
    },

    #[error("invalid backend url: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    pub fn endpoint(&self) -> Option<&'static str> {
        match self {
            ClientError::Transport { endpoint, .. }
            | ClientError::Status { endpoint, .. }
            | ClientError::Rejected { endpoint, .. } => Some(endpoint),
            ClientError::Url(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("preferences io: {0}")]
    Io(#[from] std::io::Error),
    #[error("preferences encoding: {0}")]
    Json(#[from] serde_json::Error),
}
