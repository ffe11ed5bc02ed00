//! Error classification for the photo repository.

use thiserror::Error;

/// Errors that can occur while fetching photos from the remote API.
///
/// The controller collapses every variant into the single `Error` UI state;
/// the distinction here exists for logging and for direct callers of the
/// repository.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Failed to reach the server (DNS, connect, timeout, TLS).
    #[error("transport error: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status code.
    #[error("server returned status {status}")]
    Status { status: u16 },

    /// The response body could not be decoded as a photo list.
    #[error("failed to decode response: {source}")]
    Decode {
        #[source]
        source: reqwest::Error,
    },
}

impl NetworkError {
    /// Short classification tag used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            NetworkError::Transport { .. } => "transport",
            NetworkError::Status { .. } => "status",
            NetworkError::Decode { .. } => "decode",
        }
    }
}
