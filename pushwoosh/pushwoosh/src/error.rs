use thiserror::Error;

use crate::TransportError;

/// Pushwoosh error.
#[derive(Error, Debug)]
pub enum PushwooshError {
    /// Application code or API access token is empty.
    #[error("Application ID and Authentication Token from Pushwoosh must be provided")]
    Credentials,
    /// API host is not an absolute URL.
    #[error("invalid host: {0}")]
    Host(#[from] url::ParseError),
    /// Message content is empty.
    #[error("Message has to be provided")]
    MissingMessage,
    /// Message code is empty.
    #[error("Message code must be provided")]
    MissingMessageCode,
    /// Error from [`crate::Transport`], passed through as is.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Error from [`serde_json`] crate.
    #[error("deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
    /// Pushwoosh answered with HTTP 5xx.
    #[error("Internal Error")]
    Internal,
    /// Pushwoosh answered with HTTP 4xx.
    #[error("Malformed Error")]
    Malformed,
    /// Pushwoosh answered with any other HTTP status.
    #[error("Unknown response code / error")]
    Unknown,
}

impl PushwooshError {
    /// Whether Pushwoosh failed with HTTP 5xx.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }

    /// Whether Pushwoosh rejected the request with HTTP 4xx.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed)
    }
}
