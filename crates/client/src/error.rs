use reqwest::StatusCode;

/// Message shown for any transport failure.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-2xx status. `message` is the body's
    /// `error` field, or `"Request failed"` when there is none.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Http(#[from] reqwest::Error),

    #[error("Token storage failed: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Not logged in")]
    NotAuthenticated,

    /// Rejected locally before any request was sent.
    #[error("{0}")]
    Invalid(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// A stale or revoked token.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}
