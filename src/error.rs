use thiserror::Error;

/// Errors surfaced by the REST boundary.
///
/// Navigation denials (missing auth, wrong role, missing permission) are not
/// errors: the evaluator answers them with redirects. What remains here is
/// the transport taxonomy: network failures and non-2xx responses propagate
/// to the caller as-is (no retry), while a 401 is special-cased as
/// `SessionExpired` because it triggers the global session teardown.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("session expired")]
    SessionExpired,

    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid base url: {0}")]
    BaseUrl(#[from] url::ParseError),
}

impl ClientError {
    /// True when the error is the global 401 teardown signal.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ClientError::SessionExpired)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::SessionExpired => Some(401),
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
