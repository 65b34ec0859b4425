//! Error types for the client pipeline and the parsing facades.
//!
//! Every failure surfaces to the caller of [`Client::send`](crate::Client::send).
//! The only failure that is swallowed is a body read error inside the transport,
//! which is turned into an empty body.

use crate::listeners::Cancellation;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Socket error: {0}")]
    Socket(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Host could not be resolved: {0}")]
    HostUnresolved(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Cancelled(Box<Cancellation>),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Redirect limit of {0} hops exceeded")]
    RedirectLimit(usize),

    #[error("Retry limit of {0} resends exceeded")]
    RetryLimit(usize),

    #[error("Unknown transport error: {0}")]
    Unknown(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ClientError {
    /// Returns the cancellation details when a listener stopped the request.
    pub fn cancellation(&self) -> Option<&Cancellation> {
        match self {
            ClientError::Cancelled(c) => Some(&**c),
            _ => None,
        }
    }
}

impl From<Cancellation> for ClientError {
    fn from(cancellation: Cancellation) -> Self {
        ClientError::Cancelled(Box::new(cancellation))
    }
}

/// Failures of the HTML/JSON facades and the body builders.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Input is blank")]
    Blank,

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON {expected}, found {found}")]
    UnexpectedJson {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid CSS selector '{0}'")]
    Selector(String),
}
