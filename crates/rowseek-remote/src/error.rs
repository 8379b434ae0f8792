//! Error types for remote persistence.

use rowseek::SeekError;
use thiserror::Error;

/// One request of the persistence protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// `POST /set-query`
    SetQuery,
    /// `GET /api`
    FetchRows,
    /// `POST /api`
    PostAction,
}

impl Step {
    /// Returns the request line of this step.
    pub fn as_str(self) -> &'static str {
        match self {
            Step::SetQuery => "POST /set-query",
            Step::FetchRows => "GET /api",
            Step::PostAction => "POST /api",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors from a remote filtering round trip.
///
/// Any of these aborts the remaining steps of the operation; the view is
/// not reloaded.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The query failed to compile or evaluate.
    #[error(transparent)]
    Query(#[from] SeekError),

    /// The HTTP client could not be built.
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request did not complete (connection, timeout, body read).
    #[error("{step} failed: {source}")]
    Transport {
        step: Step,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{step} returned HTTP {status}")]
    Status { step: Step, status: u16 },

    /// The response body was not the expected JSON.
    #[error("could not decode {step} response: {source}")]
    Decode {
        step: Step,
        #[source]
        source: serde_json::Error,
    },

    /// A store backend refused the request for its own reasons.
    #[error("{step} failed: {reason}")]
    Unavailable { step: Step, reason: String },
}

impl RemoteError {
    /// The protocol step that failed, if the failure was a transport one.
    pub fn step(&self) -> Option<Step> {
        match self {
            RemoteError::Transport { step, .. }
            | RemoteError::Status { step, .. }
            | RemoteError::Decode { step, .. }
            | RemoteError::Unavailable { step, .. } => Some(*step),
            RemoteError::Query(_) | RemoteError::Client(_) => None,
        }
    }
}

/// Result type for remote operations.
pub type Result<T> = std::result::Result<T, RemoteError>;
