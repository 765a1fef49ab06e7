use thiserror::Error;

/// Failure of a single admin API call.
///
/// `Status`, `MissingField` and `NotFound` are recoverable: the request went
/// through and the caller may skip the item and carry on. `Transport` and
/// `Decode` mean the client cannot talk to the store at all.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("{method} {endpoint} returned {status}: {body}")]
    Status {
        method: String,
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("response from {endpoint} has no `{field}`")]
    MissingField { endpoint: String, field: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AdminError {
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AdminError::Status { .. } | AdminError::MissingField { .. } | AdminError::NotFound(_)
        )
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            AdminError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type AdminResult<T> = Result<T, AdminError>;
