use thiserror::Error;

/// Closed set of failure categories for a scoring request.
///
/// Every variant is terminal for the request that raised it; nothing is
/// retried. Callers treat any error as "no visual hint available".
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InferError {
    /// Malformed body or missing fields.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Fewer usable inter-key intervals than the scorer requires.
    #[error("not enough keystroke events: need {needed} intervals, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Unexpected fault while serving the request.
    #[error("internal error: {0}")]
    Internal(String),
}

impl InferError {
    /// True for errors the client can fix by sending a well-formed request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            InferError::Validation(_) | InferError::InsufficientData { .. }
        )
    }
}
