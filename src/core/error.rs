use thiserror::Error;

/// Errors surfaced by the fiscal document lifecycle engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A precondition on the caller's data failed — not retried
    /// automatically, the input must be corrected first.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The gateway refused our credentials. Configuration problem,
    /// distinct from a business rejection.
    #[error("gateway authentication failed: {0}")]
    Authentication(String),

    /// The tax authority refused the document. Carries the authority's
    /// message verbatim; the document becomes `rejected` and may be
    /// resubmitted after correction.
    #[error("authority rejected document: {0}")]
    GatewayRejection(String),

    /// Network failure, timeout, or a malformed gateway response.
    #[error("gateway transport error: {0}")]
    Transport(String),

    /// An operation was attempted from a status that forbids it.
    #[error("state conflict: {0}")]
    StateConflict(String),
}

impl Error {
    /// Human-readable message for the entry-point response envelope.
    pub fn message(&self) -> String {
        self.to_string()
    }
}
