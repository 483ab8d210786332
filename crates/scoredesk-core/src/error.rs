//! Error types for service calls and console actions.
//!
//! Defined in `scoredesk-core` so the orchestration layer can classify
//! failures by variant instead of string matching: not-found is an empty
//! state, aggregation failures are absorbed, precondition failures never
//! reach the network.

use thiserror::Error;

/// Errors from the remote scoring service or the transport beneath it.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The requested resource does not exist (HTTP 404).
    #[error("{0} not found")]
    NotFound(String),

    /// The service returned an error response.
    #[error("service error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The service responded with a payload this client cannot decode.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ServiceError {
    /// Returns `true` for a not-found condition, which callers render as
    /// an empty state rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound(_))
    }
}

/// Errors from console actions (mutations and leaderboard requests).
///
/// The first four variants are client-side rejections raised before any
/// network call is made.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("attempt id must not be empty")]
    MissingAttemptId,

    #[error("flag reason must not be empty")]
    EmptyReason,

    #[error("no test selected")]
    NoTestSelected,

    /// Another mutation for the same attempt is still in flight.
    #[error("operation already in progress for attempt {0}")]
    InProgress(String),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl ActionError {
    /// Returns `true` if the action was rejected client-side, without a
    /// network call.
    pub fn is_precondition(&self) -> bool {
        !matches!(self, ActionError::Service(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(ServiceError::NotFound("attempt".into()).is_not_found());
        assert!(!ServiceError::Network("refused".into()).is_not_found());

        assert!(ActionError::EmptyReason.is_precondition());
        assert!(ActionError::InProgress("a1".into()).is_precondition());
        assert!(!ActionError::Service(ServiceError::Timeout(30)).is_precondition());
    }

    #[test]
    fn messages() {
        let err = ServiceError::Api {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "service error (HTTP 500): boom");
        assert_eq!(
            ActionError::InProgress("a1".into()).to_string(),
            "operation already in progress for attempt a1"
        );
    }
}
