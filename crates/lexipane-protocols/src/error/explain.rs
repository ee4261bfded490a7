//! Explanation pipeline errors.
//!
//! Every failure kind is tagged at the point of detection (HTTP status
//! inspection, timer expiry, parse failure), never inferred later from
//! message text.

use thiserror::Error;

use crate::session::AttemptOutcome;

#[derive(Debug, Clone, Error)]
pub enum ExplainError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limited or out of balance: {0}")]
    RateLimited(String),

    #[error("API error: {status} - {message}")]
    Http { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Could not load settings: {0}")]
    SettingsUnavailable(String),

    #[error("A previous request is still being processed")]
    ConcurrentRequest,

    #[error("Provider unavailable: all endpoints exhausted")]
    ProviderUnavailable,
}

impl ExplainError {
    /// Classify a non-2xx HTTP status at the point of detection.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => ExplainError::Auth(message),
            429 => ExplainError::RateLimited(message),
            _ => ExplainError::Http { status, message },
        }
    }

    /// Whether the orchestrator may still recover by advancing to the next
    /// endpoint. Auth and rate-limit failures are terminal on the last
    /// endpoint but recoverable while further endpoints remain, which is
    /// the caller's call; everything here answers the per-attempt question.
    pub fn advances_fallback(&self) -> bool {
        matches!(
            self,
            ExplainError::Network(_)
                | ExplainError::Timeout(_)
                | ExplainError::Http { .. }
                | ExplainError::MalformedResponse(_)
        )
    }

    /// The attempt-log outcome for this failure.
    pub fn attempt_outcome(&self) -> AttemptOutcome {
        match self {
            ExplainError::Network(_) => AttemptOutcome::NetworkError,
            ExplainError::Timeout(_) => AttemptOutcome::Timeout,
            ExplainError::Auth(_) => AttemptOutcome::HttpError(401),
            ExplainError::RateLimited(_) => AttemptOutcome::HttpError(429),
            ExplainError::Http { status, .. } => AttemptOutcome::HttpError(*status),
            ExplainError::MalformedResponse(_) => AttemptOutcome::MalformedResponse,
            // Non-attempt errors have no endpoint try to record; network
            // outcome is the closest classification if one ever lands here.
            ExplainError::SettingsUnavailable(_)
            | ExplainError::ConcurrentRequest
            | ExplainError::ProviderUnavailable => AttemptOutcome::NetworkError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classifies_auth() {
        let err = ExplainError::from_status(401, "invalid key".to_string());
        assert!(matches!(err, ExplainError::Auth(_)));
        assert!(err.to_string().contains("Authentication failed"));
    }

    #[test]
    fn test_from_status_classifies_rate_limit() {
        let err = ExplainError::from_status(429, "quota exceeded".to_string());
        assert!(matches!(err, ExplainError::RateLimited(_)));
    }

    #[test]
    fn test_from_status_other() {
        let err = ExplainError::from_status(503, "unavailable".to_string());
        match err {
            ExplainError::Http { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "unavailable");
            }
            _ => panic!("expected Http"),
        }
    }

    #[test]
    fn test_advances_fallback() {
        assert!(ExplainError::Network("x".to_string()).advances_fallback());
        assert!(ExplainError::Timeout(30).advances_fallback());
        assert!(ExplainError::MalformedResponse("x".to_string()).advances_fallback());
        assert!(
            ExplainError::Http { status: 500, message: String::new() }.advances_fallback()
        );
        assert!(!ExplainError::Auth("x".to_string()).advances_fallback());
        assert!(!ExplainError::RateLimited("x".to_string()).advances_fallback());
    }

    #[test]
    fn test_attempt_outcome_mapping() {
        assert_eq!(
            ExplainError::Timeout(30).attempt_outcome(),
            AttemptOutcome::Timeout
        );
        assert_eq!(
            ExplainError::Auth("x".to_string()).attempt_outcome(),
            AttemptOutcome::HttpError(401)
        );
        assert_eq!(
            ExplainError::MalformedResponse("x".to_string()).attempt_outcome(),
            AttemptOutcome::MalformedResponse
        );
    }

    #[test]
    fn test_display_messages() {
        assert!(ExplainError::ConcurrentRequest.to_string().contains("previous request"));
        assert!(ExplainError::ProviderUnavailable.to_string().contains("exhausted"));
    }
}
