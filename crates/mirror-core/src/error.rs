//! Error types for the archetype mirror.
//!
//! `ProviderError` lives here rather than in `mirror-providers` so that the
//! summary fallback logic can classify failures without string matching.

use thiserror::Error;

/// Errors that can occur when interacting with a summary provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The provider answered but produced no text.
    #[error("empty response from {0}")]
    EmptyResponse(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Returns `true` if the failure is caused by configuration rather than
    /// by the remote service.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ProviderError::AuthenticationFailed(_) | ProviderError::ModelNotFound(_)
        )
    }
}

/// Errors raised while walking through a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("the quiz has no questions")]
    NoQuestions,

    #[error("option '{option_id}' does not belong to question '{question_id}'")]
    UnknownOption {
        question_id: String,
        option_id: String,
    },

    #[error("the quiz is already complete")]
    AlreadyComplete,

    #[error("expected {expected} answers, got {actual}")]
    AnswerCountMismatch { expected: usize, actual: usize },
}

/// A screen change that the navigation table does not allow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("cannot {action} from the {from} screen")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
}

/// An archetype id that could not be resolved against the reference data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("unknown archetype: {0}")]
    UnknownArchetype(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_are_classified() {
        assert!(ProviderError::AuthenticationFailed("bad key".into()).is_configuration());
        assert!(ProviderError::ModelNotFound("gemini-x".into()).is_configuration());
        assert!(!ProviderError::Timeout(120).is_configuration());
        assert!(!ProviderError::RateLimited {
            retry_after_ms: 5000
        }
        .is_configuration());
    }

    #[test]
    fn error_messages_name_the_offending_ids() {
        let err = QuizError::UnknownOption {
            question_id: "q1".into(),
            option_id: "q9z".into(),
        };
        assert_eq!(
            err.to_string(),
            "option 'q9z' does not belong to question 'q1'"
        );
        assert_eq!(
            ResolveError::UnknownArchetype("ghost".into()).to_string(),
            "unknown archetype: ghost"
        );
    }
}
