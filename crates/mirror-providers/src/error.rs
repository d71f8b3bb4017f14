//! Provider error types.
//!
//! The error enum is defined in `mirror-core` so that summary fallback can
//! inspect it; this module maps HTTP failures onto it.

pub use mirror_core::error::ProviderError;

/// Map a transport failure from reqwest.
pub(crate) fn from_reqwest(e: reqwest::Error, timeout_secs: u64) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout(timeout_secs)
    } else {
        ProviderError::NetworkError(e.to_string())
    }
}

/// Map a non-success HTTP status. `message` is the best error text that
/// could be extracted from the response body.
pub(crate) fn from_status(
    status: u16,
    retry_after: Option<u64>,
    model: &str,
    message: String,
) -> ProviderError {
    match status {
        429 => ProviderError::RateLimited {
            retry_after_ms: retry_after.unwrap_or(5) * 1000,
        },
        401 | 403 => ProviderError::AuthenticationFailed(message),
        404 => ProviderError::ModelNotFound(model.to_string()),
        _ => ProviderError::ApiError { status, message },
    }
}
