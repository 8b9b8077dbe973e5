//! Provider-specific error types
//!
//! `ProviderError` carries the detail of a failed completion call and
//! converts into `scout_foundation::Error` at the crate boundary.

use crate::retry::{RetryClassification, RetryableError};
use scout_foundation::Error as FoundationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// API key missing, invalid or revoked
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded{}", .retry_after_ms.map(|ms| format!(", retry after {}ms", ms)).unwrap_or_default())]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Context length exceeded: {0}")]
    ContextLengthExceeded(String),

    #[error("Content filtered: {0}")]
    ContentFiltered(String),

    /// 5xx
    #[error("Server error: {0}")]
    ServerError(String),

    /// Connection, DNS, timeout
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl RetryableError for ProviderError {
    fn classify(&self) -> RetryClassification {
        match self {
            ProviderError::RateLimited { retry_after_ms } => RetryClassification::RateLimited {
                retry_after_ms: *retry_after_ms,
            },
            ProviderError::ServerError(_) | ProviderError::Network(_) => RetryClassification::Retry,
            _ => RetryClassification::NoRetry,
        }
    }
}

impl ProviderError {
    /// Map an HTTP status and body to an error
    pub fn from_http_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => ProviderError::Authentication(body.to_string()),
            429 => ProviderError::RateLimited {
                retry_after_ms: extract_retry_after(body),
            },
            400 if body.contains("context_length") || body.contains("maximum context") => {
                ProviderError::ContextLengthExceeded(body.to_string())
            }
            400 | 422 => ProviderError::InvalidRequest(body.to_string()),
            404 => ProviderError::ModelNotFound(body.to_string()),
            500..=599 => ProviderError::ServerError(body.to_string()),
            _ => ProviderError::Unknown(format!("HTTP {}: {}", status, body)),
        }
    }
}

/// Retry hint in the error body, in milliseconds.
///
/// Accepts `{"error": {"retry_after": 1.5}}` or prose such as
/// "Please try again in 20s".
fn extract_retry_after(body: &str) -> Option<u64> {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(secs) = json
            .get("error")
            .and_then(|e| e.get("retry_after"))
            .and_then(|v| v.as_f64())
        {
            return Some((secs * 1000.0) as u64);
        }
    }

    let lower = body.to_lowercase();
    let idx = lower.find("try again in").or_else(|| lower.find("retry"))?;
    let digits: String = lower[idx..]
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse::<f64>().ok().map(|secs| (secs * 1000.0) as u64)
}

// ============================================================================
// scout_foundation::Error conversion
// ============================================================================

impl From<ProviderError> for FoundationError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::RateLimited { .. } | ProviderError::QuotaExceeded(_) => {
                FoundationError::RateLimited(err.to_string())
            }
            ProviderError::Network(msg) => FoundationError::Http(msg),
            ProviderError::InvalidRequest(msg) => FoundationError::InvalidInput(msg),
            ProviderError::NotConfigured(msg) => FoundationError::Config(msg),
            ProviderError::InvalidResponse(_) | ProviderError::Unknown(_) => {
                FoundationError::Provider(err.to_string())
            }
            other => FoundationError::api("openai", other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_http_status() {
        assert!(matches!(
            ProviderError::from_http_status(401, "bad key"),
            ProviderError::Authentication(_)
        ));
        assert!(matches!(
            ProviderError::from_http_status(503, "overloaded"),
            ProviderError::ServerError(_)
        ));
        assert!(matches!(
            ProviderError::from_http_status(400, "This model's maximum context length is 200000"),
            ProviderError::ContextLengthExceeded(_)
        ));
        assert!(matches!(
            ProviderError::from_http_status(400, "unknown parameter"),
            ProviderError::InvalidRequest(_)
        ));
    }

    #[test]
    fn test_retry_after_extraction() {
        assert_eq!(
            ProviderError::from_http_status(429, r#"{"error": {"retry_after": 1.5}}"#),
            ProviderError::RateLimited {
                retry_after_ms: Some(1500)
            }
        );
        assert_eq!(
            ProviderError::from_http_status(429, "Rate limit reached. Please try again in 20s."),
            ProviderError::RateLimited {
                retry_after_ms: Some(20000)
            }
        );
        assert_eq!(
            ProviderError::from_http_status(429, "slow down"),
            ProviderError::RateLimited {
                retry_after_ms: None
            }
        );
    }

    #[test]
    fn test_classification() {
        assert_eq!(
            ProviderError::Network("reset".into()).classify(),
            RetryClassification::Retry
        );
        assert_eq!(
            ProviderError::Authentication("no".into()).classify(),
            RetryClassification::NoRetry
        );
    }

    #[test]
    fn test_foundation_conversion() {
        let err: FoundationError = ProviderError::Authentication("bad key".into()).into();
        assert!(err.to_string().contains("openai"));
        assert!(err.to_string().contains("bad key"));

        let err: FoundationError = ProviderError::RateLimited {
            retry_after_ms: None,
        }
        .into();
        assert!(err.is_retryable());
    }
}
