use thiserror::Error;

#[derive(Error, Debug)]
pub enum StarError {
    /// The global minimum interval since the last successful completion has not elapsed.
    #[error("Requests too frequent, retry in {retry_after_ms} ms")]
    RateLimitExceeded { retry_after_ms: i64 },

    #[error("Completion service returned no reply text")]
    EmptyResponse,

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("Completion API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StarError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse(reason.into())
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimitExceeded { .. })
    }

    /// Failures raised by the completion client itself rather than by the gateway.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::Http(_) | Self::Json(_))
    }
}

pub type Result<T> = std::result::Result<T, StarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_display_mentions_retry() {
        let err = StarError::RateLimitExceeded { retry_after_ms: 4000 };
        assert!(err.to_string().contains("4000"));
        assert!(err.is_rate_limited());
        assert!(!err.is_transport());
    }

    #[test]
    fn test_api_error_is_transport() {
        let err = StarError::Api {
            status: 401,
            body: "invalid api key".into(),
        };
        assert!(err.is_transport());
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("invalid api key"));
    }

    #[test]
    fn test_empty_and_malformed_are_not_transport() {
        assert!(!StarError::EmptyResponse.is_transport());
        assert!(!StarError::malformed("no choices").is_transport());
    }
}
