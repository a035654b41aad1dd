//! Error types for repohub
//!
//! The gateway boundary returns a typed [`ApiError`] so the rest of the
//! application never has to know the provider's JSON error shape.

use thiserror::Error;

/// Error produced by the GitHub search gateway.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("GitHub API returned status {status}")]
    Status { status: u16, message: Option<String> },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("failed to decode search response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The message text the provider supplied with an error response, if any.
    ///
    /// Only non-2xx responses can carry one; transport and decode failures
    /// never do.
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Main error type for repohub operations
#[derive(Error, Debug)]
pub enum RepoHubError {
    #[error("search request failed: {0}")]
    Api(#[from] ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for repohub operations
pub type Result<T> = std::result::Result<T, RepoHubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_message_only_from_status_errors() {
        let with_message = ApiError::Status {
            status: 403,
            message: Some("API rate limit exceeded".to_string()),
        };
        assert_eq!(
            with_message.provider_message(),
            Some("API rate limit exceeded")
        );

        let without_message = ApiError::Status {
            status: 502,
            message: None,
        };
        assert_eq!(without_message.provider_message(), None);

        let decode = ApiError::Decode("unexpected end of input".to_string());
        assert_eq!(decode.provider_message(), None);
    }
}
