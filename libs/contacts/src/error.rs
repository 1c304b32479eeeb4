use std::borrow::Cow;

use thiserror::Error;

use crate::status::status_message;

/// Every way a contact creation can fail. `Display` yields the exact message surfaced to callers.
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Brevo API key is not configured. Set VITE_BREVO_API_KEY environment variable.")]
    MissingApiKey,
    #[error("Brevo API key cannot be empty")]
    EmptyApiKey,
    #[error("Email is required and must be a non-empty string")]
    MissingEmail,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Request timeout")]
    Timeout(#[source] reqwest::Error),
    #[error("Network error")]
    Network(#[source] reqwest::Error),
    #[error("{message}")]
    Api {
        status: u16,
        message: Cow<'static, str>,
    },
    #[error("Invalid API response format")]
    InvalidResponse(#[source] serde_json::Error),
    #[error("Unexpected error occurred")]
    Unexpected(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Validation,
    Transport,
    Protocol,
    Parsing,
    Unexpected,
}

impl ContactError {
    pub fn api(status: u16) -> Self {
        Self::Api {
            status,
            message: status_message(status),
        }
    }

    /// Classifies a `reqwest` failure. Deadline expiry wins over the other flags since a
    /// timed-out request also reports itself as a request error.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else if err.is_builder() {
            Self::Unexpected(Box::new(err))
        } else if err.is_connect() || err.is_request() || err.is_body() {
            Self::Network(err)
        } else {
            Self::Unexpected(Box::new(err))
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingApiKey | Self::EmptyApiKey => ErrorKind::Configuration,
            Self::MissingEmail | Self::InvalidEmail => ErrorKind::Validation,
            Self::Timeout(_) | Self::Network(_) => ErrorKind::Transport,
            Self::Api { .. } => ErrorKind::Protocol,
            Self::InvalidResponse(_) => ErrorKind::Parsing,
            Self::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    /// Local configuration and validation failures are expected and stay out of the logs.
    pub fn is_reportable(&self) -> bool {
        !matches!(
            self.kind(),
            ErrorKind::Configuration | ErrorKind::Validation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_carry_table_message() {
        let err = ContactError::api(429);
        assert_eq!(err.to_string(), "Rate limit exceeded");
        assert_eq!(err.kind(), ErrorKind::Protocol);
        assert!(err.is_reportable());
    }

    #[test]
    fn local_failures_are_not_reportable() {
        for err in [
            ContactError::MissingApiKey,
            ContactError::EmptyApiKey,
            ContactError::MissingEmail,
            ContactError::InvalidEmail,
        ] {
            assert!(!err.is_reportable(), "{err} should not be reported");
        }
    }

    #[test]
    fn parse_failures_keep_their_source() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = ContactError::InvalidResponse(source);
        assert_eq!(err.to_string(), "Invalid API response format");
        assert!(std::error::Error::source(&err).is_some());
    }
}
