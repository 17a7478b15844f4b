//! API error types

use std::time::Duration;

/// Errors that can occur during API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-success HTTP response from the API.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body, or the status reason when the body is empty.
        message: String,
        /// The `error` field of a JSON error body, if the server sent one.
        server_message: Option<String>,
    },

    /// Network error during API call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse API response.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            server_message: None,
        }
    }

    /// Creates a new HTTP error carrying the server's own error text.
    pub fn rejected(status: u16, message: impl Into<String>, server_message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            server_message: Some(server_message.into()),
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the server-provided error message if available.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http { server_message, .. } => server_message.as_deref(),
            _ => None,
        }
    }

    /// Returns `true` if no response was obtained from the server.
    ///
    /// The request may or may not have reached the server.
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::Http { .. })
    }
}
