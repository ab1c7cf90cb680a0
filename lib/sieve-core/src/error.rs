//! Error types for sieve.

use derive_more::{Display, Error};

use crate::ErrorMap;

/// Main error type for sieve operations.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// Structured API error, raised when a response carries at least one error.
    #[display("API error {}: {errors}", display_status(*status))]
    Api {
        /// HTTP status code, `None` when the response status was unknown.
        status: Option<u16>,
        /// Normalized error messages.
        errors: ErrorMap,
    },

    /// A rule key that is neither a status code, a status class nor `unknown`.
    #[display("invalid rule key: {_0:?}")]
    InvalidRuleKey(#[error(not(source))] String),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    JsonDeserialization {
        /// JSON path to the error (e.g., "email[1]").
        path: String,
        /// Error message.
        message: String,
    },
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

fn display_status(status: Option<u16>) -> String {
    status.map_or_else(|| "(unknown status)".to_string(), |code| code.to_string())
}

impl Error {
    /// Create an API error from a status and its normalized errors.
    #[must_use]
    pub fn api(status: Option<u16>, errors: ErrorMap) -> Self {
        Self::Api { status, errors }
    }

    /// Create an invalid rule key error.
    #[must_use]
    pub fn invalid_rule_key(key: impl Into<String>) -> Self {
        Self::InvalidRuleKey(key.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns the HTTP status code if this is an API error with a known status.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns the normalized errors if this is an API error.
    #[must_use]
    pub const fn errors(&self) -> Option<&ErrorMap> {
        match self {
            Self::Api { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// Consume into the normalized errors if this is an API error.
    #[must_use]
    pub fn into_errors(self) -> Option<ErrorMap> {
        match self {
            Self::Api { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// Returns `true` if this is an API error.
    #[must_use]
    pub const fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Returns `true` if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Returns `true` if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| (500..600).contains(&s))
    }
}
