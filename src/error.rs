//! Error types for the Raide client.
//!
//! This module defines `RaideError`, the unified error type returned by every
//! client operation. The API failure variants keep the exact messages the
//! Raide service clients have always reported, so callers matching on the
//! display text keep working, while the variants themselves let callers
//! branch on the kind of failure.
//!
//! # Security
//!
//! The API secret travels in a request header on every call. Use
//! `sanitized_display()` before putting an error message anywhere a user or
//! log aggregator can read it.

use thiserror::Error;

/// Human-readable messages reported for API failures.
pub mod messages {
    /// HTTP 401 from the service.
    pub const UNAUTHORIZED: &str = "You are Unauthorized.";
    /// HTTP 403 from the service.
    pub const FORBIDDEN: &str = "You are Forbidden.";
    /// Any other failure that carries no service-provided description.
    pub const UNKNOWN: &str = "An error has occurred.";
}

/// Unified error type for all Raide operations.
#[derive(Error, Debug)]
pub enum RaideError {
    /// Configuration error - missing or invalid environment variables.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Input rejected before any request was sent.
    #[error("validation error: {0}")]
    Validation(String),

    /// The service answered HTTP 401.
    #[error("You are Unauthorized.")]
    Unauthorized,

    /// The service answered HTTP 403.
    #[error("You are Forbidden.")]
    Forbidden,

    /// The service answered HTTP 200 with a non-zero `error` in the envelope.
    #[error("{message}")]
    Service {
        /// The envelope's `error` code.
        code: i64,
        /// The envelope's `errorDescription`, verbatim.
        message: String,
    },

    /// Any other status, or a 200 whose body is not a usable envelope.
    #[error("An error has occurred.")]
    Unknown {
        /// The HTTP status the service answered with.
        status: u16,
    },

    /// The request never produced an HTTP response.
    #[error("An error has occurred.")]
    Transport(#[source] reqwest::Error),

    /// Connection test failed.
    #[error("connection test failed: {message}")]
    ConnectionTest {
        /// Details about why the connection test failed.
        message: String,
    },
}

impl RaideError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        RaideError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        RaideError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        RaideError::Validation(message.into())
    }

    /// Creates a service error from an envelope's code and description.
    pub fn service(code: i64, message: impl Into<String>) -> Self {
        RaideError::Service {
            code,
            message: message.into(),
        }
    }

    /// Creates a connection test error.
    pub fn connection_test(message: impl Into<String>) -> Self {
        RaideError::ConnectionTest {
            message: message.into(),
        }
    }

    /// Returns true if the service was reached and reported a failure.
    ///
    /// These are the outcomes classified from a response: 401, 403, an
    /// envelope error, or any other status.
    #[must_use]
    pub fn is_api_failure(&self) -> bool {
        matches!(
            self,
            RaideError::Unauthorized
                | RaideError::Forbidden
                | RaideError::Service { .. }
                | RaideError::Unknown { .. }
        )
    }

    /// Returns the HTTP status behind this error, when one was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            RaideError::Unauthorized => Some(401),
            RaideError::Forbidden => Some(403),
            RaideError::Service { .. } => Some(200),
            RaideError::Unknown { status } => Some(*status),
            _ => None,
        }
    }

    /// Replaces every occurrence of each secret in `message` with `[REDACTED]`.
    ///
    /// Empty secrets are ignored.
    #[must_use]
    pub fn sanitize_message(message: &str, secrets: &[&str]) -> String {
        secrets
            .iter()
            .filter(|s| !s.is_empty())
            .fold(message.to_string(), |acc, secret| {
                acc.replace(secret, "[REDACTED]")
            })
    }

    /// Creates a sanitized version of this error's display message.
    #[must_use]
    pub fn sanitized_display(&self, secrets: &[&str]) -> String {
        Self::sanitize_message(&self.to_string(), secrets)
    }
}
