//! Error types for Syllachat
//!
//! This module defines all error types used throughout the client,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Syllachat operations
///
/// This enum encompasses all possible errors that can occur during
/// session handling, backend requests, chat gating, and configuration
/// loading.
#[derive(Error, Debug)]
pub enum SyllachatError {
    /// No bearer token has been set for this session
    ///
    /// Raised before any network call is made. The presentation layer
    /// must redirect the user to the login surface.
    #[error("Not authenticated: no access token present")]
    Unauthenticated,

    /// The backend rejected the bearer token with a 401
    ///
    /// Terminal for the current session; no retry is performed and all
    /// subsequent authenticated calls fail fast with this error.
    #[error("Session expired: the backend rejected the access token")]
    SessionExpired,

    /// Transport-level failure: connect error, timeout, TLS failure
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid local input (missing profile fields, malformed values)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Application-level error reported by the backend
    #[error("API error: {0}")]
    Api(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

impl SyllachatError {
    /// Returns `true` when the error must surface to the presentation
    /// layer as a redirect-to-login signal.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            SyllachatError::Unauthenticated | SyllachatError::SessionExpired
        )
    }
}

/// Result type alias for Syllachat operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
