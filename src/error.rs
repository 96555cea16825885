// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types shared across the engine.

/// Engine error type surfaced to the view layer as a typed outcome.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Local input validation failed; no network call was made.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// No session is established; the operation requires one.
    #[error("Not signed in")]
    Unauthenticated,

    /// The server rejected our credential. Always accompanied by a forced
    /// session teardown at the store layer.
    #[error("Session expired, log in again")]
    Unauthorized,

    /// Login was refused (wrong email or password, not an expired session).
    #[error("Incorrect email or password")]
    InvalidCredentials,

    /// The server rejected the request with a 4xx; carries the server's
    /// `detail` message verbatim when one was provided.
    #[error("{0}")]
    Rejected(String),

    /// The request could not complete (DNS, connect, timeout). Retryable.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with something we could not interpret.
    #[error("Unexpected response: {0}")]
    Api(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Whether this error means the credential itself was rejected.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, AppError::Unauthorized)
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, AppError>;
