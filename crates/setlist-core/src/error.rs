//! Error types for setlist.
//!
//! One unified error type with explicit variants for transport, expired
//! authentication, rejected requests, undecodable responses, credential
//! storage and input validation failures.

use std::fmt;
use thiserror::Error;

/// The unified error type for setlist operations.
///
/// Every variant renders a human-readable message so that embedding
/// applications can show it to the user directly.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a response (DNS, TLS, connection, timeout).
    #[error("network failure: {0}")]
    Transport(#[from] TransportError),

    /// The access token was rejected and could not be renewed.
    ///
    /// Stored credentials have already been cleared when this is returned;
    /// the caller should treat it as "log the user out".
    #[error("session expired, please log in again")]
    AuthExpired,

    /// The server answered with a non-success status.
    #[error("request failed: {0}")]
    Request(#[from] RequestError),

    /// A success response carried a body that could not be decoded.
    #[error("malformed response: {message}")]
    Decode { message: String },

    /// Credential storage failed.
    #[error("credential storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input validation errors (base URL, identifiers, queries).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true if the request never reached the server.
    pub fn is_network_failure(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Returns true if the session is gone and the user must log in again.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Error::AuthExpired)
    }

    /// HTTP status of a rejected request, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Request(err) => Some(err.status),
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Any other transport failure.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// A non-success response from the API.
#[derive(Debug, Clone)]
pub struct RequestError {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
    /// Server-provided message, if the body carried one.
    pub message: Option<String>,
}

impl RequestError {
    /// Build a request error from a status and the raw body.
    ///
    /// The message is lifted from a JSON `message` or `error` field.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| {
                ["message", "error"]
                    .iter()
                    .find_map(|key| value.get(key).and_then(|v| v.as_str()).map(str::to_string))
            });

        Self {
            status,
            body,
            message,
        }
    }

    /// Check if the server rejected the request as unauthorized.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for RequestError {}

/// Credential storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing storage failed.
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// The stored data could not be parsed.
    #[error("corrupt credential data in {path}: {message}")]
    Corrupt { path: String, message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// An identifier (playlist or song id) was empty.
    #[error("{kind} id must not be empty")]
    EmptyId { kind: &'static str },

    /// A catalog search query was blank.
    #[error("search query must not be empty")]
    EmptyQuery,

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
