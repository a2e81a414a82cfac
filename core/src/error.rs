//! Error types for the movie catalog client.
//!
//! # Design
//! Every operation fails with the same `ClientError`. Callers are expected to
//! branch on success versus failure, then inspect `status()` or `message()`
//! if they need detail. An HTTP error status carries its standard reason
//! phrase as the message and keeps the raw body for diagnostics; a transport
//! failure wraps whatever the transport reported and has no status.

use std::error::Error as StdError;

use thiserror::Error;

/// The transport could not produce a response (connect refused, reset,
/// timeout enforced by the underlying HTTP stack, ...).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl TransportError {
    /// Wrap an underlying failure, using its `Display` as the message.
    pub fn new<E>(source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// A failure with no underlying error value.
    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err)
    }
}

/// Errors returned by every `MovieCatalogClient` operation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response was obtained from the service.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The service answered with a status >= 400. Displays as the reason
    /// phrase alone, e.g. `Not Found`.
    #[error("{reason}")]
    Status {
        status: u16,
        reason: String,
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request payload could not be encoded as JSON.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ClientError {
    /// Build a `Status` error, resolving the standard reason phrase.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            reason: reason_phrase(status),
            body: body.into(),
        }
    }

    /// HTTP status code, when the service produced a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body of an error status.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Result alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

fn reason_phrase(status: u16) -> String {
    ::http::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .map_or_else(|| format!("HTTP {status}"), str::to_string)
}
