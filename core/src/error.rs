//! Error types for the request executor.
//!
//! # Design
//! `FetchError` is the closed set callers match on. Status failures carry
//! only the numeric code; no 4xx/5xx code gets a variant of its own.
//! `TransportError` is what a `Transport` reports: either an already
//! classified `FetchError`, which the executor passes through untouched, or
//! an opaque failure that the executor folds into `FetchError::Custom`.

use std::error::Error as StdError;

/// Errors returned by `RequestExecutor::fetch`.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The endpoint URL could not be parsed, or the URL with its query items
    /// appended is not a usable request target.
    #[error("bad URL")]
    BadUrl,

    /// The server answered with a status outside 200..=299.
    #[error("server returned HTTP {status}")]
    ServerError { status: u16 },

    /// The body did not match the requested shape.
    #[error("decoding failed: {0}")]
    DecodingError(#[source] serde_json::Error),

    /// A non-HTTP response or an unclassified transport failure.
    #[error("{0}")]
    Custom(String),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::ServerError { status } => Some(*status),
            _ => None,
        }
    }
}

/// Failure reported by a `Transport`.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    Other(#[source] Box<dyn StdError + Send + Sync>),
}

impl TransportError {
    pub fn other<E>(error: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        TransportError::Other(error.into())
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        TransportError::Other(Box::new(error))
    }
}

impl From<TransportError> for FetchError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Fetch(inner) => inner,
            TransportError::Other(inner) => FetchError::Custom(inner.to_string()),
        }
    }
}

/// Errors loading `ApiConfig` from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {var} is not set")]
    MissingToken { var: String },

    #[error("environment variable {var} is not valid unicode")]
    InvalidToken { var: String },
}
