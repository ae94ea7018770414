//! Error types for pagekit
//!
//! The collection state machines define no failure kinds of their own; errors
//! originate in fetcher implementations and propagate untouched through the
//! operation that triggered the fetch. All public APIs return `Result<T, Error>`
//! where `Error` is defined here.

use thiserror::Error;

/// The main error type for pagekit
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to decode page payload: {message}")]
    Decode { message: String },

    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Result type alias for pagekit
pub type Result<T> = std::result::Result<T, Error>;
