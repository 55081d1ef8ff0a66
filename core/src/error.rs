//! Error types for building, sending, and draining requests.
//!
//! # Design
//! Failures fall into three stages: the request could not be constructed,
//! the transport failed, or the response body could not be read. Each stage
//! gets its own `Error` variant so callers can tell "nothing was sent" apart
//! from "something was sent and failed". Status codes are never errors; a
//! 404 or 500 comes back as data.

use thiserror::Error;

use crate::transport::TransportError;

/// Result type for request operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by `RequestSpec::response` and `RequestSpec::bytes_response`.
#[derive(Debug, Error)]
pub enum Error {
    /// The URL, method, and body could not form a request. No transport call
    /// was made.
    #[error("failed to construct request: {0}")]
    Construction(#[from] ConstructionError),

    /// The transport failed to execute the request.
    #[error("transport error: {0}")]
    Transport(#[source] TransportError),

    /// The response body could not be read to completion.
    #[error("failed to read response body: {0}")]
    BodyRead(#[source] std::io::Error),
}

impl Error {
    pub fn is_construction(&self) -> bool {
        matches!(self, Self::Construction(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_body_read(&self) -> bool {
        matches!(self, Self::BodyRead(_))
    }
}

/// Reasons a `PreparedRequest` could not be built.
#[derive(Debug, Error)]
pub enum ConstructionError {
    /// The URL is not an absolute URL.
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The method is not a valid HTTP token.
    #[error("invalid method {0:?}")]
    InvalidMethod(String),

    /// `http::Request::builder` rejected the parts.
    #[error(transparent)]
    Build(#[from] http::Error),
}

/// Errors from interpreting a `BytesResponse` body.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The body is not valid UTF-8.
    #[error("response body is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The body could not be deserialized into the expected type.
    #[error("response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
