//! Error types for the request pipeline.
//!
//! # Design
//! Every stage records the first failure it meets and later stages pass it
//! through untouched, so the same value may be handed out many times. Variants
//! therefore carry rendered messages rather than the source errors, which keeps
//! `RequestError` `Clone` and comparable in tests.
//!
//! `Decoding` keeps the status code of the response it failed on: the request
//! did reach the server and callers usually still want to know the outcome.

use thiserror::Error;

/// Errors produced anywhere between client construction and result decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The client was configured with a base URL that does not parse.
    #[error("invalid client configuration: {0}")]
    Configuration(String),

    /// The request URL, after resolution against the base URL, does not parse.
    #[error("invalid request url: {0}")]
    InvalidUrl(String),

    /// A header name or value supplied by the caller was rejected.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// The request body could not be serialized.
    #[error("encoding failed: {0}")]
    Encoding(String),

    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response arrived but its body could not be read to the end.
    #[error("reading response body failed: {0}")]
    Body(String),

    /// The buffered body does not fit the destination it was decoded into.
    #[error("decoding failed (HTTP {status}): {message}")]
    Decoding { status: u16, message: String },
}

impl RequestError {
    /// Status code of the response, when the failure happened after one arrived.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Decoding { status, .. } => Some(*status),
            _ => None,
        }
    }
}
