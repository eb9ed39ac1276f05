//! OpenCode client error types.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by the OpenCode server client.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The configured server URL could not be parsed.
    #[error("invalid server url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("API error: {status}: {body}")]
    Api { status: StatusCode, body: String },

    /// The response body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, Error>;
