//! Error types for the CFSSL API client.
//!
//! # Design
//! Two failure kinds surface from the protocol: the server answered with an
//! envelope whose `success` is false (`RemoteOperation`, carrying the
//! server's own error code), or the server answered with a non-2xx status
//! and no parseable envelope at all (`Transport`). JSON and network-level
//! failures are not wrapped — they pass through transparently from
//! `serde_json` and `ureq`.

use thiserror::Error;

/// Errors returned by `Client` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The envelope's `success` field was false. `code` and `message` come
    /// from the first entry of the envelope's `errors` array.
    #[error("{message} (CFSSL error {code})")]
    RemoteOperation { code: i64, message: String },

    /// The server returned a non-2xx status with no parseable envelope.
    #[error("server returned status code {status}")]
    Transport { status: u16 },

    /// A request payload or response body failed JSON (de)serialization.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The HTTP round trip itself failed.
    #[error(transparent)]
    Http(#[from] Box<ureq::Error>),
}

impl From<ureq::Error> for ApiError {
    fn from(e: ureq::Error) -> Self {
        ApiError::Http(Box::new(e))
    }
}

/// Errors from `Client` construction.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The remote address was empty. The original Python client produced a
    /// silently inert client here; construction fails loudly instead.
    #[error("remote address is empty")]
    EmptyRemote,
}
