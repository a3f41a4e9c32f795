//! Wire types for the CFSSL API.
//!
//! # Design
//! These types mirror the CFSSL server's JSON schema but are defined
//! independently from the mock-server crate; integration tests catch schema
//! drift. CSR structures stay as opaque `serde_json::Value` pass-throughs —
//! the remote server is the only party that validates them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The uniform response wrapper every CFSSL endpoint returns.
///
/// When `success` is true, `result` carries the operation-specific payload.
/// When false, `errors` is non-empty and its first element is the primary
/// failure cause. `messages` is emitted by real CFSSL servers but never
/// consumed by this client.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub errors: Vec<ResponseError>,
    #[serde(default)]
    pub messages: Vec<Value>,
}

/// A single error object inside an [`Envelope`].
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseError {
    pub code: i64,
    pub message: String,
}

/// Request payload for the `sign` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SignRequest {
    pub certificate_request: String,
    pub profile: String,
    pub label: String,
}

/// Request payload for the `newcert` endpoint: the caller's CSR structure
/// under `request`, with `profile` and `label` as siblings.
#[derive(Debug, Clone, Serialize)]
pub struct GencertRequest {
    pub request: Value,
    pub profile: String,
    pub label: String,
}

/// Payload returned by a successful `sign`: the issued certificate.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SignResult {
    pub certificate: String,
}
