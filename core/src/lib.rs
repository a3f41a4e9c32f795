//! Synchronous client for the CFSSL certificate-authority HTTP API.
//!
//! # Overview
//! Talks to a remote CFSSL server over its JSON-over-HTTP API: `sign` an
//! existing certificate request, `newkey` to generate a key and CSR, and
//! `newcert` to generate key, CSR, and certificate in one call. Every
//! endpoint answers with the uniform `{success, result, errors}` envelope,
//! which this crate interprets into typed results and errors.
//!
//! # Design
//! - `Client` is read-only after construction — it holds a validated base
//!   URL and a blocking `ureq` agent, nothing else.
//! - Each operation is split into `build_*` (produces a request as data) and
//!   `parse_*` (consumes a response as data), so the protocol logic is
//!   testable without a server; the one-shot methods (`sign`,
//!   `generate_key`, `generate_certificate`) compose the pair around a
//!   single blocking round trip.
//! - Envelopes are parsed before the HTTP status is consulted — CFSSL
//!   servers put application errors in JSON bodies on non-2xx statuses.
//! - CSR structures are opaque `serde_json::Value` pass-throughs; the
//!   remote server is the only validator.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::Client;
pub use error::{ApiError, ConfigError};
pub use http::{HttpRequest, HttpResponse};
pub use types::{Envelope, GencertRequest, ResponseError, SignRequest};
