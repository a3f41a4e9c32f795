//! HTTP transport types described as plain data.
//!
//! # Design
//! `Client` builds [`HttpRequest`] values and parses [`HttpResponse`] values
//! without touching the network; the blocking one-shot methods (or any other
//! executor the caller prefers) perform the actual I/O in between. The split
//! keeps request construction and envelope interpretation deterministic and
//! testable without a server.
//!
//! Every CFSSL API call is a POST with a JSON body, so there is no method
//! field and no header list — the executor always sends
//! `content-type: application/json`.

/// A pending CFSSL API call: the fully-resolved endpoint URL and the JSON
/// request body.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub body: String,
}

/// A raw HTTP response, constructed by whoever executed an [`HttpRequest`]
/// and handed to the `parse_*` methods for envelope interpretation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}
