//! Client for a remote CFSSL certificate-authority server.
//!
//! # Design
//! `Client` holds a validated base URL and a blocking `ureq` agent, and
//! carries no mutable state between calls. Each operation is split into a
//! `build_*` method that produces an [`HttpRequest`] and a `parse_*` method
//! that consumes an [`HttpResponse`], with a one-shot method composing the
//! pair around a single POST round trip. The split keeps request
//! construction and envelope interpretation free of I/O and testable
//! without a server.
//!
//! Response bodies are parsed as envelopes regardless of HTTP status: a
//! real CFSSL server answers application-level failures with a non-2xx
//! status and a JSON error envelope, and those must surface as
//! [`ApiError::RemoteOperation`] rather than a bare transport error. The
//! status code only matters when the body is not an envelope at all.

use serde_json::Value;

use crate::error::{ApiError, ConfigError};
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Envelope, GencertRequest, SignRequest, SignResult};

/// Synchronous client for one CFSSL server.
///
/// Immutable after construction; concurrent calls on one instance are safe
/// because every operation is stateless beyond the `remote` field.
#[derive(Clone)]
pub struct Client {
    remote: String,
    agent: ureq::Agent,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("remote", &self.remote)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client for the CFSSL server at `remote`.
    ///
    /// A bare host/port gets a scheme prepended according to `use_tls`. An
    /// address that already carries `http://` or `https://` is left
    /// untouched, even when it disagrees with `use_tls`. Trailing slashes
    /// are stripped so endpoint joining is unambiguous.
    pub fn new(remote: &str, use_tls: bool) -> Result<Self, ConfigError> {
        if remote.is_empty() {
            return Err(ConfigError::EmptyRemote);
        }
        let remote = if remote.starts_with("http://") || remote.starts_with("https://") {
            remote.to_string()
        } else if use_tls {
            format!("https://{remote}")
        } else {
            format!("http://{remote}")
        };

        // Non-2xx responses must come back as data, not Err — the error
        // envelope rides on 4xx/5xx statuses.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();

        Ok(Self {
            remote: remote.trim_end_matches('/').to_string(),
            agent,
        })
    }

    /// The normalized base URL this client targets.
    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Resolve the full URL for a CFSSL API action. Pure string assembly.
    pub fn endpoint(&self, action: &str) -> String {
        format!("{}/api/v1/cfssl/{action}", self.remote)
    }

    // ── sign ─────────────────────────────────────────────────────────────

    pub fn build_sign(
        &self,
        certificate_request: &str,
        profile: &str,
        label: &str,
    ) -> Result<HttpRequest, ApiError> {
        let payload = SignRequest {
            certificate_request: certificate_request.to_string(),
            profile: profile.to_string(),
            label: label.to_string(),
        };
        Ok(HttpRequest {
            url: self.endpoint("sign"),
            body: serde_json::to_string(&payload)?,
        })
    }

    pub fn parse_sign(&self, response: HttpResponse) -> Result<String, ApiError> {
        let result = parse_envelope(&response)?;
        let SignResult { certificate } = serde_json::from_value(result)?;
        Ok(certificate)
    }

    /// Ask the server to sign a PEM-encoded certificate request under the
    /// given profile and label. Returns the issued PEM certificate.
    pub fn sign(
        &self,
        certificate_request: &str,
        profile: &str,
        label: &str,
    ) -> Result<String, ApiError> {
        let req = self.build_sign(certificate_request, profile, label)?;
        self.parse_sign(self.execute(req)?)
    }

    // ── newkey ───────────────────────────────────────────────────────────

    pub fn build_genkey(&self, csr: &Value) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            url: self.endpoint("newkey"),
            body: serde_json::to_string(csr)?,
        })
    }

    pub fn parse_genkey(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_envelope(&response)
    }

    /// Ask the server to generate a private key and CSR from a JSON CSR
    /// structure (`CN`, `names`, `hosts`, `key{algo,size}`). The structure
    /// is sent verbatim; the full `result` object comes back unchanged.
    pub fn generate_key(&self, csr: &Value) -> Result<Value, ApiError> {
        let req = self.build_genkey(csr)?;
        self.parse_genkey(self.execute(req)?)
    }

    // ── newcert ──────────────────────────────────────────────────────────

    pub fn build_gencert(
        &self,
        csr: &Value,
        profile: &str,
        label: &str,
    ) -> Result<HttpRequest, ApiError> {
        let payload = GencertRequest {
            request: csr.clone(),
            profile: profile.to_string(),
            label: label.to_string(),
        };
        Ok(HttpRequest {
            url: self.endpoint("newcert"),
            body: serde_json::to_string(&payload)?,
        })
    }

    pub fn parse_gencert(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_envelope(&response)
    }

    /// Ask the server to generate a key, CSR, and certificate in one call.
    /// The caller's CSR structure goes under the body's `request` field with
    /// `profile` and `label` as siblings; the caller's value is not mutated.
    pub fn generate_certificate(
        &self,
        csr: &Value,
        profile: &str,
        label: &str,
    ) -> Result<Value, ApiError> {
        let req = self.build_gencert(csr, profile, label)?;
        self.parse_gencert(self.execute(req)?)
    }

    /// One blocking POST round trip. No retries, no caching.
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(url = %req.url, "POST");
        let mut response = self
            .agent
            .post(&req.url)
            .content_type("application/json")
            .send(req.body.as_bytes())?;
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string()?;
        tracing::debug!(status, "response received");
        Ok(HttpResponse { status, body })
    }
}

/// Interpret a response body as a CFSSL envelope.
///
/// Envelope-first: the body is parsed as JSON before the status code is
/// consulted. Only an unparseable body falls back to the status — non-2xx
/// becomes `Transport`, 2xx propagates the JSON error unchanged.
fn parse_envelope(response: &HttpResponse) -> Result<Value, ApiError> {
    let envelope: Envelope = match serde_json::from_str(&response.body) {
        Ok(envelope) => envelope,
        Err(e) if (200..300).contains(&response.status) => return Err(ApiError::Json(e)),
        Err(_) => {
            return Err(ApiError::Transport {
                status: response.status,
            })
        }
    };

    if envelope.success {
        return Ok(envelope.result);
    }
    match envelope.errors.into_iter().next() {
        Some(err) => Err(ApiError::RemoteOperation {
            code: err.code,
            message: err.message,
        }),
        // Servers are supposed to populate `errors` on failure; don't
        // panic when one doesn't.
        None => Err(ApiError::RemoteOperation {
            code: 0,
            message: "unknown error".to_string(),
        }),
    }
}
