//! Mock CFSSL server for integration tests.
//!
//! Implements the three endpoints the client speaks to, answering with the
//! uniform `{success, result, errors, messages}` envelope. Application
//! failures ride on HTTP 400 with a JSON error envelope, the way a real
//! CFSSL server reports them. All keys and certificates are fabricated PEM
//! blobs — nothing here is cryptographic.

use axum::{http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

const KNOWN_PROFILES: &[&str] = &["", "client", "server", "peer", "www"];

#[derive(Debug, Serialize)]
pub struct Envelope {
    pub success: bool,
    pub result: Value,
    pub errors: Vec<ResponseError>,
    pub messages: Vec<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseError {
    pub code: i64,
    pub message: String,
}

#[derive(Deserialize)]
pub struct SignRequest {
    pub certificate_request: String,
    #[serde(default)]
    pub profile: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Deserialize)]
pub struct GencertRequest {
    pub request: Value,
    #[serde(default)]
    pub profile: String,
    #[serde(default)]
    pub label: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/api/v1/cfssl/sign", post(sign))
        .route("/api/v1/cfssl/newkey", post(newkey))
        .route("/api/v1/cfssl/newcert", post(newcert))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn success(result: Value) -> Json<Envelope> {
    Json(Envelope {
        success: true,
        result,
        errors: Vec::new(),
        messages: Vec::new(),
    })
}

/// CFSSL reports application failures with a 400 status and an error
/// envelope; codes follow its category*1000 scheme (9xxx CSR, 5xxx policy).
fn failure(code: i64, message: impl Into<String>) -> (StatusCode, Json<Envelope>) {
    (
        StatusCode::BAD_REQUEST,
        Json(Envelope {
            success: false,
            result: Value::Null,
            errors: vec![ResponseError {
                code,
                message: message.into(),
            }],
            messages: Vec::new(),
        }),
    )
}

async fn sign(
    Json(input): Json<SignRequest>,
) -> Result<Json<Envelope>, (StatusCode, Json<Envelope>)> {
    tracing::debug!(profile = %input.profile, label = %input.label, "sign request");
    if !input.certificate_request.contains("BEGIN CERTIFICATE REQUEST") {
        return Err(failure(9300, "malformed certificate request"));
    }
    if !KNOWN_PROFILES.contains(&input.profile.as_str()) {
        return Err(failure(5200, format!("unknown profile: {}", input.profile)));
    }
    Ok(success(json!({
        "certificate": fake_certificate("signed", &input.profile),
    })))
}

async fn newkey(
    Json(csr): Json<Value>,
) -> Result<Json<Envelope>, (StatusCode, Json<Envelope>)> {
    let cn = common_name(&csr).ok_or_else(|| failure(9000, "missing CN in request"))?;
    Ok(success(json!({
        "private_key": fake_private_key(&csr),
        "certificate_request": fake_csr(cn),
    })))
}

async fn newcert(
    Json(input): Json<GencertRequest>,
) -> Result<Json<Envelope>, (StatusCode, Json<Envelope>)> {
    tracing::debug!(profile = %input.profile, label = %input.label, "newcert request");
    let cn = common_name(&input.request).ok_or_else(|| failure(9000, "missing CN in request"))?;
    if !KNOWN_PROFILES.contains(&input.profile.as_str()) {
        return Err(failure(5200, format!("unknown profile: {}", input.profile)));
    }
    Ok(success(json!({
        "private_key": fake_private_key(&input.request),
        "certificate_request": fake_csr(cn),
        "certificate": fake_certificate(cn, &input.profile),
    })))
}

fn common_name(csr: &Value) -> Option<&str> {
    csr.get("CN").and_then(Value::as_str).filter(|cn| !cn.is_empty())
}

fn fake_certificate(cn: &str, profile: &str) -> String {
    format!("-----BEGIN CERTIFICATE-----\nMOCK/{cn}/{profile}\n-----END CERTIFICATE-----\n")
}

fn fake_csr(cn: &str) -> String {
    format!("-----BEGIN CERTIFICATE REQUEST-----\nMOCK/{cn}\n-----END CERTIFICATE REQUEST-----\n")
}

fn fake_private_key(csr: &Value) -> String {
    let algo = csr
        .get("key")
        .and_then(|k| k.get("algo"))
        .and_then(Value::as_str)
        .unwrap_or("ecdsa");
    let label = if algo == "rsa" { "RSA PRIVATE KEY" } else { "EC PRIVATE KEY" };
    format!("-----BEGIN {label}-----\nMOCK\n-----END {label}-----\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_serializes_all_fields() {
        let envelope = success(json!({"certificate": "PEM"})).0;
        let v = serde_json::to_value(&envelope).unwrap();
        assert_eq!(v["success"], true);
        assert_eq!(v["result"]["certificate"], "PEM");
        assert_eq!(v["errors"], json!([]));
        assert_eq!(v["messages"], json!([]));
    }

    #[test]
    fn failure_envelope_carries_code_and_message() {
        let (status, body) = failure(9300, "malformed certificate request");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let v = serde_json::to_value(&body.0).unwrap();
        assert_eq!(v["success"], false);
        assert_eq!(v["result"], Value::Null);
        assert_eq!(v["errors"][0]["code"], 9300);
        assert_eq!(v["errors"][0]["message"], "malformed certificate request");
    }

    #[test]
    fn sign_request_defaults_profile_and_label() {
        let input: SignRequest =
            serde_json::from_str(r#"{"certificate_request":"csr"}"#).unwrap();
        assert_eq!(input.certificate_request, "csr");
        assert_eq!(input.profile, "");
        assert_eq!(input.label, "");
    }

    #[test]
    fn sign_request_rejects_missing_certificate_request() {
        let result: Result<SignRequest, _> = serde_json::from_str(r#"{"profile":"client"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn gencert_request_requires_request_field() {
        let result: Result<GencertRequest, _> =
            serde_json::from_str(r#"{"profile":"www","label":""}"#);
        assert!(result.is_err());
    }

    #[test]
    fn private_key_label_follows_algo() {
        let ec = fake_private_key(&json!({"key": {"algo": "ecdsa", "size": 256}}));
        assert!(ec.contains("EC PRIVATE KEY"));
        let rsa = fake_private_key(&json!({"key": {"algo": "rsa", "size": 2048}}));
        assert!(rsa.contains("RSA PRIVATE KEY"));
    }
}
