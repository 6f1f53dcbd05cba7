//! Blocking HTTP transport and the outcome taxonomy
//!
//! One envelope in, one POST out, at most one attempt. Network failures never
//! escape as errors or panics; every call resolves to an [`Outcome`] the UI
//! can render directly.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::{Value, json};
use thiserror::Error;

use crate::config::Config;
use crate::protocol::RpcRequest;

/// Errors constructing the transport
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("bearer token contains characters not valid in a header")]
    InvalidToken,
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Result of one call against the remote endpoint
///
/// Tagged union over the failure taxonomy: decoded JSON (including
/// server-reported protocol errors) passes through unmodified; empty and
/// undecodable bodies keep their status code; connection-level failures keep
/// the error text.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Well-formed JSON response, verbatim
    Json(Value),
    /// Successful exchange with an empty body
    Empty { status: u16 },
    /// Successful exchange with a body that is not JSON
    Raw { status: u16, body: String },
    /// DNS/timeout/refused - the request never completed
    ConnectionFailed(String),
}

impl Outcome {
    /// Classify a completed exchange by status code and body text
    pub fn classify(status: u16, body: &str) -> Self {
        if body.trim().is_empty() {
            return Outcome::Empty { status };
        }
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Outcome::Json(value),
            Err(_) => Outcome::Raw {
                status,
                body: body.to_string(),
            },
        }
    }

    /// Render the outcome as the JSON value shown to the user
    pub fn into_value(self) -> Value {
        match self {
            Outcome::Json(value) => value,
            Outcome::Empty { status } => json!({
                "status_code": status,
                "message": "Empty response",
            }),
            Outcome::Raw { status, body } => json!({
                "status_code": status,
                "raw_response": body,
            }),
            Outcome::ConnectionFailed(message) => json!({ "error": message }),
        }
    }

    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Outcome::ConnectionFailed(_))
    }
}

/// Blocking transport to one remote endpoint
pub struct Transport {
    client: Client,
    endpoint: String,
}

impl Transport {
    /// Build a transport for `endpoint` with the configured timeout and
    /// optional bearer token
    pub fn new(endpoint: String, config: &Config) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/event-stream"),
        );
        if let Some(token) = config.token() {
            let value = format!("Bearer {token}");
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&value).map_err(|_| TransportError::InvalidToken)?,
            );
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self { client, endpoint })
    }

    /// POST one envelope. Exactly one attempt; failures come back as an
    /// [`Outcome`], never an `Err`.
    pub fn post(&self, request: &RpcRequest) -> Outcome {
        let response = match self.client.post(&self.endpoint).json(request).send() {
            Ok(response) => response,
            Err(e) => return Outcome::ConnectionFailed(e.to_string()),
        };

        let status = response.status().as_u16();
        match response.text() {
            Ok(body) => Outcome::classify(status, &body),
            Err(e) => Outcome::ConnectionFailed(e.to_string()),
        }
    }
}
