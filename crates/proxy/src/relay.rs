//! Stdio-to-HTTP relay loop
//!
//! Bridges newline-delimited JSON-RPC frames on stdin/stdout to a remote
//! streamable-HTTP endpoint: one line in, one POST upstream, zero or more
//! lines out. Envelopes are never rewritten; framing and session-id
//! bookkeeping are the only local concerns.

use std::io::{BufRead, Write};
use std::time::Duration;

use libtrackor::config::Config;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::sse;

/// Header the server uses to hand out and expect back its session id
const SESSION_HEADER: &str = "mcp-session-id";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("bearer token contains characters not valid in a header")]
    InvalidToken,
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// What came back from one upstream POST
#[derive(Debug)]
enum Upstream {
    Reply {
        status: u16,
        content_type: String,
        body: String,
    },
    Failed(String),
}

pub struct Relay {
    client: Client,
    endpoint: String,
    session_id: Option<String>,
}

impl Relay {
    pub fn new(endpoint: String, config: &Config) -> Result<Self, RelayError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/event-stream"),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = config.token() {
            let value = format!("Bearer {token}");
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&value).map_err(|_| RelayError::InvalidToken)?,
            );
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            session_id: None,
        })
    }

    /// Pump messages until the reader closes. Per-message failures are
    /// answered or logged, never fatal.
    pub fn run(&mut self, mut reader: impl BufRead, mut writer: impl Write) -> Result<(), RelayError> {
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                return Ok(());
            }
            let message = line.trim();
            if message.is_empty() {
                continue;
            }

            debug!(len = message.len(), "Forwarding message");
            let upstream = self.forward(message);
            for frame in respond(message, upstream) {
                writer.write_all(frame.as_bytes())?;
                writer.write_all(b"\n")?;
                writer.flush()?;
            }
        }
    }

    /// One POST upstream, replaying the negotiated session id when present
    fn forward(&mut self, message: &str) -> Upstream {
        let mut request = self.client.post(&self.endpoint).body(message.to_string());
        if let Some(id) = &self.session_id {
            request = request.header(SESSION_HEADER, id);
        }

        let response = match request.send() {
            Ok(response) => response,
            Err(e) => return Upstream::Failed(e.to_string()),
        };

        if let Some(id) = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            if self.session_id.as_deref() != Some(id) {
                info!(session = id, "Adopted server session");
                self.session_id = Some(id.to_string());
            }
        }

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        match response.text() {
            Ok(body) => Upstream::Reply {
                status,
                content_type,
                body,
            },
            Err(e) => Upstream::Failed(e.to_string()),
        }
    }
}

/// Map one upstream result to the stdout frames it produces
fn respond(message: &str, upstream: Upstream) -> Vec<String> {
    match upstream {
        Upstream::Failed(reason) => {
            warn!(reason = %reason, "Upstream request failed");
            error_frame(message, &reason).into_iter().collect()
        }
        Upstream::Reply {
            status,
            content_type,
            body,
        } => {
            if body.trim().is_empty() {
                // Notification ack (202 or bare 200), nothing to frame
                debug!(status, "Empty reply");
                return Vec::new();
            }
            let payloads = if content_type.starts_with("text/event-stream") {
                sse::data_payloads(&body)
            } else {
                vec![body]
            };
            payloads
                .iter()
                .filter_map(|payload| compact_json(payload, status))
                .collect()
        }
    }
}

/// Re-serialize a payload as a single compact line. Non-JSON payloads cannot
/// be framed and are dropped.
fn compact_json(payload: &str, status: u16) -> Option<String> {
    match serde_json::from_str::<Value>(payload) {
        Ok(value) => Some(value.to_string()),
        Err(e) => {
            warn!(status, error = %e, "Dropping unframeable non-JSON payload");
            None
        }
    }
}

/// Synthesize a JSON-RPC error for a failed request so the host is not left
/// hanging. Notifications (no id) produce nothing.
fn error_frame(message: &str, reason: &str) -> Option<String> {
    let id = serde_json::from_str::<Value>(message).ok()?.get("id").cloned()?;
    let frame = json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": -32000, "message": reason },
    });
    Some(frame.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(content_type: &str, body: &str) -> Upstream {
        Upstream::Reply {
            status: 200,
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    const REQUEST: &str = r#"{"jsonrpc":"2.0","id":"abc","method":"tools/list"}"#;
    const NOTIFICATION: &str = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;

    #[test]
    fn json_reply_becomes_one_compact_frame() {
        let frames = respond(
            REQUEST,
            reply("application/json", "{\n  \"jsonrpc\": \"2.0\",\n  \"id\": \"abc\",\n  \"result\": {}\n}"),
        );
        assert_eq!(frames.len(), 1);
        assert!(!frames[0].contains('\n'), "frame must be a single line");

        let value: Value = serde_json::from_str(&frames[0]).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["result"], json!({}));
    }

    #[test]
    fn event_stream_reply_becomes_one_frame_per_event() {
        let body = "event: message\ndata: {\"id\":1}\n\nevent: message\ndata: {\"id\":2}\n\n";
        let frames = respond(REQUEST, reply("text/event-stream", body));
        assert_eq!(frames, vec![r#"{"id":1}"#, r#"{"id":2}"#]);
    }

    #[test]
    fn empty_reply_produces_no_frames() {
        assert!(respond(NOTIFICATION, reply("application/json", "")).is_empty());
        assert!(respond(NOTIFICATION, reply("", "  \n")).is_empty());
    }

    #[test]
    fn non_json_reply_is_dropped() {
        assert!(respond(REQUEST, reply("text/html", "<h1>teapot</h1>")).is_empty());
    }

    #[test]
    fn failed_request_synthesizes_error_with_original_id() {
        let frames = respond(REQUEST, Upstream::Failed("connection refused".into()));
        assert_eq!(frames.len(), 1);

        let value: Value = serde_json::from_str(&frames[0]).unwrap();
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["id"], "abc");
        assert_eq!(value["error"]["code"], -32000);
        assert_eq!(value["error"]["message"], "connection refused");
    }

    #[test]
    fn failed_notification_stays_silent() {
        let frames = respond(NOTIFICATION, Upstream::Failed("timeout".into()));
        assert!(frames.is_empty());
    }

    #[test]
    fn error_frame_handles_numeric_ids() {
        let frame = error_frame(r#"{"jsonrpc":"2.0","id":7,"method":"x"}"#, "boom").unwrap();
        let value: Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(value["id"], 7);
    }

    #[test]
    fn run_answers_unreachable_upstream_and_exits_on_eof() {
        use std::net::TcpListener;

        // Bind then drop to get a port nothing is listening on.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = Config {
            timeout_secs: 5,
            ..Default::default()
        };
        let mut relay = Relay::new(format!("http://{addr}/mcp"), &config).unwrap();

        let input = format!("{REQUEST}\n\n{NOTIFICATION}\n");
        let mut output = Vec::new();
        relay
            .run(std::io::Cursor::new(input), &mut output)
            .unwrap();

        let out = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        // The request gets a synthesized error; the notification stays silent.
        assert_eq!(lines.len(), 1);
        let value: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["error"]["code"], -32000);
    }
}
