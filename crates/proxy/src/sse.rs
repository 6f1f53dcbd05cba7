//! Minimal server-sent-events parsing
//!
//! Streamable-HTTP servers may answer a POST with a `text/event-stream`
//! body. Only `data:` fields matter to the relay; event names, ids, retry
//! hints, and comments are ignored. Multi-line data within one event is
//! joined with newlines, as the SSE spec requires.

/// Extract the data payload of every event in an SSE body
pub fn data_payloads(body: &str) -> Vec<String> {
    let mut payloads = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for raw in body.lines() {
        let line = raw.trim_end_matches('\r');

        if line.is_empty() {
            // Blank line ends the event
            if !current.is_empty() {
                payloads.push(current.join("\n"));
                current.clear();
            }
            continue;
        }

        if line.starts_with(':') {
            continue;
        }

        if let Some(rest) = line.strip_prefix("data:") {
            current.push(rest.strip_prefix(' ').unwrap_or(rest));
        }
    }

    if !current.is_empty() {
        payloads.push(current.join("\n"));
    }

    payloads
}
