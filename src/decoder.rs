use serde_json::Value;

/// Payload that signals normal end of stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// One decoded element of the chat stream. Payloads that parse as JSON come
/// through as [`StreamEvent::Chunk`]; everything else is passed through as
/// text rather than failing the stream.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Chunk(Value),
    Text(String),
}

/// Outcome of decoding a single framed line.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Event(StreamEvent),
    /// The `[DONE]` sentinel: the stream is over.
    Done,
    /// Blank line or an `event:` field; nothing to emit.
    Skip,
}

/// Decode one line of the SSE stream.
///
/// Only the leading whitespace after the `data:` prefix is stripped. The
/// payload may carry whitespace-significant text, so trailing and interior
/// whitespace survive. The sentinel comparison is exact on the stripped
/// payload: case-sensitive, no extra trimming.
pub fn decode_line(line: &str) -> Decoded {
    let line = line.strip_suffix('\r').unwrap_or(line);

    if line.trim().is_empty() {
        return Decoded::Skip;
    }

    // `event:` fields are not consumed yet.
    if line.starts_with("event:") {
        return Decoded::Skip;
    }

    if let Some(payload) = line.strip_prefix("data:") {
        let payload = payload.trim_start();
        if payload == DONE_SENTINEL {
            return Decoded::Done;
        }
        return match serde_json::from_str::<Value>(payload) {
            Ok(value) => Decoded::Event(StreamEvent::Chunk(value)),
            Err(err) => {
                tracing::debug!("non-JSON data payload ({err}); passing through as text");
                Decoded::Event(StreamEvent::Text(payload.to_string()))
            }
        };
    }

    // Non-conformant line: pass it through so nothing is silently dropped.
    Decoded::Event(StreamEvent::Text(line.trim().to_string()))
}
