//! Per-line event classification and dispatch.
use fetch_logging::{fetch_trace, fetch_warn};
use serde_json::Value;

/// Framing marker the service may put in front of each record.
pub const DATA_PREFIX: &str = "data: ";

#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Log { message: String },
    Result { data: Value },
}

/// A single record that could not be turned into an event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid record {line:?}: {diagnostic}")]
    InvalidJson { line: String, diagnostic: String },
    #[error("log record without a message: {line:?}")]
    MissingMessage { line: String },
}

/// Receives the outcome of dispatching one line.
pub trait EventObserver {
    fn on_log(&mut self, message: String);
    fn on_result(&mut self, data: Value);
    fn on_decode_error(&mut self, error: DecodeError);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// An event was delivered to the observer.
    Delivered,
    /// Blank line or unknown record type; nothing happened.
    Ignored,
    /// The line was malformed and reported via `on_decode_error`.
    Rejected,
}

/// Classify one decoded line. `Ok(None)` means the line carries nothing of
/// interest (blank, or an unrecognized `type`).
pub fn classify_line(line: &str) -> Result<Option<StreamEvent>, DecodeError> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    let body = line.strip_prefix(DATA_PREFIX).unwrap_or(line);
    let record: Value = serde_json::from_str(body).map_err(|err| DecodeError::InvalidJson {
        line: line.to_string(),
        diagnostic: err.to_string(),
    })?;

    match record.get("type").and_then(Value::as_str) {
        Some("log") => {
            let message = match record.get("message") {
                Some(Value::String(text)) => text.clone(),
                Some(Value::Null) | None => {
                    return Err(DecodeError::MissingMessage {
                        line: line.to_string(),
                    })
                }
                Some(other) => other.to_string(),
            };
            Ok(Some(StreamEvent::Log { message }))
        }
        Some("result") => {
            let data = record.get("data").cloned().unwrap_or(Value::Null);
            Ok(Some(StreamEvent::Result { data }))
        }
        _ => Ok(None),
    }
}

/// Classify `line` and hand the outcome to `observer`. Never fails: a bad
/// line only affects itself.
pub fn dispatch_line(line: &str, observer: &mut impl EventObserver) -> Dispatch {
    match classify_line(line) {
        Ok(Some(StreamEvent::Log { message })) => {
            fetch_trace!("dispatch log event ({} chars)", message.len());
            observer.on_log(message);
            Dispatch::Delivered
        }
        Ok(Some(StreamEvent::Result { data })) => {
            fetch_trace!("dispatch result event");
            observer.on_result(data);
            Dispatch::Delivered
        }
        Ok(None) => Dispatch::Ignored,
        Err(err) => {
            fetch_warn!("Skipping stream record: {}", err);
            observer.on_decode_error(err);
            Dispatch::Rejected
        }
    }
}
