use fetch_logging::{fetch_debug, fetch_info, fetch_warn};
use futures_util::StreamExt;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::decode::LineDecoder;
use crate::transport::StreamTransport;
use crate::{EngineEvent, SessionId};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Completed,
    Failed,
    Cancelled,
}

/// Submit `payload` and forward the response to `sink` line by line until the
/// body ends, fails, or `cancel` fires. Nothing is emitted after cancellation.
pub async fn run_session(
    transport: &dyn StreamTransport,
    session: SessionId,
    payload: &Value,
    sink: &dyn EventSink,
    cancel: &CancellationToken,
) -> SessionEnd {
    let opened = tokio::select! {
        biased;
        _ = cancel.cancelled() => return SessionEnd::Cancelled,
        opened = transport.open(payload) => opened,
    };
    let mut stream = match opened {
        Ok(stream) => stream,
        Err(error) => {
            sink.emit(EngineEvent::Failed { session, error });
            return SessionEnd::Failed;
        }
    };
    sink.emit(EngineEvent::ResponseOpened { session });

    let mut decoder = LineDecoder::new();
    let mut line_count = 0usize;
    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => return SessionEnd::Cancelled,
            next = stream.next() => next,
        };
        match next {
            Some(Ok(chunk)) => {
                for line in decoder.push(&chunk) {
                    if cancel.is_cancelled() {
                        return SessionEnd::Cancelled;
                    }
                    line_count += 1;
                    sink.emit(EngineEvent::Line { session, line });
                }
            }
            Some(Err(error)) => {
                fetch_warn!("Session {} body failed: {}", session, error);
                sink.emit(EngineEvent::Failed { session, error });
                return SessionEnd::Failed;
            }
            None => break,
        }
    }

    if let Some(tail) = decoder.finish() {
        fetch_debug!(
            "Session {} discarded {} bytes of unterminated tail",
            session,
            tail.len()
        );
    }
    fetch_info!("Session {} stream completed after {} lines", session, line_count);
    sink.emit(EngineEvent::StreamCompleted { session });
    SessionEnd::Completed
}
