use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use fetch_logging::{fetch_debug, fetch_info};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::session::{run_session, ChannelEventSink};
use crate::transport::{ReqwestTransport, StreamTransport, TransportSettings};
use crate::{EngineEvent, SessionId, TransportError};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to configure transport: {0}")]
    Transport(#[from] TransportError),
}

enum EngineCommand {
    Submit { session: SessionId, payload: Value },
    Abandon { session: SessionId },
}

/// Runs at most one session at a time on a background runtime. Submitting a
/// new session cancels the one in flight.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: TransportSettings) -> Result<Self, EngineError> {
        let transport = ReqwestTransport::new(&settings)?;
        Ok(Self::with_transport(Arc::new(transport))?)
    }

    pub fn with_transport(transport: Arc<dyn StreamTransport>) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            let mut current: Option<(SessionId, CancellationToken)> = None;
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Submit { session, payload } => {
                        if let Some((previous, token)) = current.take() {
                            fetch_info!("Cancelling session {} for session {}", previous, session);
                            token.cancel();
                        }
                        let token = CancellationToken::new();
                        current = Some((session, token.clone()));

                        let transport = transport.clone();
                        let sink = ChannelEventSink::new(event_tx.clone());
                        runtime.spawn(async move {
                            let end =
                                run_session(transport.as_ref(), session, &payload, &sink, &token)
                                    .await;
                            fetch_debug!("Session {} ended: {:?}", session, end);
                        });
                    }
                    EngineCommand::Abandon { session } => {
                        if current.as_ref().is_some_and(|(id, _)| *id == session) {
                            if let Some((_, token)) = current.take() {
                                fetch_info!("Abandoning session {}", session);
                                token.cancel();
                            }
                        }
                    }
                }
            }
            if let Some((_, token)) = current.take() {
                token.cancel();
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, session: SessionId, payload: Value) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Submit { session, payload });
    }

    pub fn abandon(&self, session: SessionId) {
        let _ = self.cmd_tx.send(EngineCommand::Abandon { session });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}
