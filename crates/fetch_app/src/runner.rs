use std::time::Duration;

use fetch_core::{Effect, Msg};
use fetch_engine::{EngineError, EngineEvent, EngineHandle, TransportSettings};
use fetch_logging::{fetch_debug, fetch_info};

/// Executes core effects on the engine and turns engine events back into
/// messages.
pub(crate) struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub(crate) fn new(settings: TransportSettings) -> Result<Self, EngineError> {
        fetch_info!("Engine targeting {}", settings.endpoint);
        Ok(Self {
            engine: EngineHandle::new(settings)?,
        })
    }

    pub(crate) fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitPayload { session, payload } => {
                    fetch_debug!("Submit session {}", session);
                    self.engine.submit(session, payload.into_value());
                }
                Effect::AbandonSession { session } => {
                    self.engine.abandon(session);
                }
            }
        }
    }

    pub(crate) fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(event_to_msg)
    }
}

pub(crate) fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ResponseOpened { session } => Msg::StreamOpened { session },
        EngineEvent::Line { session, line } => Msg::LineReceived { session, line },
        EngineEvent::StreamCompleted { session } => Msg::StreamCompleted { session },
        EngineEvent::Failed { session, error } => Msg::TransportFailed {
            session,
            message: error.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fetch_engine::{FailureKind, TransportError};
    use pretty_assertions::assert_eq;

    #[test]
    fn failures_carry_their_display_message() {
        let msg = event_to_msg(EngineEvent::Failed {
            session: 3,
            error: TransportError {
                kind: FailureKind::HttpStatus(404),
                message: "HTTP error! status: 404".to_string(),
            },
        });
        assert_eq!(
            msg,
            Msg::TransportFailed {
                session: 3,
                message: "HTTP error! status: 404".to_string(),
            }
        );
    }

    #[test]
    fn lines_keep_session_and_text() {
        let msg = event_to_msg(EngineEvent::Line {
            session: 1,
            line: "data: {}".to_string(),
        });
        assert_eq!(
            msg,
            Msg::LineReceived {
                session: 1,
                line: "data: {}".to_string(),
            }
        );
    }
}
