use fetch_logging::{fetch_debug, fetch_info, fetch_warn};

use crate::event::{dispatch_line, Dispatch};
use crate::payload::prepare_payload;
use crate::{AppState, Effect, Msg, Outcome, SessionId, SessionPhase};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::QueryEdited(text) => {
            state.set_query(text);
            Vec::new()
        }
        Msg::FetchClicked => start_fetch(&mut state),
        Msg::StreamOpened { session } => {
            if let Some(current) = state.live_session_mut(session) {
                current.set_phase(SessionPhase::Streaming);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::LineReceived { session, line } => {
            apply_line(&mut state, session, &line);
            Vec::new()
        }
        Msg::StreamCompleted { session } => {
            if let Some(current) = state.live_session_mut(session) {
                current.set_phase(SessionPhase::Terminated(Outcome::Success));
                fetch_info!(
                    "Session {} completed with {} log lines",
                    session,
                    current.logs().len()
                );
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::TransportFailed { session, message } => {
            if let Some(current) = state.live_session_mut(session) {
                fetch_warn!("Session {} failed: {}", session, message);
                current.push_log(format!("Error: {message}"));
                current.set_phase(SessionPhase::Terminated(Outcome::Error));
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn start_fetch(state: &mut AppState) -> Vec<Effect> {
    let mut effects = Vec::with_capacity(2);
    let previous = state.session();
    if previous.is_active() {
        fetch_info!("Superseding active session {}", previous.id());
        effects.push(Effect::AbandonSession {
            session: previous.id(),
        });
    }

    let session = state.start_session();
    let prepared = prepare_payload(state.query());
    let Some(current) = state.live_session_mut(session) else {
        return effects;
    };
    match prepared {
        Ok(payload) => {
            fetch_info!("Session {} submitting payload", session);
            effects.push(Effect::SubmitPayload { session, payload });
        }
        Err(err) => {
            fetch_warn!("Session {} rejected before submit: {}", session, err);
            current.push_log(format!("Error: {err}"));
            current.set_phase(SessionPhase::Terminated(Outcome::Error));
        }
    }
    effects
}

fn apply_line(state: &mut AppState, session: SessionId, line: &str) {
    let Some(current) = state.live_session_mut(session) else {
        fetch_debug!("Dropping line for inactive session {}", session);
        return;
    };
    // Body lines imply the response was accepted.
    let mut changed = current.phase() == SessionPhase::Submitting;
    if changed {
        current.set_phase(SessionPhase::Streaming);
    }
    changed |= dispatch_line(line, current) != Dispatch::Ignored;
    if changed {
        state.mark_dirty();
    }
}
