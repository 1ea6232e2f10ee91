use serde_json::Value;

use crate::event::{DecodeError, EventObserver};
use crate::view_model::AppViewModel;

pub type SessionId = u64;

/// The query template a fresh editor starts with.
pub const DEFAULT_QUERY: &str = r#"response = requests.post(
    '/fetch',
    json={
        "query": "Enter your query here",
        "output": {
            "field1": "string",
            "field2": "number",
            "field3": "string"
        },
        "max_answers": 10
    }
)"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Submitting,
    Streaming,
    Terminated(Outcome),
}

impl SessionPhase {
    pub fn is_active(self) -> bool {
        matches!(self, SessionPhase::Submitting | SessionPhase::Streaming)
    }
}

/// Everything the presentation sees about the current session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    id: SessionId,
    phase: SessionPhase,
    logs: Vec<String>,
    result: Option<Value>,
}

impl SessionState {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    pub(crate) fn set_phase(&mut self, phase: SessionPhase) {
        self.phase = phase;
    }

    pub(crate) fn push_log(&mut self, message: impl Into<String>) {
        self.logs.push(message.into());
    }

    fn fresh(id: SessionId) -> Self {
        Self {
            id,
            phase: SessionPhase::Submitting,
            logs: Vec::new(),
            result: None,
        }
    }
}

impl EventObserver for SessionState {
    fn on_log(&mut self, message: String) {
        self.logs.push(message);
    }

    fn on_result(&mut self, data: Value) {
        self.result = Some(data);
    }

    fn on_decode_error(&mut self, error: DecodeError) {
        self.logs.push(format!("Skipped malformed record: {error}"));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    query: String,
    session: SessionState,
    next_session_id: SessionId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_query(DEFAULT_QUERY)
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            session: SessionState::default(),
            next_session_id: 1,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::from_state(self)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether state changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_query(&mut self, query: String) {
        if self.query != query {
            self.query = query;
            self.mark_dirty();
        }
    }

    /// Discards the current session and starts a new one in `Submitting`.
    pub(crate) fn start_session(&mut self) -> SessionId {
        let id = self.next_session_id;
        self.next_session_id += 1;
        self.session = SessionState::fresh(id);
        self.mark_dirty();
        id
    }

    /// Mutable access for events belonging to `id` while it is active.
    /// Events from superseded or finished sessions get `None`.
    pub(crate) fn live_session_mut(&mut self, id: SessionId) -> Option<&mut SessionState> {
        if self.session.id == id && self.session.is_active() {
            Some(&mut self.session)
        } else {
            None
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
