use serde_json::Value;

use crate::{AppState, SessionId, SessionPhase};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub query: String,
    pub session_id: SessionId,
    pub phase: SessionPhase,
    pub is_active: bool,
    pub logs: Vec<String>,
    pub result: Option<Value>,
    /// `result` as two-space indented JSON, ready for display.
    pub result_text: Option<String>,
    pub dirty: bool,
}

impl AppViewModel {
    pub(crate) fn from_state(state: &AppState) -> Self {
        let session = state.session();
        let result = session.result().cloned();
        let result_text = result
            .as_ref()
            .and_then(|value| serde_json::to_string_pretty(value).ok());
        Self {
            query: state.query().to_string(),
            session_id: session.id(),
            phase: session.phase(),
            is_active: session.is_active(),
            logs: session.logs().to_vec(),
            result,
            result_text,
            dirty: state.is_dirty(),
        }
    }

    /// Log lines after the first `already_shown`, for incremental rendering.
    pub fn logs_since(&self, already_shown: usize) -> &[String] {
        self.logs.get(already_shown..).unwrap_or_default()
    }
}
