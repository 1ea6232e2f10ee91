use std::io::{self, Write};

use fetch_core::{AppViewModel, Outcome, SessionId, SessionPhase};

/// Prints the log view incrementally and the result panel at the end.
#[derive(Debug, Default)]
pub(crate) struct Renderer {
    session: SessionId,
    shown_logs: usize,
}

impl Renderer {
    pub(crate) fn render(&mut self, view: &AppViewModel, out: &mut impl Write) -> io::Result<()> {
        if view.session_id != self.session {
            self.session = view.session_id;
            self.shown_logs = 0;
        }
        for line in view.logs_since(self.shown_logs) {
            writeln!(out, "> {line}")?;
        }
        self.shown_logs = view.logs.len();
        Ok(())
    }

    pub(crate) fn render_summary(
        &self,
        view: &AppViewModel,
        out: &mut impl Write,
    ) -> io::Result<()> {
        match view.result_text.as_deref() {
            Some(text) => writeln!(out, "{text}")?,
            None => writeln!(out, "No result.")?,
        }
        let status = match view.phase {
            SessionPhase::Terminated(Outcome::Success) => "done",
            SessionPhase::Terminated(Outcome::Error) => "failed",
            SessionPhase::Idle => "idle",
            SessionPhase::Submitting | SessionPhase::Streaming => "running",
        };
        writeln!(out, "[{status}]")?;
        out.flush()
    }
}
