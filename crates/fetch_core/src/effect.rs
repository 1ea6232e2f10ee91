use crate::{SessionId, ValidatedPayload};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// POST the payload and stream the response back as messages for `session`.
    SubmitPayload {
        session: SessionId,
        payload: ValidatedPayload,
    },
    /// Stop reading the stream of a superseded session.
    AbandonSession { session: SessionId },
}
