use crate::SessionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the query text.
    QueryEdited(String),
    /// User triggered a fetch with the current query text.
    FetchClicked,
    /// Response headers arrived with a success status.
    StreamOpened { session: SessionId },
    /// One complete line of the response body, in arrival order.
    LineReceived { session: SessionId, line: String },
    /// The response body ended normally.
    StreamCompleted { session: SessionId },
    /// Request issuance or body consumption failed.
    TransportFailed { session: SessionId, message: String },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
