//! Fetch console core: payload preparation, stream event dispatch and the
//! pure session state machine.
mod effect;
mod event;
mod msg;
mod payload;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use event::{
    classify_line, dispatch_line, DecodeError, Dispatch, EventObserver, StreamEvent, DATA_PREFIX,
};
pub use msg::Msg;
pub use payload::{
    extract_payload, find_payload_literal, prepare_payload, strip_trailing_separators,
    validate_payload, ExtractionError, PayloadError, ValidatedPayload, ValidationError,
    PAYLOAD_MARKER,
};
pub use state::{AppState, Outcome, SessionId, SessionPhase, SessionState, DEFAULT_QUERY};
pub use update::update;
pub use view_model::AppViewModel;
