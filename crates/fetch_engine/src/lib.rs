//! Fetch console engine: streaming transport, line decoding and session
//! execution.
mod decode;
mod engine;
mod session;
mod transport;
mod types;

pub use decode::LineDecoder;
pub use engine::{EngineError, EngineHandle};
pub use session::{run_session, ChannelEventSink, EventSink, SessionEnd};
pub use transport::{
    ByteStream, ReqwestTransport, StreamTransport, TransportSettings, DEFAULT_ENDPOINT,
};
pub use types::{EngineEvent, FailureKind, SessionId, TransportError};
