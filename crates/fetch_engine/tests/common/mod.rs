#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use bytes::Bytes;
use fetch_engine::{ByteStream, EngineEvent, EventSink, StreamTransport, TransportError};
use futures_util::stream::{self, StreamExt};
use serde_json::Value;

/// What a scripted request answers with.
#[derive(Clone)]
pub enum Script {
    /// Status failure before any body.
    Reject(TransportError),
    /// These chunks, then the given end.
    Chunks(Vec<Result<&'static [u8], TransportError>>),
    /// These chunks, then the stream stays open forever.
    Hang(Vec<&'static [u8]>),
}

/// Answers each request with the script selected by the payload's `query`.
pub struct ScriptedTransport {
    scripts: Vec<(&'static str, Script)>,
    pub requests: Mutex<Vec<Value>>,
}

impl ScriptedTransport {
    pub fn new(scripts: Vec<(&'static str, Script)>) -> Arc<Self> {
        Arc::new(Self {
            scripts,
            requests: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait::async_trait]
impl StreamTransport for ScriptedTransport {
    async fn open(&self, payload: &Value) -> Result<ByteStream, TransportError> {
        self.requests.lock().unwrap().push(payload.clone());
        let query = payload["query"].as_str().unwrap_or_default();
        let script = self
            .scripts
            .iter()
            .find(|(name, _)| *name == query)
            .map(|(_, script)| script.clone())
            .unwrap_or_else(|| panic!("no script for query {query:?}"));

        match script {
            Script::Reject(err) => Err(err),
            Script::Chunks(chunks) => Ok(stream::iter(
                chunks
                    .into_iter()
                    .map(|chunk| chunk.map(Bytes::from_static)),
            )
            .boxed()),
            Script::Hang(chunks) => Ok(stream::iter(
                chunks
                    .into_iter()
                    .map(|chunk| Ok(Bytes::from_static(chunk))),
            )
            .chain(stream::pending())
            .boxed()),
        }
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<EngineEvent>>,
}

impl RecordingSink {
    pub fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}
