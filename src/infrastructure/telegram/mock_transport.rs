use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::application::ports::{ChatResponder, FetchError, FileFetcher, ResponderError};

/// Responder that records every outbound reply instead of sending it.
#[derive(Default)]
pub struct RecordingResponder {
    sent: Mutex<Vec<(i64, String)>>,
}

impl RecordingResponder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().expect("responder log poisoned").clone()
    }
}

#[async_trait]
impl ChatResponder for RecordingResponder {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), ResponderError> {
        self.sent
            .lock()
            .expect("responder log poisoned")
            .push((chat_id, text.to_string()));
        Ok(())
    }
}

/// Fetcher that serves one fixed payload, or a scripted failure.
pub struct MockFileFetcher {
    pub payload: Option<Bytes>,
}

#[async_trait]
impl FileFetcher for MockFileFetcher {
    async fn fetch(&self, file_id: &str) -> Result<Bytes, FetchError> {
        match &self.payload {
            Some(bytes) => Ok(bytes.clone()),
            None => Err(FetchError::ResolveFailed(format!("unknown file {}", file_id))),
        }
    }
}
