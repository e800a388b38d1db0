use async_trait::async_trait;

/// Speech-to-text over an external backend. Input is the already-converted
/// audio container; output is the plain transcript.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(&self, audio_data: &[u8]) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("backend returned an empty transcript")]
    EmptyTranscript,
}
