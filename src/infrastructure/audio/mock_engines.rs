use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::{
    AudioConverter, ConvertError, TranscriptionEngine, TranscriptionError,
};

/// Converter stand-in: writes a fixed payload to the target on success,
/// or fails without touching it.
pub struct MockAudioConverter {
    pub should_fail: bool,
}

#[async_trait]
impl AudioConverter for MockAudioConverter {
    async fn convert(&self, _source: &Path, target: &Path) -> Result<(), ConvertError> {
        if self.should_fail {
            return Err(ConvertError::ConversionFailed {
                status: "exit status: 1".to_string(),
                stderr: "mock conversion failure".to_string(),
            });
        }

        tokio::fs::write(target, b"converted-audio")
            .await
            .map_err(|e| ConvertError::SpawnFailed(e.to_string()))?;
        Ok(())
    }
}

/// Transcription stand-in returning one fixed transcript.
pub struct MockTranscriptionEngine {
    pub transcript: String,
}

#[async_trait]
impl TranscriptionEngine for MockTranscriptionEngine {
    async fn transcribe(&self, _audio_data: &[u8]) -> Result<String, TranscriptionError> {
        if self.transcript.is_empty() {
            return Err(TranscriptionError::EmptyTranscript);
        }
        Ok(self.transcript.clone())
    }
}
