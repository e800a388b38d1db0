use std::path::Path;

use async_trait::async_trait;

/// Converts an audio file on disk from its source container/codec into
/// the container the transcription backend accepts.
#[async_trait]
pub trait AudioConverter: Send + Sync {
    async fn convert(&self, source: &Path, target: &Path) -> Result<(), ConvertError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("failed to spawn converter: {0}")]
    SpawnFailed(String),
    #[error("conversion exited with {status}: {stderr}")]
    ConversionFailed { status: String, stderr: String },
}
