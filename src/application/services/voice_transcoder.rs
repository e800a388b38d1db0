use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempPath;

use crate::application::ports::{AudioConverter, ConvertError, FetchError, FileFetcher};
use crate::domain::VoiceClip;

/// Bridges a delivered voice clip to the container the transcription
/// backend accepts: fetch, write the source container to scratch, convert.
///
/// The source scratch file is held as a `TempPath`, so it is removed on
/// every exit path. The converted artifact travels out as
/// `TranscodedAudio` and is removed when the caller drops it.
pub struct VoiceTranscoder {
    fetcher: Arc<dyn FileFetcher>,
    converter: Arc<dyn AudioConverter>,
    scratch_dir: PathBuf,
}

/// Scoped handle over the converted file; dropping it deletes the file.
pub struct TranscodedAudio {
    path: TempPath,
}

impl TranscodedAudio {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    #[error("voice fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("scratch file error: {0}")]
    Scratch(#[from] std::io::Error),
    #[error("codec conversion failed: {0}")]
    Conversion(#[from] ConvertError),
}

impl VoiceTranscoder {
    pub fn new(
        fetcher: Arc<dyn FileFetcher>,
        converter: Arc<dyn AudioConverter>,
        scratch_dir: PathBuf,
    ) -> Self {
        Self {
            fetcher,
            converter,
            scratch_dir,
        }
    }

    pub async fn transcode(&self, clip: &VoiceClip) -> Result<TranscodedAudio, TranscodeError> {
        let audio = self.fetcher.fetch(&clip.file_id).await?;

        tokio::fs::create_dir_all(&self.scratch_dir).await?;

        let source = self.write_scratch(".oga", Some(audio.as_ref()))?;
        let target = self.write_scratch(".mp3", None)?;

        tracing::debug!(
            file_id = %clip.file_id,
            duration_secs = clip.duration_secs,
            "Converting voice clip"
        );

        let converted = self.converter.convert(&source, &target).await;

        // `source` drops here on every path, deleting the scratch file.
        drop(source);
        converted?;

        Ok(TranscodedAudio { path: target })
    }

    fn write_scratch(&self, suffix: &str, content: Option<&[u8]>) -> Result<TempPath, TranscodeError> {
        let mut file = tempfile::Builder::new()
            .prefix("voice-")
            .suffix(suffix)
            .tempfile_in(&self.scratch_dir)?;

        if let Some(bytes) = content {
            file.write_all(bytes)?;
            file.flush()?;
        }

        Ok(file.into_temp_path())
    }
}
