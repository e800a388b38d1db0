use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{AudioConverter, ConvertError};

/// Codec conversion through an ffmpeg subprocess: Telegram delivers voice
/// notes as OGG/Opus, the transcription backend wants MP3.
pub struct FfmpegConverter {
    ffmpeg_path: String,
}

impl FfmpegConverter {
    pub fn new(ffmpeg_path: String) -> Self {
        Self { ffmpeg_path }
    }
}

#[async_trait]
impl AudioConverter for FfmpegConverter {
    async fn convert(&self, source: &Path, target: &Path) -> Result<(), ConvertError> {
        let output = Command::new(&self.ffmpeg_path)
            .arg("-y")
            .arg("-i")
            .arg(source)
            .arg("-vn")
            .arg("-acodec")
            .arg("libmp3lame")
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| ConvertError::SpawnFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // ffmpeg is chatty; the last line carries the actual failure.
            let last_line = stderr.lines().last().unwrap_or("no output").to_string();
            return Err(ConvertError::ConversionFailed {
                status: output.status.to_string(),
                stderr: last_line,
            });
        }

        tracing::debug!(target = %target.display(), "Voice clip converted");

        Ok(())
    }
}
