use async_trait::async_trait;
use bytes::Bytes;

/// Downloads a transport-hosted file (photo, voice clip) by its file id.
#[async_trait]
pub trait FileFetcher: Send + Sync {
    async fn fetch(&self, file_id: &str) -> Result<Bytes, FetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("file resolution failed: {0}")]
    ResolveFailed(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
}
