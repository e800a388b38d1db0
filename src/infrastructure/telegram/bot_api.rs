use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::application::ports::{
    ChatResponder, FetchError, FileFetcher, ResponderError,
};

use super::wire::{WireFile, WireUpdate};

/// Thin client over the Telegram Bot API: long-poll updates in, replies
/// and file downloads out. Implements the outbound ports so the core
/// never sees transport details.
pub struct BotApi {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum BotApiError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("api error: {0}")]
    Api(String),
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct ApiEnvelope<T> {
    ok: bool,
    #[serde(default)]
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
}

impl BotApi {
    pub fn new(token: String, base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            base_url: base_url.unwrap_or_else(|| "https://api.telegram.org".to_string()),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<T, BotApiError> {
        let response = self
            .client
            .post(self.method_url(method))
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| BotApiError::Transport(e.to_string()))?;

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| BotApiError::Transport(format!("body: {}", e)))?;

        if !envelope.ok {
            return Err(BotApiError::Api(
                envelope
                    .description
                    .unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        envelope
            .result
            .ok_or_else(|| BotApiError::Api("missing result".to_string()))
    }

    pub async fn get_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> Result<Vec<WireUpdate>, BotApiError> {
        let body = json!({
            "offset": offset,
            "timeout": timeout_secs,
            "allowed_updates": ["message"],
        });

        // The request itself must outlive the server-side long poll.
        self.call("getUpdates", &body, Duration::from_secs(timeout_secs + 10))
            .await
    }
}

#[async_trait]
impl ChatResponder for BotApi {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), ResponderError> {
        let body = json!({ "chat_id": chat_id, "text": text });

        self.call::<serde_json::Value>("sendMessage", &body, Duration::from_secs(15))
            .await
            .map(|_| ())
            .map_err(|e| ResponderError::SendFailed(e.to_string()))
    }
}

#[async_trait]
impl FileFetcher for BotApi {
    async fn fetch(&self, file_id: &str) -> Result<Bytes, FetchError> {
        let body = json!({ "file_id": file_id });

        let file: WireFile = self
            .call("getFile", &body, Duration::from_secs(15))
            .await
            .map_err(|e| FetchError::ResolveFailed(e.to_string()))?;

        let file_path = file
            .file_path
            .ok_or_else(|| FetchError::ResolveFailed("file has no path".to_string()))?;

        let url = format!("{}/file/bot{}/{}", self.base_url, self.token, file_path);
        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(60))
            .send()
            .await
            .map_err(|e| FetchError::DownloadFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::DownloadFailed(format!(
                "status {}",
                response.status()
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| FetchError::DownloadFailed(e.to_string()))
    }
}
