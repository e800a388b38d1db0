use async_trait::async_trait;

/// Outbound replies to a conversation.
#[async_trait]
pub trait ChatResponder: Send + Sync {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), ResponderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ResponderError {
    #[error("send failed: {0}")]
    SendFailed(String),
}
