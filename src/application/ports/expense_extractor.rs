use async_trait::async_trait;

use crate::domain::ExpenseDraft;

/// Structured-expense extraction over an external model. Implementations
/// return the draft exactly as the backend produced it; validation and
/// defaulting happen in the caller.
#[async_trait]
pub trait ExpenseExtractor: Send + Sync {
    async fn extract_from_text(&self, text: &str) -> Result<ExpenseDraft, ExtractionError>;

    async fn extract_from_image(&self, image: &[u8]) -> Result<ExpenseDraft, ExtractionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
