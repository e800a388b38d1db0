use async_trait::async_trait;
use base64::Engine;
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::json;

use crate::application::ports::{ExpenseExtractor, ExtractionError};
use crate::domain::{Category, ExpenseDraft};

const TEXT_PROMPT: &str = r#"You are an assistant that analyzes expense messages. Extract the following fields and answer with JSON only:
- "amount": the amount spent, always an integer in whole currency units (e.g. "20k" => 20000)
- "location": where the money was spent, or null
- "category": one of "shopping", "dining", "transport", "entertainment", "services", "health", "education", "lending", "gifts", "other", or null
- "full_message": the original message content
- "date": the transaction date, format yyyy-MM-dd, or null when not mentioned
- "time": the transaction time, format HH:mm:ss; morning means 08:00:00, noon means 12:00:00, evening means 20:00:00; null when not mentioned
- "judgment": one short remark encouraging mindful spending

Example input: "20k for groceries at the market"
Expected output:
{
  "amount": 20000,
  "location": "market",
  "category": "shopping",
  "full_message": "20k for groceries at the market",
  "date": null,
  "time": null,
  "judgment": "Small buys add up, keep an eye on them!"
}"#;

const IMAGE_PROMPT: &str = r#"This is a receipt or a payment screen. Analyze it and extract the following fields, answering with JSON only:
- "amount": the total amount paid, always an integer in whole currency units
- "location": the merchant or place, or null
- "category": one of "shopping", "dining", "transport", "entertainment", "services", "health", "education", "lending", "gifts", "other", or null
- "full_message": a one-line summary of the receipt
- "date": the transaction date, format yyyy-MM-dd, or null when not visible
- "time": the transaction time, format HH:mm:ss, or null when not visible
- "judgment": one short remark encouraging mindful spending"#;

/// Expense extraction over the OpenAI chat completions API in JSON-object
/// mode. Field-level garbage in an otherwise well-shaped response is
/// mapped leniently; only transport faults and non-contract responses
/// surface as errors.
pub struct OpenAiExtractor {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    text_model: String,
    vision_model: String,
}

impl OpenAiExtractor {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        text_model: String,
        vision_model: String,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            text_model,
            vision_model,
        }
    }

    async fn request_draft(
        &self,
        model: &str,
        content: serde_json::Value,
        source_text: &str,
    ) -> Result<ExpenseDraft, ExtractionError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = json!({
            "model": model,
            "messages": [{ "role": "user", "content": content }],
            "response_format": { "type": "json_object" },
            "max_tokens": 500,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ExtractionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ExtractionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, detail
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::MalformedResponse(format!("body: {}", e)))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ExtractionError::MalformedResponse("no choices".to_string()))?;

        let raw: RawDraft = serde_json::from_str(&content)
            .map_err(|e| ExtractionError::MalformedResponse(format!("draft json: {}", e)))?;

        Ok(raw.into_draft(source_text))
    }
}

#[async_trait]
impl ExpenseExtractor for OpenAiExtractor {
    async fn extract_from_text(&self, text: &str) -> Result<ExpenseDraft, ExtractionError> {
        tracing::debug!(chars = text.len(), "Extracting expense from text");

        let content = json!(format!("{}\n\nInput: \"{}\"", TEXT_PROMPT, text));
        self.request_draft(&self.text_model, content, text).await
    }

    async fn extract_from_image(&self, image: &[u8]) -> Result<ExpenseDraft, ExtractionError> {
        tracing::debug!(bytes = image.len(), "Extracting expense from image");

        let data_url = format!(
            "data:image/jpeg;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(image)
        );
        let content = json!([
            { "type": "text", "text": IMAGE_PROMPT },
            { "type": "image_url", "image_url": { "url": data_url } },
        ]);

        self.request_draft(&self.vision_model, content, "").await
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Backend response shape, with every field optional so a sparse answer
/// still parses.
#[derive(Deserialize)]
struct RawDraft {
    #[serde(default)]
    amount: Option<f64>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    full_message: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    judgment: Option<String>,
}

impl RawDraft {
    fn into_draft(self, source_text: &str) -> ExpenseDraft {
        let category = self
            .category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(Category::parse_lenient);

        let date = self.date.as_deref().and_then(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|e| tracing::debug!(raw, error = %e, "Dropping unparsable draft date"))
                .ok()
        });
        let time = self.time.as_deref().and_then(|raw| {
            NaiveTime::parse_from_str(raw, "%H:%M:%S")
                .map_err(|e| tracing::debug!(raw, error = %e, "Dropping unparsable draft time"))
                .ok()
        });

        ExpenseDraft {
            amount: self.amount.map(|a| a as i64).unwrap_or(0),
            location: self.location.filter(|l| !l.trim().is_empty()),
            category,
            full_text: self
                .full_message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| source_text.to_string()),
            date,
            time,
            judgment: self.judgment.filter(|j| !j.trim().is_empty()),
        }
    }
}
