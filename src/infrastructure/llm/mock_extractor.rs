use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{ExpenseExtractor, ExtractionError};
use crate::domain::ExpenseDraft;

/// Scripted extractor: returns queued outcomes in order, for exercising
/// the dispatcher without a live backend.
#[derive(Default)]
pub struct MockExpenseExtractor {
    outcomes: Mutex<VecDeque<Result<ExpenseDraft, ExtractionError>>>,
}

impl MockExpenseExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, outcome: Result<ExpenseDraft, ExtractionError>) {
        self.outcomes
            .lock()
            .expect("extractor queue poisoned")
            .push_back(outcome);
    }

    fn next(&self) -> Result<ExpenseDraft, ExtractionError> {
        self.outcomes
            .lock()
            .expect("extractor queue poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Err(ExtractionError::ApiRequestFailed(
                    "no scripted outcome".to_string(),
                ))
            })
    }
}

#[async_trait]
impl ExpenseExtractor for MockExpenseExtractor {
    async fn extract_from_text(&self, _text: &str) -> Result<ExpenseDraft, ExtractionError> {
        self.next()
    }

    async fn extract_from_image(&self, _image: &[u8]) -> Result<ExpenseDraft, ExtractionError> {
        self.next()
    }
}
