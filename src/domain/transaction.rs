use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use super::{Category, ExpenseDraft};

/// Persisted expense record. `source_message_id` is the id of the chat
/// message that created the record; it is unique across all records and,
/// paired with `chat_user_id`, identifies the record for edit/delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: i64,
    pub source_message_id: i64,
    pub chat_user_id: i64,
    pub amount: i64,
    pub location: Option<String>,
    pub fulltext: Option<String>,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub category: Option<Category>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for a create; the store assigns `id` and the timestamps.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub source_message_id: i64,
    pub chat_user_id: i64,
    pub amount: i64,
    pub location: Option<String>,
    pub fulltext: Option<String>,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub category: Option<Category>,
}

/// Field-by-field update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub amount: Option<i64>,
    pub location: Option<String>,
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
}

impl TransactionPatch {
    /// Keeps only the fields the draft actually carries: a non-positive
    /// amount and empty strings do not make it into the patch.
    pub fn from_draft(draft: &ExpenseDraft) -> Self {
        Self {
            amount: (draft.amount > 0).then_some(draft.amount),
            location: draft
                .location
                .as_deref()
                .filter(|l| !l.trim().is_empty())
                .map(str::to_string),
            category: draft.category,
            date: draft.date,
            time: draft.time,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.location.is_none()
            && self.category.is_none()
            && self.date.is_none()
            && self.time.is_none()
    }
}
