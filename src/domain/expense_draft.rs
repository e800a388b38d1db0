use chrono::{NaiveDate, NaiveTime};

use super::Category;

/// Structured expense extracted from one message, before validation and
/// defaulting. A missing amount is modeled as `0`, which fails the
/// usability rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub amount: i64,
    pub location: Option<String>,
    pub category: Option<Category>,
    pub full_text: String,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub judgment: Option<String>,
}

impl ExpenseDraft {
    pub fn is_usable(&self) -> bool {
        self.amount > 0
    }
}

/// A draft that passed validation and defaulting: ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedExpense {
    pub amount: i64,
    pub location: Option<String>,
    pub category: Option<Category>,
    pub full_text: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub judgment: Option<String>,
}
