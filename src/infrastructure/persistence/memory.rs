use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use crate::application::ports::{
    ChatUserRepository, RepositoryError, TransactionRepository,
};
use crate::domain::{ChatUser, NewTransaction, Transaction, TransactionPatch};

/// In-memory transaction store with the same constraint semantics as the
/// Postgres adapter, so the dispatcher can be exercised end-to-end in
/// tests.
#[derive(Default)]
pub struct InMemoryTransactionRepository {
    rows: Mutex<Vec<Transaction>>,
    next_id: AtomicI64,
}

impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn all(&self) -> Vec<Transaction> {
        self.rows.lock().expect("store poisoned").clone()
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn create(&self, transaction: &NewTransaction) -> Result<Transaction, RepositoryError> {
        let mut rows = self.rows.lock().expect("store poisoned");

        if rows
            .iter()
            .any(|t| t.source_message_id == transaction.source_message_id)
        {
            return Err(RepositoryError::ConstraintViolation(format!(
                "duplicate source_message_id {}",
                transaction.source_message_id
            )));
        }

        let now = Utc::now();
        let stored = Transaction {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            source_message_id: transaction.source_message_id,
            chat_user_id: transaction.chat_user_id,
            amount: transaction.amount,
            location: transaction.location.clone(),
            fulltext: transaction.fulltext.clone(),
            date: transaction.date,
            time: transaction.time,
            category: transaction.category,
            created_at: now,
            updated_at: now,
        };

        rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_source_message(
        &self,
        source_message_id: i64,
    ) -> Result<Option<Transaction>, RepositoryError> {
        let rows = self.rows.lock().expect("store poisoned");
        Ok(rows
            .iter()
            .find(|t| t.source_message_id == source_message_id)
            .cloned())
    }

    async fn update(
        &self,
        id: i64,
        patch: &TransactionPatch,
    ) -> Result<Transaction, RepositoryError> {
        let mut rows = self.rows.lock().expect("store poisoned");
        let row = rows
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("transaction {}", id)))?;

        if let Some(amount) = patch.amount {
            row.amount = amount;
        }
        if let Some(location) = &patch.location {
            row.location = Some(location.clone());
        }
        if let Some(category) = patch.category {
            row.category = Some(category);
        }
        if let Some(date) = patch.date {
            row.date = date;
        }
        if let Some(time) = patch.time {
            row.time = Some(time);
        }
        row.updated_at = Utc::now();

        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().expect("store poisoned");
        let before = rows.len();
        rows.retain(|t| t.id != id);

        if rows.len() == before {
            return Err(RepositoryError::NotFound(format!("transaction {}", id)));
        }
        Ok(())
    }

    async fn find_by_date(
        &self,
        chat_user_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Transaction>, RepositoryError> {
        let rows = self.rows.lock().expect("store poisoned");
        Ok(rows
            .iter()
            .filter(|t| t.chat_user_id == chat_user_id && t.date == date)
            .cloned()
            .collect())
    }

    async fn find_by_date_range(
        &self,
        chat_user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, RepositoryError> {
        let rows = self.rows.lock().expect("store poisoned");
        let mut matched: Vec<Transaction> = rows
            .iter()
            .filter(|t| t.chat_user_id == chat_user_id && t.date >= start && t.date <= end)
            .cloned()
            .collect();

        // Same ordering contract as the SQL adapter.
        matched.sort_by_key(|t| (t.date, t.id));
        Ok(matched)
    }
}

#[derive(Default)]
pub struct InMemoryChatUserRepository {
    rows: Mutex<Vec<ChatUser>>,
}

impl InMemoryChatUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.rows.lock().expect("store poisoned").len()
    }
}

#[async_trait]
impl ChatUserRepository for InMemoryChatUserRepository {
    async fn find_by_chat_id(&self, chat_id: i64) -> Result<Option<ChatUser>, RepositoryError> {
        let rows = self.rows.lock().expect("store poisoned");
        Ok(rows.iter().find(|u| u.chat_id == chat_id).cloned())
    }

    async fn create(&self, user: &ChatUser) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().expect("store poisoned");
        if rows.iter().any(|u| u.chat_id == user.chat_id) {
            return Ok(());
        }
        rows.push(user.clone());
        Ok(())
    }
}
