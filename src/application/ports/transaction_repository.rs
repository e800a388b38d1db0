use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{NewTransaction, Transaction, TransactionPatch};

use super::RepositoryError;

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Inserts a new record. Duplicate `source_message_id` values are
    /// rejected at the store boundary with `ConstraintViolation`.
    async fn create(&self, transaction: &NewTransaction) -> Result<Transaction, RepositoryError>;

    async fn find_by_source_message(
        &self,
        source_message_id: i64,
    ) -> Result<Option<Transaction>, RepositoryError>;

    /// Applies the patch field-by-field; `None` fields keep their stored
    /// values. `updated_at` is always refreshed.
    async fn update(
        &self,
        id: i64,
        patch: &TransactionPatch,
    ) -> Result<Transaction, RepositoryError>;

    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;

    async fn find_by_date(
        &self,
        chat_user_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Transaction>, RepositoryError>;

    /// Inclusive range, ordered ascending by date. Range reports rely on
    /// this ordering contract.
    async fn find_by_date_range(
        &self,
        chat_user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, RepositoryError>;
}
