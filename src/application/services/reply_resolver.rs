use std::sync::Arc;

use crate::application::ports::{RepositoryError, TransactionRepository};
use crate::domain::Transaction;

/// Maps a replied-to message id plus conversation identity to the one
/// record it created. Used uniformly by update and delete.
pub struct ReplyResolver {
    transactions: Arc<dyn TransactionRepository>,
}

impl ReplyResolver {
    pub fn new(transactions: Arc<dyn TransactionRepository>) -> Self {
        Self { transactions }
    }

    /// A record that does not exist and a record owned by another
    /// conversation produce the identical `None`: the caller cannot tell
    /// whether the target exists under someone else's identity.
    pub async fn resolve(
        &self,
        source_message_id: i64,
        chat_user_id: i64,
    ) -> Result<Option<Transaction>, RepositoryError> {
        let found = self
            .transactions
            .find_by_source_message(source_message_id)
            .await?;

        Ok(found.filter(|transaction| transaction.chat_user_id == chat_user_id))
    }
}
