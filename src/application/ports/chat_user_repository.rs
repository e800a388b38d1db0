use async_trait::async_trait;

use crate::domain::ChatUser;

use super::RepositoryError;

#[async_trait]
pub trait ChatUserRepository: Send + Sync {
    async fn find_by_chat_id(&self, chat_id: i64) -> Result<Option<ChatUser>, RepositoryError>;

    /// Creates the identity if it does not exist yet; a concurrent
    /// duplicate insert is a no-op, making registration idempotent.
    async fn create(&self, user: &ChatUser) -> Result<(), RepositoryError>;
}
