mod memory;
mod pg_chat_user_repository;
mod pg_pool;
mod pg_transaction_repository;

pub use memory::{InMemoryChatUserRepository, InMemoryTransactionRepository};
pub use pg_chat_user_repository::PgChatUserRepository;
pub use pg_pool::create_pool;
pub use pg_transaction_repository::PgTransactionRepository;
