mod category;
mod chat_user;
mod daypart;
mod expense_draft;
mod transaction;
mod update;

pub use category::Category;
pub use chat_user::ChatUser;
pub use daypart::Daypart;
pub use expense_draft::{ExpenseDraft, FinalizedExpense};
pub use transaction::{NewTransaction, Transaction, TransactionPatch};
pub use update::{ChatKind, ChatRef, InboundMessage, PhotoSize, SenderRef, VoiceClip};
