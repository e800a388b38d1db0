mod audio_converter;
mod chat_responder;
mod chat_user_repository;
mod expense_extractor;
mod file_fetcher;
mod repository_error;
mod transaction_repository;
mod transcription_engine;

pub use audio_converter::{AudioConverter, ConvertError};
pub use chat_responder::{ChatResponder, ResponderError};
pub use chat_user_repository::ChatUserRepository;
pub use expense_extractor::{ExpenseExtractor, ExtractionError};
pub use file_fetcher::{FetchError, FileFetcher};
pub use repository_error::RepositoryError;
pub use transaction_repository::TransactionRepository;
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
