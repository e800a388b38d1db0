mod bot_api;
mod mock_transport;
pub mod wire;

pub use bot_api::{BotApi, BotApiError};
pub use mock_transport::{MockFileFetcher, RecordingResponder};
