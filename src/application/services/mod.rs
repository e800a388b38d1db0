pub mod aggregation;
pub mod classifier;
pub mod commands;
pub mod dispatcher;
pub mod draft_defaults;
pub mod reply_resolver;
pub mod voice_transcoder;

pub use classifier::{classify, MessageKind};
pub use commands::{parse, BotCommand, CommandError};
pub use dispatcher::Dispatcher;
pub use reply_resolver::ReplyResolver;
pub use voice_transcoder::{TranscodeError, TranscodedAudio, VoiceTranscoder};
