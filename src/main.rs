use std::sync::Arc;

use ledgerbot::application::ports::{
    ChatResponder, ChatUserRepository, FileFetcher, TransactionRepository,
};
use ledgerbot::application::services::{Dispatcher, VoiceTranscoder};
use ledgerbot::infrastructure::audio::{FfmpegConverter, OpenAiWhisperEngine};
use ledgerbot::infrastructure::llm::OpenAiExtractor;
use ledgerbot::infrastructure::observability::{init_tracing, TracingConfig};
use ledgerbot::infrastructure::persistence::{
    create_pool, PgChatUserRepository, PgTransactionRepository,
};
use ledgerbot::infrastructure::telegram::BotApi;
use ledgerbot::presentation::{Settings, UpdatePoller};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    init_tracing(TracingConfig::default());

    let pool = create_pool(&settings.database.url, settings.database.max_connections).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let transactions: Arc<dyn TransactionRepository> =
        Arc::new(PgTransactionRepository::new(pool.clone()));
    let users: Arc<dyn ChatUserRepository> = Arc::new(PgChatUserRepository::new(pool));

    let bot = Arc::new(BotApi::new(
        settings.telegram.bot_token.clone(),
        settings.telegram.api_base.clone(),
    ));
    let responder: Arc<dyn ChatResponder> = bot.clone();
    let files: Arc<dyn FileFetcher> = bot.clone();

    let extractor = Arc::new(OpenAiExtractor::new(
        settings.openai.api_key.clone(),
        settings.openai.base_url.clone(),
        settings.openai.extraction_model.clone(),
        settings.openai.vision_model.clone(),
    ));
    let transcription = Arc::new(OpenAiWhisperEngine::new(
        settings.openai.api_key.clone(),
        settings.openai.base_url.clone(),
        Some(settings.openai.transcription_model.clone()),
        settings.openai.transcription_language.clone(),
    ));

    let converter = Arc::new(FfmpegConverter::new(settings.audio.ffmpeg_path.clone()));
    let transcoder = Arc::new(VoiceTranscoder::new(
        files.clone(),
        converter,
        settings.audio.scratch_dir.clone(),
    ));

    let dispatcher = Arc::new(Dispatcher::new(
        transactions,
        users,
        extractor,
        transcription,
        transcoder,
        files,
        responder,
    ));

    UpdatePoller::new(bot, dispatcher, settings.telegram.poll_timeout_secs)
        .run()
        .await;

    Ok(())
}
