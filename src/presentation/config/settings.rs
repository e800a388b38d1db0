use std::path::PathBuf;

/// Process configuration, assembled from environment variables once at
/// startup (a `.env` file is loaded before this runs).
#[derive(Debug, Clone)]
pub struct Settings {
    pub telegram: TelegramSettings,
    pub openai: OpenAiSettings,
    pub database: DatabaseSettings,
    pub audio: AudioSettings,
}

#[derive(Debug, Clone)]
pub struct TelegramSettings {
    pub bot_token: String,
    pub api_base: Option<String>,
    pub poll_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub base_url: Option<String>,
    pub extraction_model: String,
    pub vision_model: String,
    pub transcription_model: String,
    /// Voice notes arrive in one fixed spoken language.
    pub transcription_language: String,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct AudioSettings {
    pub scratch_dir: PathBuf,
    pub ffmpeg_path: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for environment variable {0}")]
    InvalidVar(&'static str),
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Ok(Self {
            telegram: TelegramSettings {
                bot_token: required("TELEGRAM_BOT_TOKEN")?,
                api_base: optional("TELEGRAM_API_BASE"),
                poll_timeout_secs: parsed_or("TELEGRAM_POLL_TIMEOUT_SECS", 30)?,
            },
            openai: OpenAiSettings {
                api_key: required("OPENAI_API_KEY")?,
                base_url: optional("OPENAI_BASE_URL"),
                extraction_model: optional("OPENAI_MODEL")
                    .unwrap_or_else(|| "gpt-4o-mini".to_string()),
                vision_model: optional("OPENAI_VISION_MODEL")
                    .unwrap_or_else(|| "gpt-4o".to_string()),
                transcription_model: optional("OPENAI_TRANSCRIPTION_MODEL")
                    .unwrap_or_else(|| "whisper-1".to_string()),
                transcription_language: optional("TRANSCRIPTION_LANGUAGE")
                    .unwrap_or_else(|| "vi".to_string()),
            },
            database: DatabaseSettings {
                url: required("DATABASE_URL")?,
                max_connections: parsed_or("DATABASE_MAX_CONNECTIONS", 5)?,
            },
            audio: AudioSettings {
                scratch_dir: optional("AUDIO_SCRATCH_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| std::env::temp_dir().join("ledgerbot")),
                ffmpeg_path: optional("FFMPEG_PATH").unwrap_or_else(|| "ffmpeg".to_string()),
            },
        })
    }
}

fn required(name: &'static str) -> Result<String, SettingsError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(SettingsError::MissingVar(name))
}

fn optional(name: &'static str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parsed_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, SettingsError> {
    match optional(name) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| SettingsError::InvalidVar(name)),
    }
}
