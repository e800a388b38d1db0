mod settings;

pub use settings::{
    AudioSettings, DatabaseSettings, OpenAiSettings, Settings, SettingsError, TelegramSettings,
};
