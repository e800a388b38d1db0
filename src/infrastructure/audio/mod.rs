mod ffmpeg_converter;
mod mock_engines;
mod openai_whisper_engine;

pub use ffmpeg_converter::FfmpegConverter;
pub use mock_engines::{MockAudioConverter, MockTranscriptionEngine};
pub use openai_whisper_engine::OpenAiWhisperEngine;
