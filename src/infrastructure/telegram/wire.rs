use serde::Deserialize;

use crate::domain::{ChatKind, ChatRef, InboundMessage, PhotoSize, SenderRef, VoiceClip};

/// Telegram Bot API update JSON. Only the payload kinds the bot handles
/// are modeled; everything else deserializes to an empty message and ends
/// up classified as Ignored.
#[derive(Debug, Deserialize)]
pub struct WireUpdate {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<WireMessage>,
}

#[derive(Debug, Deserialize)]
pub struct WireMessage {
    pub message_id: i64,
    pub chat: WireChat,
    #[serde(default)]
    pub from: Option<WireUser>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub photo: Option<Vec<WirePhotoSize>>,
    #[serde(default)]
    pub voice: Option<WireVoice>,
    #[serde(default)]
    pub reply_to_message: Option<Box<WireMessage>>,
}

#[derive(Debug, Deserialize)]
pub struct WireChat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireUser {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WirePhotoSize {
    pub file_id: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize)]
pub struct WireVoice {
    pub file_id: String,
    #[serde(default)]
    pub duration: u32,
}

#[derive(Debug, Deserialize)]
pub struct WireFile {
    #[serde(default)]
    pub file_path: Option<String>,
}

impl From<WireMessage> for InboundMessage {
    fn from(wire: WireMessage) -> Self {
        InboundMessage {
            message_id: wire.message_id,
            chat: ChatRef {
                id: wire.chat.id,
                kind: match wire.chat.kind.as_str() {
                    "private" => ChatKind::Private,
                    _ => ChatKind::Group,
                },
                title: wire.chat.title,
            },
            sender: wire.from.map(|user| SenderRef {
                username: user.username,
                first_name: user.first_name,
                last_name: user.last_name,
            }),
            text: wire.text,
            caption: wire.caption,
            photo: wire
                .photo
                .unwrap_or_default()
                .into_iter()
                .map(|p| PhotoSize {
                    file_id: p.file_id,
                    width: p.width,
                    height: p.height,
                })
                .collect(),
            voice: wire.voice.map(|v| VoiceClip {
                file_id: v.file_id,
                duration_secs: v.duration,
            }),
            reply_to: wire.reply_to_message.map(|m| m.message_id),
        }
    }
}
