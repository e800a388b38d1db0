/// Transport-agnostic inbound update. The Telegram wire JSON is mapped
/// into this shape at the presentation boundary; the core only ever sees
/// this type.
#[derive(Debug, Clone, Default)]
pub struct InboundMessage {
    pub message_id: i64,
    pub chat: ChatRef,
    pub sender: Option<SenderRef>,
    pub text: Option<String>,
    pub caption: Option<String>,
    pub photo: Vec<PhotoSize>,
    pub voice: Option<VoiceClip>,
    /// Id of the message this one replies to, when present.
    pub reply_to: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatKind {
    #[default]
    Private,
    Group,
}

#[derive(Debug, Clone, Default)]
pub struct ChatRef {
    pub id: i64,
    pub kind: ChatKind,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SenderRef {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// One resolution of an uploaded photo; Telegram delivers several sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoSize {
    pub file_id: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceClip {
    pub file_id: String,
    pub duration_secs: u32,
}
