use crate::domain::{InboundMessage, PhotoSize, VoiceClip};

/// Closed classification of one inbound update. Every downstream branch
/// matches over this instead of re-inspecting the payload shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    Command { name: String, args: Vec<String> },
    Photo(Vec<PhotoSize>),
    Voice(VoiceClip),
    Text(String),
    Ignored,
}

/// An update whose text or caption begins with a command token is always a
/// Command, regardless of accompanying payload. Otherwise priority is
/// Photo > Voice > Text; anything else (stickers, documents, blank text)
/// is Ignored.
pub fn classify(message: &InboundMessage) -> MessageKind {
    if let Some(command) = command_of(message) {
        return command;
    }

    if !message.photo.is_empty() {
        return MessageKind::Photo(message.photo.clone());
    }

    if let Some(voice) = &message.voice {
        return MessageKind::Voice(voice.clone());
    }

    match message.text.as_deref() {
        Some(body) if !body.trim().is_empty() => MessageKind::Text(body.to_string()),
        _ => MessageKind::Ignored,
    }
}

fn command_of(message: &InboundMessage) -> Option<MessageKind> {
    let source = message
        .text
        .as_deref()
        .or(message.caption.as_deref())
        .filter(|body| body.starts_with('/'))?;

    let mut tokens = source.split_whitespace();
    let head = tokens.next()?;

    // "/start@some_bot" addresses this bot through a group mention.
    let name = head
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or_default()
        .to_lowercase();

    Some(MessageKind::Command {
        name,
        args: tokens.map(str::to_string).collect(),
    })
}
