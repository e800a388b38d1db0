use ledgerbot::application::services::{classify, MessageKind};
use ledgerbot::domain::{InboundMessage, PhotoSize, VoiceClip};

fn message() -> InboundMessage {
    InboundMessage::default()
}

fn photo() -> PhotoSize {
    PhotoSize {
        file_id: "photo-1".to_string(),
        width: 640,
        height: 480,
    }
}

fn voice() -> VoiceClip {
    VoiceClip {
        file_id: "voice-1".to_string(),
        duration_secs: 4,
    }
}

#[test]
fn given_command_text_when_classifying_then_returns_command_with_args() {
    let mut msg = message();
    msg.text = Some("/date 15/03".to_string());

    assert_eq!(
        classify(&msg),
        MessageKind::Command {
            name: "date".to_string(),
            args: vec!["15/03".to_string()],
        }
    );
}

#[test]
fn given_command_with_bot_mention_when_classifying_then_mention_is_stripped() {
    let mut msg = message();
    msg.text = Some("/start@ledger_bot".to_string());

    assert_eq!(
        classify(&msg),
        MessageKind::Command {
            name: "start".to_string(),
            args: vec![],
        }
    );
}

#[test]
fn given_caption_command_with_photo_when_classifying_then_command_wins() {
    let mut msg = message();
    msg.caption = Some("/update".to_string());
    msg.photo = vec![photo()];

    assert!(matches!(
        classify(&msg),
        MessageKind::Command { name, .. } if name == "update"
    ));
}

#[test]
fn given_photo_without_command_when_classifying_then_returns_photo() {
    let mut msg = message();
    msg.photo = vec![photo()];

    assert_eq!(classify(&msg), MessageKind::Photo(vec![photo()]));
}

#[test]
fn given_photo_and_voice_when_classifying_then_photo_takes_priority() {
    let mut msg = message();
    msg.photo = vec![photo()];
    msg.voice = Some(voice());

    assert!(matches!(classify(&msg), MessageKind::Photo(_)));
}

#[test]
fn given_voice_when_classifying_then_returns_voice() {
    let mut msg = message();
    msg.voice = Some(voice());

    assert_eq!(classify(&msg), MessageKind::Voice(voice()));
}

#[test]
fn given_plain_text_when_classifying_then_returns_text() {
    let mut msg = message();
    msg.text = Some("50k pho for lunch".to_string());

    assert_eq!(
        classify(&msg),
        MessageKind::Text("50k pho for lunch".to_string())
    );
}

#[test]
fn given_slash_in_the_middle_when_classifying_then_returns_text() {
    let mut msg = message();
    msg.text = Some("paid 20k for a/c repair".to_string());

    assert!(matches!(classify(&msg), MessageKind::Text(_)));
}

#[test]
fn given_blank_text_when_classifying_then_returns_ignored() {
    let mut msg = message();
    msg.text = Some("   ".to_string());

    assert_eq!(classify(&msg), MessageKind::Ignored);
}

#[test]
fn given_unknown_payload_when_classifying_then_returns_ignored() {
    // A sticker or document deserializes into a message with none of the
    // payload fields set.
    assert_eq!(classify(&message()), MessageKind::Ignored);
}
