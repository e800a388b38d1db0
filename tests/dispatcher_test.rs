use std::sync::Arc;

use bytes::Bytes;
use chrono::{Datelike, Local, NaiveDate};
use ledgerbot::application::ports::{ExtractionError, TransactionRepository};
use ledgerbot::application::services::{Dispatcher, VoiceTranscoder};
use ledgerbot::domain::{
    Category, ChatKind, ChatRef, ExpenseDraft, InboundMessage, NewTransaction, PhotoSize,
    SenderRef, VoiceClip,
};
use ledgerbot::infrastructure::audio::{MockAudioConverter, MockTranscriptionEngine};
use ledgerbot::infrastructure::llm::MockExpenseExtractor;
use ledgerbot::infrastructure::persistence::{
    InMemoryChatUserRepository, InMemoryTransactionRepository,
};
use ledgerbot::infrastructure::telegram::{MockFileFetcher, RecordingResponder};

struct World {
    dispatcher: Dispatcher,
    transactions: Arc<InMemoryTransactionRepository>,
    users: Arc<InMemoryChatUserRepository>,
    extractor: Arc<MockExpenseExtractor>,
    responder: Arc<RecordingResponder>,
    _scratch: tempfile::TempDir,
}

fn world_with_transcript(transcript: &str) -> World {
    let transactions = Arc::new(InMemoryTransactionRepository::new());
    let users = Arc::new(InMemoryChatUserRepository::new());
    let extractor = Arc::new(MockExpenseExtractor::new());
    let responder = Arc::new(RecordingResponder::new());
    let fetcher = Arc::new(MockFileFetcher {
        payload: Some(Bytes::from_static(b"payload")),
    });

    let scratch = tempfile::tempdir().expect("tempdir");
    let transcoder = Arc::new(VoiceTranscoder::new(
        fetcher.clone(),
        Arc::new(MockAudioConverter { should_fail: false }),
        scratch.path().to_path_buf(),
    ));

    let dispatcher = Dispatcher::new(
        transactions.clone(),
        users.clone(),
        extractor.clone(),
        Arc::new(MockTranscriptionEngine {
            transcript: transcript.to_string(),
        }),
        transcoder,
        fetcher,
        responder.clone(),
    );

    World {
        dispatcher,
        transactions,
        users,
        extractor,
        responder,
        _scratch: scratch,
    }
}

fn world() -> World {
    world_with_transcript("lunch 30k")
}

fn draft(amount: i64) -> ExpenseDraft {
    ExpenseDraft {
        amount,
        location: None,
        category: None,
        full_text: "scripted".to_string(),
        date: None,
        time: None,
        judgment: None,
    }
}

fn text_message(chat_id: i64, message_id: i64, body: &str) -> InboundMessage {
    InboundMessage {
        message_id,
        chat: ChatRef {
            id: chat_id,
            kind: ChatKind::Private,
            title: None,
        },
        text: Some(body.to_string()),
        ..Default::default()
    }
}

async fn seed_expense(world: &World, source_message_id: i64, chat_user_id: i64) {
    world
        .transactions
        .create(&NewTransaction {
            source_message_id,
            chat_user_id,
            amount: 50_000,
            location: None,
            fulltext: Some("pho".to_string()),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid"),
            time: None,
            category: Some(Category::Dining),
        })
        .await
        .expect("seed create");
}

#[tokio::test]
async fn given_unusable_draft_when_handling_text_then_no_record_and_no_reply() {
    let world = world();
    world.extractor.push(Ok(draft(0)));

    world
        .dispatcher
        .handle_update(text_message(1, 100, "mystery message"))
        .await;

    assert!(world.transactions.all().is_empty());
    assert!(world.responder.sent().is_empty());
}

#[tokio::test]
async fn given_valid_draft_when_handling_text_then_record_persisted_with_defaults() {
    let world = world();
    world.extractor.push(Ok(draft(50_000)));

    world
        .dispatcher
        .handle_update(text_message(1, 100, "50k pho"))
        .await;

    let stored = world.transactions.all();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].source_message_id, 100);
    assert_eq!(stored[0].chat_user_id, 1);
    assert_eq!(stored[0].amount, 50_000);
    assert_eq!(stored[0].date, Local::now().date_naive());
    assert!(stored[0].time.is_some());

    let sent = world.responder.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].1.contains("50,000"));
}

#[tokio::test]
async fn given_extraction_failure_when_handling_text_then_single_apology_and_no_record() {
    let world = world();
    world
        .extractor
        .push(Err(ExtractionError::ApiRequestFailed("down".to_string())));

    world
        .dispatcher
        .handle_update(text_message(1, 100, "50k pho"))
        .await;

    assert!(world.transactions.all().is_empty());

    let sent = world.responder.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].1.contains("Something went wrong"));
}

#[tokio::test]
async fn given_start_twice_when_handling_then_single_identity_record() {
    let world = world();

    let mut msg = text_message(1, 100, "/start");
    msg.sender = Some(SenderRef {
        username: Some("sam".to_string()),
        first_name: Some("Sam".to_string()),
        last_name: None,
    });

    world.dispatcher.handle_update(msg.clone()).await;
    msg.message_id = 101;
    world.dispatcher.handle_update(msg).await;

    assert_eq!(world.users.count(), 1);

    let sent = world.responder.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].1.contains("Welcome Sam"));
}

#[tokio::test]
async fn given_update_reply_when_draft_is_partial_then_only_valid_fields_overwrite() {
    let world = world();
    seed_expense(&world, 10, 1).await;

    // New draft carries an invalid amount and a location only.
    let mut partial = draft(0);
    partial.location = Some("cafe".to_string());
    world.extractor.push(Ok(partial));

    let mut msg = text_message(1, 200, "/update cafe instead");
    msg.reply_to = Some(10);
    world.dispatcher.handle_update(msg).await;

    let stored = world.transactions.all();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].amount, 50_000);
    assert_eq!(stored[0].location.as_deref(), Some("cafe"));
    assert_eq!(stored[0].category, Some(Category::Dining));
    assert_eq!(
        stored[0].date,
        NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid")
    );
}

#[tokio::test]
async fn given_update_without_reply_then_corrective_message_and_no_change() {
    let world = world();
    seed_expense(&world, 10, 1).await;

    world
        .dispatcher
        .handle_update(text_message(1, 200, "/update 70k"))
        .await;

    let sent = world.responder.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].1.contains("Reply to the expense message"));
    assert_eq!(world.transactions.all()[0].amount, 50_000);
}

#[tokio::test]
async fn given_delete_reply_when_record_is_owned_then_it_is_removed() {
    let world = world();
    seed_expense(&world, 10, 1).await;

    let mut msg = text_message(1, 200, "/delete");
    msg.reply_to = Some(10);
    world.dispatcher.handle_update(msg).await;

    assert!(world.transactions.all().is_empty());

    let sent = world.responder.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].1.contains("Deleted expense of 50,000"));
}

#[tokio::test]
async fn given_delete_reply_for_foreign_record_then_not_found_and_record_stays() {
    let world = world();
    seed_expense(&world, 10, 2).await;

    let mut msg = text_message(1, 200, "/cancel");
    msg.reply_to = Some(10);
    world.dispatcher.handle_update(msg).await;

    assert_eq!(world.transactions.all().len(), 1);

    let sent = world.responder.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].1.contains("Expense not found"));
}

#[tokio::test]
async fn given_unknown_command_then_silence() {
    let world = world();

    world
        .dispatcher
        .handle_update(text_message(1, 100, "/frobnicate"))
        .await;

    assert!(world.responder.sent().is_empty());
    assert!(world.transactions.all().is_empty());
}

#[tokio::test]
async fn given_unsupported_payload_then_silence() {
    let world = world();

    // A sticker arrives as a message with no handled payload at all.
    let msg = InboundMessage {
        message_id: 100,
        chat: ChatRef {
            id: 1,
            kind: ChatKind::Private,
            title: None,
        },
        ..Default::default()
    };
    world.dispatcher.handle_update(msg).await;

    assert!(world.responder.sent().is_empty());
    assert!(world.transactions.all().is_empty());
}

#[tokio::test]
async fn given_invalid_date_token_then_usage_hint() {
    let world = world();

    world
        .dispatcher
        .handle_update(text_message(1, 100, "/date 32"))
        .await;

    let sent = world.responder.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].1.contains("Invalid date format"));
}

#[tokio::test]
async fn given_voice_message_then_transcript_is_echoed_and_expense_recorded() {
    let world = world_with_transcript("lunch 30k");
    world.extractor.push(Ok(draft(30_000)));

    let mut msg = text_message(1, 100, "");
    msg.text = None;
    msg.voice = Some(VoiceClip {
        file_id: "voice-1".to_string(),
        duration_secs: 3,
    });
    world.dispatcher.handle_update(msg).await;

    let stored = world.transactions.all();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].amount, 30_000);

    let sent = world.responder.sent();
    assert_eq!(sent.len(), 3);
    assert!(sent[0].1.contains("Processing the voice message"));
    assert!(sent[1].1.contains("Heard: lunch 30k"));
    assert!(sent[2].1.contains("30,000"));
}

#[tokio::test]
async fn given_photo_message_then_fulltext_is_receipt_marker() {
    let world = world();
    world.extractor.push(Ok(draft(80_000)));

    let mut msg = text_message(1, 100, "");
    msg.text = None;
    msg.photo = vec![
        PhotoSize {
            file_id: "small".to_string(),
            width: 90,
            height: 60,
        },
        PhotoSize {
            file_id: "large".to_string(),
            width: 1280,
            height: 960,
        },
    ];
    world.dispatcher.handle_update(msg).await;

    let stored = world.transactions.all();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].fulltext.as_deref(), Some("Receipt image"));

    let sent = world.responder.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].1.contains("Analyzing the receipt"));
    assert!(sent[1].1.contains("80,000"));
}

#[tokio::test]
async fn given_date_command_with_records_then_totals_are_reported() {
    let world = world();
    let today = Local::now().date_naive();

    for (i, (amount, category)) in [(10_000, Category::Dining), (5_000, Category::Transport)]
        .into_iter()
        .enumerate()
    {
        world
            .transactions
            .create(&NewTransaction {
                source_message_id: 10 + i as i64,
                chat_user_id: 1,
                amount,
                location: None,
                fulltext: None,
                date: today,
                time: None,
                category: Some(category),
            })
            .await
            .expect("seed create");
    }

    world
        .dispatcher
        .handle_update(text_message(1, 100, "/date"))
        .await;

    let sent = world.responder.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].1.contains("Total: 15,000"));
    assert!(sent[0].1.contains("dining: 10,000"));
    assert!(sent[0].1.contains("transport: 5,000"));
}

#[tokio::test]
async fn given_report_command_then_days_are_listed_ascending() {
    let world = world();
    let today = Local::now().date_naive();
    let first = today.with_day(1).expect("first of month");

    seed_dated(&world, 10, first, 10_000).await;
    seed_dated(&world, 11, today, 7_000).await;

    world
        .dispatcher
        .handle_update(text_message(1, 100, "/report"))
        .await;

    let sent = world.responder.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].1.contains("Total: 17,000"));

    let first_pos = sent[0]
        .1
        .find(&first.format("%d/%m/%Y").to_string())
        .expect("first day listed");
    let today_pos = sent[0]
        .1
        .find(&today.format("%d/%m/%Y").to_string())
        .expect("today listed");
    assert!(first_pos <= today_pos);
}

async fn seed_dated(world: &World, source_message_id: i64, date: NaiveDate, amount: i64) {
    world
        .transactions
        .create(&NewTransaction {
            source_message_id,
            chat_user_id: 1,
            amount,
            location: None,
            fulltext: None,
            date,
            time: None,
            category: None,
        })
        .await
        .expect("seed create");
}
