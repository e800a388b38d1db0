use std::sync::Arc;

use chrono::NaiveDate;
use ledgerbot::application::ports::TransactionRepository;
use ledgerbot::application::services::ReplyResolver;
use ledgerbot::domain::NewTransaction;
use ledgerbot::infrastructure::persistence::InMemoryTransactionRepository;

async fn seeded_store() -> Arc<InMemoryTransactionRepository> {
    let store = Arc::new(InMemoryTransactionRepository::new());
    store
        .create(&NewTransaction {
            source_message_id: 42,
            chat_user_id: 7,
            amount: 50_000,
            location: None,
            fulltext: Some("pho".to_string()),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid"),
            time: None,
            category: None,
        })
        .await
        .expect("seed create");
    store
}

#[tokio::test]
async fn given_owning_conversation_when_resolving_then_returns_the_record() {
    let store = seeded_store().await;
    let resolver = ReplyResolver::new(store);

    let found = resolver.resolve(42, 7).await.expect("query ok");
    assert_eq!(found.map(|t| t.amount), Some(50_000));
}

#[tokio::test]
async fn given_unknown_message_id_when_resolving_then_returns_none() {
    let store = seeded_store().await;
    let resolver = ReplyResolver::new(store);

    let found = resolver.resolve(999, 7).await.expect("query ok");
    assert!(found.is_none());
}

#[tokio::test]
async fn given_other_conversations_record_when_resolving_then_outcome_is_identical_none() {
    let store = seeded_store().await;
    let resolver = ReplyResolver::new(store);

    // A record owned by someone else must be indistinguishable from a
    // record that does not exist.
    let foreign = resolver.resolve(42, 8).await.expect("query ok");
    let missing = resolver.resolve(999, 8).await.expect("query ok");

    assert!(foreign.is_none());
    assert_eq!(foreign, missing);
}
