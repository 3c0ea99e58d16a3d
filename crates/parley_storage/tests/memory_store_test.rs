//! Tests for the in-memory conversation store.

use parley_core::TurnRecord;
use parley_storage::{ConversationRepository, InMemoryConversationStore};

#[tokio::test]
async fn test_create_save_load() {
    let store = InMemoryConversationStore::new();
    assert!(store.is_empty());

    let summary = store.create("Demo").await.unwrap();
    let rows = vec![
        TurnRecord::new(1, "AI Agent", "Hello\nthere", "[Greets]"),
        TurnRecord::new(2, "", "", ""),
    ];
    store.save(summary.id(), &rows).await.unwrap();

    let loaded = store.load(summary.id()).await.unwrap();
    assert_eq!(loaded, vec![rows[0].clone()]);
    assert_eq!(*store.list().await.unwrap()[0].turn_count(), 1);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_unknown_id_and_blank_name_fail() {
    let store = InMemoryConversationStore::new();

    assert!(store.load("nope").await.is_err());
    assert!(store.save("nope", &[]).await.is_err());
    assert!(store.create("").await.is_err());
}
