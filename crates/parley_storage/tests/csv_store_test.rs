//! Tests for the CSV conversation store.

use parley_core::TurnRecord;
use parley_error::{ParleyErrorKind, StorageErrorKind};
use parley_storage::{
    ConversationRepository, CsvConversationStore, INDEX_FILE, decode_csv, encode_csv,
};
use tempfile::TempDir;

fn storage_kind(err: parley_error::ParleyError) -> StorageErrorKind {
    match err.kind() {
        ParleyErrorKind::Storage(e) => e.kind.clone(),
        other => panic!("expected storage error, got {}", other),
    }
}

#[tokio::test]
async fn test_create_writes_header_and_index() {
    let temp_dir = TempDir::new().unwrap();
    let store = CsvConversationStore::new(temp_dir.path()).unwrap();

    let summary = store.create("  Onboarding  ").await.unwrap();
    assert_eq!(summary.name(), "Onboarding");
    assert_eq!(*summary.turn_count(), 0);

    let csv = std::fs::read_to_string(temp_dir.path().join(format!("{}.csv", summary.id()))).unwrap();
    assert_eq!(csv.trim_end(), "turn,speaker,message,system_actions");
    assert!(temp_dir.path().join(INDEX_FILE).exists());

    assert!(store.load(summary.id()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_name_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let store = CsvConversationStore::new(temp_dir.path()).unwrap();

    let err = store.create("   ").await.unwrap_err();
    assert!(matches!(storage_kind(err), StorageErrorKind::InvalidName(_)));
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_round_trips_multiline_messages_and_commas() {
    let temp_dir = TempDir::new().unwrap();
    let store = CsvConversationStore::new(temp_dir.path()).unwrap();
    let summary = store.create("Pricing").await.unwrap();

    let rows = vec![
        TurnRecord::new(1, "AI Agent", "Hi!\nHere is your plan,\nitemised.", "[Fetches plan, monthly],[Logs view]"),
        TurnRecord::new(2, "Merchant", "Say \"hello\", then", ""),
    ];
    store.save(summary.id(), &rows).await.unwrap();

    let raw = std::fs::read_to_string(temp_dir.path().join(format!("{}.csv", summary.id()))).unwrap();
    assert_eq!(raw.lines().count(), 3);
    assert!(raw.contains("Hi!\\nHere is your plan"));

    let loaded = store.load(summary.id()).await.unwrap();
    assert_eq!(loaded, rows);
}

#[tokio::test]
async fn test_save_updates_turn_count_and_skips_blank_rows_on_load() {
    let temp_dir = TempDir::new().unwrap();
    let store = CsvConversationStore::new(temp_dir.path()).unwrap();
    let summary = store.create("Drafts").await.unwrap();

    let rows = vec![
        TurnRecord::new(1, "AI Agent", "Hello", ""),
        TurnRecord::new(2, "", "", ""),
        TurnRecord::new(3, "Merchant", "", ""),
        TurnRecord::new(4, "Merchant", "Hi", ""),
    ];
    store.save(summary.id(), &rows).await.unwrap();

    let loaded = store.load(summary.id()).await.unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[1].message, "Hi");

    let listed = store.list().await.unwrap();
    assert_eq!(*listed[0].turn_count(), 2);
}

#[tokio::test]
async fn test_unknown_conversation_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let store = CsvConversationStore::new(temp_dir.path()).unwrap();

    let err = store.load("missing").await.unwrap_err();
    assert_eq!(storage_kind(err), StorageErrorKind::NotFound("missing".to_string()));

    let err = store.save("missing", &[]).await.unwrap_err();
    assert!(matches!(storage_kind(err), StorageErrorKind::NotFound(_)));
}

#[tokio::test]
async fn test_list_is_newest_first_and_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let store = CsvConversationStore::new(temp_dir.path()).unwrap();

    let first = store.create("First").await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = store.create("Second").await.unwrap();

    let reopened = CsvConversationStore::new(temp_dir.path()).unwrap();
    let listed = reopened.list().await.unwrap();
    let ids: Vec<&str> = listed.iter().map(|s| s.id().as_str()).collect();
    assert_eq!(ids, vec![second.id().as_str(), first.id().as_str()]);
}

#[test]
fn test_decode_tolerates_missing_columns_and_odd_turns() {
    let text = "turn,speaker,message,system_actions\n,AI Agent,Hello\nx,Merchant,Hi,[Nods]\n";
    let records = decode_csv(text.as_bytes()).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].turn, 0);
    assert_eq!(records[0].system_actions, "");
    assert_eq!(records[1].turn, 0);
    assert_eq!(records[1].system_actions, "[Nods]");
}

#[test]
fn test_encode_empty_is_header_only() {
    let bytes = encode_csv(&[]).unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), "turn,speaker,message,system_actions\n");
}
