//! `list` and `create` command handlers.

use parley::{ConversationRepository, CsvConversationStore, ParleyConfig, ParleyResult};

/// Prints every conversation, newest first.
pub async fn list_conversations(config: &ParleyConfig) -> ParleyResult<()> {
    let store = CsvConversationStore::new(&config.storage.data_dir)?;
    let conversations = store.list().await?;

    if conversations.is_empty() {
        println!("No conversations in {}", config.storage.data_dir.display());
        return Ok(());
    }

    println!("{:<36}  {:<20}  {:>5}  NAME", "ID", "CREATED", "TURNS");
    for summary in &conversations {
        println!(
            "{:<36}  {:<20}  {:>5}  {}",
            summary.id(),
            summary.created_at().format("%Y-%m-%d %H:%M:%S"),
            summary.turn_count(),
            summary.name()
        );
    }
    Ok(())
}

/// Creates an empty conversation and prints its id.
pub async fn create_conversation(config: &ParleyConfig, name: &str) -> ParleyResult<()> {
    let store = CsvConversationStore::new(&config.storage.data_dir)?;
    let summary = store.create(name).await?;
    println!("Created conversation '{}' ({})", summary.name(), summary.id());
    Ok(())
}
