//! `play` command handler.

use parley::playback::play;
use parley::{ConversationRepository, CsvConversationStore, ParleyConfig, ParleyResult, Session};
use tokio::io::BufReader;

/// Plays a stored conversation on stdin/stdout.
pub async fn play_conversation(config: &ParleyConfig, conversation_id: &str) -> ParleyResult<()> {
    let store = CsvConversationStore::new(&config.storage.data_dir)?;
    let records = store.load(conversation_id).await?;

    let mut session = Session::new();
    let turns = session.load_turns(&records)?;
    tracing::info!(conversation = %conversation_id, turns, "Starting playback");

    let mut stdout = tokio::io::stdout();
    let shown = play(&mut session, BufReader::new(tokio::io::stdin()), &mut stdout).await?;
    tracing::debug!(shown, "Playback complete");
    Ok(())
}
