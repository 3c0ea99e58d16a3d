//! Flat-file conversation storage.
//!
//! Each conversation lives in its own CSV file next to a JSON index:
//!
//! ```text
//! conversations/
//! ├── conversations.json          (index of ConversationSummary)
//! ├── 0b6f...-4c1e.csv
//! └── 9a31...-77d0.csv
//! ```

use crate::repository::{newest_first, not_found, playable_count, validate_name};
use crate::{ConversationRepository, ConversationSummary};
use parley_core::{TurnRecord, escape_newlines, unescape_newlines};
use parley_error::{ParleyResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Name of the index file inside the data directory.
pub const INDEX_FILE: &str = "conversations.json";

/// Column names, in order.
pub const CSV_HEADER: [&str; 4] = ["turn", "speaker", "message", "system_actions"];

/// CSV-backed conversation repository.
///
/// Messages are written with newlines escaped as the two characters `\n`, so every
/// row occupies exactly one line of the file. Writes go to a temp file that is
/// then renamed over the target.
#[derive(Debug)]
pub struct CsvConversationStore {
    base_path: PathBuf,
    // Serializes index read-modify-write cycles
    index_lock: Mutex<()>,
}

impl CsvConversationStore {
    /// Opens a store rooted at `base_path`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> ParleyResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Opened conversation store");
        Ok(Self {
            base_path,
            index_lock: Mutex::new(()),
        })
    }

    /// Root directory of the store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn index_path(&self) -> PathBuf {
        self.base_path.join(INDEX_FILE)
    }

    fn csv_path(&self, id: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", id))
    }

    async fn read_index(&self) -> ParleyResult<Vec<ConversationSummary>> {
        let path = self.index_path();
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
                .into());
            }
        };

        let index = serde_json::from_slice(&bytes).map_err(|e| {
            StorageError::new(StorageErrorKind::Index(format!("{}: {}", path.display(), e)))
        })?;
        Ok(index)
    }

    async fn write_index(&self, index: &[ConversationSummary]) -> ParleyResult<()> {
        let bytes = serde_json::to_vec_pretty(index)
            .map_err(|e| StorageError::new(StorageErrorKind::Index(e.to_string())))?;
        write_atomic(&self.index_path(), &bytes).await
    }

    async fn find(&self, id: &str) -> ParleyResult<ConversationSummary> {
        self.read_index()
            .await?
            .into_iter()
            .find(|s| s.id() == id)
            .ok_or_else(|| not_found(id).into())
    }
}

#[async_trait::async_trait]
impl ConversationRepository for CsvConversationStore {
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> ParleyResult<Vec<ConversationSummary>> {
        let mut index = self.read_index().await?;
        newest_first(&mut index);
        tracing::debug!(count = index.len(), "Listed conversations");
        Ok(index)
    }

    #[tracing::instrument(skip(self))]
    async fn create(&self, name: &str) -> ParleyResult<ConversationSummary> {
        let name = validate_name(name)?;
        let summary = ConversationSummary::new(Uuid::new_v4().to_string(), name);

        let _guard = self.index_lock.lock().await;
        write_atomic(&self.csv_path(summary.id()), &encode_csv(&[])?).await?;

        let mut index = self.read_index().await?;
        index.push(summary.clone());
        self.write_index(&index).await?;

        tracing::info!(id = %summary.id(), name = %summary.name(), "Created conversation");
        Ok(summary)
    }

    #[tracing::instrument(skip(self))]
    async fn load(&self, id: &str) -> ParleyResult<Vec<TurnRecord>> {
        self.find(id).await?;
        let path = self.csv_path(id);

        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                not_found(id)
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        let records = decode_csv(&bytes)?;
        tracing::info!(id, count = records.len(), "Loaded conversation");
        Ok(records)
    }

    #[tracing::instrument(skip(self, records), fields(rows = records.len()))]
    async fn save(&self, id: &str, records: &[TurnRecord]) -> ParleyResult<()> {
        let _guard = self.index_lock.lock().await;

        let mut index = self.read_index().await?;
        let summary = index
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| not_found(id))?;

        write_atomic(&self.csv_path(id), &encode_csv(records)?).await?;
        summary.set_turn_count(playable_count(records));
        self.write_index(&index).await?;

        tracing::info!(id, rows = records.len(), "Saved conversation");
        Ok(())
    }
}

/// Encodes rows as CSV text with escaped newlines.
///
/// The header is always written, so an empty conversation is a one-line file.
pub fn encode_csv(records: &[TurnRecord]) -> Result<Vec<u8>, StorageError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER).map_err(csv_error)?;
    for record in records {
        let escaped = TurnRecord {
            message: escape_newlines(&record.message),
            ..record.clone()
        };
        writer.serialize(&escaped).map_err(csv_error)?;
    }

    writer
        .into_inner()
        .map_err(|e| StorageError::new(StorageErrorKind::Csv(e.to_string())))
}

/// Decodes CSV text, dropping rows without a speaker or message.
pub fn decode_csv(bytes: &[u8]) -> Result<Vec<TurnRecord>, StorageError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let mut records = Vec::new();
    for (line, row) in reader.deserialize::<TurnRecord>().enumerate() {
        let mut record = row.map_err(csv_error)?;
        if record.is_blank() {
            tracing::warn!(row = line + 1, "Skipping row without speaker or message");
            continue;
        }
        record.message = unescape_newlines(&record.message);
        records.push(record);
    }
    Ok(records)
}

fn csv_error(e: csv::Error) -> StorageError {
    StorageError::new(StorageErrorKind::Csv(e.to_string()))
}

async fn write_atomic(path: &Path, data: &[u8]) -> ParleyResult<()> {
    let temp_path = path.with_extension("tmp");
    tokio::fs::write(&temp_path, data).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            temp_path.display(),
            e
        )))
    })?;

    tokio::fs::rename(&temp_path, path).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "rename {} to {}: {}",
            temp_path.display(),
            path.display(),
            e
        )))
    })?;
    Ok(())
}
